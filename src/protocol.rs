//! Line-based text protocol in the style of GTP.
//!
//! Each input line is an optional numeric id, a command and its arguments.
//! Successful replies start with `=`, failures with `?`, followed by the id
//! (if any), the reply text and a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`, `list_commands`, `known_command <cmd>`
//! - `quit` - Exit the loop
//! - `boardsize <n>` - Start a new game on an `n` x `n` board
//! - `clear_board` - Start a new game
//! - `play <x> <y>` - Human stone at `(x, y)` (`play x,y` also works)
//! - `genmove [engine|human]` - Search, play and print `x y`, or `draw`
//! - `winner` - `engine`, `human` or `none`
//! - `showboard` - Print the board
//! - `stats` - Diagnostics of the last search
//! - `depth <n>`, `ratio <r>` - Tune the search
//!
//! ## Example
//!
//! ```ignore
//! use gobang::{config::Config, protocol::Session};
//! let mut session = Session::new(Config::default())?;
//! session.run(std::io::stdin().lock(), std::io::stdout())?;
//! ```

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::board::{Cell, Side};
use crate::config::Config;
use crate::engine::Engine;
use crate::error::EngineError;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "depth",
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "ratio",
    "showboard",
    "stats",
    "version",
    "winner",
];

/// Protocol session wrapping one engine.
pub struct Session {
    engine: Engine,
}

impl Session {
    pub fn new(config: Config) -> Result<Self, EngineError> {
        Ok(Self {
            engine: Engine::new(config)?,
        })
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();
            debug!(%command, ?args, "received");

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Parse `x y` or `x,y` into a cell. Range checks are left to the board.
    fn parse_cell(args: &[&str]) -> Option<Cell> {
        let joined = args.join(" ");
        let mut coords = joined
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<usize>());
        match (coords.next(), coords.next(), coords.next()) {
            (Some(Ok(x)), Some(Ok(y)), None) => Some(Cell::new(x, y)),
            _ => None,
        }
    }

    fn parse_side(args: &[&str]) -> Option<Side> {
        match args.first().map(|s| s.to_lowercase()).as_deref() {
            None | Some("engine") => Some(Side::Engine),
            Some("human") => Some(Side::Human),
            Some(_) => None,
        }
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(cmd) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => match args.first().map(|a| a.parse::<usize>()) {
                Some(Ok(size)) => match self.engine.resize(size, size) {
                    Ok(()) => (true, String::new()),
                    Err(err) => (false, err.to_string()),
                },
                Some(Err(_)) => (false, "invalid size".to_string()),
                None => (false, "missing argument".to_string()),
            },

            "clear_board" => {
                self.engine.reset();
                (true, String::new())
            }

            "play" => {
                let Some(cell) = Self::parse_cell(args) else {
                    return (false, "expected coordinates: x y".to_string());
                };
                match self.engine.apply_human_move(cell) {
                    Ok(()) => (true, String::new()),
                    Err(err) => (false, err.to_string()),
                }
            }

            "genmove" => {
                let Some(side) = Self::parse_side(args) else {
                    return (false, "side must be engine or human".to_string());
                };
                match self.engine.play(side) {
                    Ok(cell) => (true, format!("{} {}", cell.x, cell.y)),
                    Err(EngineError::NoLegalMove) => (true, "draw".to_string()),
                    Err(err) => (false, err.to_string()),
                }
            }

            "winner" => {
                let winner = self.engine.winner();
                (true, winner.map_or("none".to_string(), |side| side.to_string()))
            }

            "showboard" => (true, format!("\n{}", self.engine.board())),

            "stats" => match self.engine.last_stats() {
                Some(stats) => (
                    true,
                    format!(
                        "nodes {} prunes {} score {} time {:.3}s",
                        stats.nodes,
                        stats.prunes,
                        stats.score,
                        stats.elapsed.as_secs_f64()
                    ),
                ),
                None => (true, "no search yet".to_string()),
            },

            "depth" => match args.first().map(|a| a.parse::<u32>()) {
                Some(Ok(depth)) => match self.engine.set_depth(depth) {
                    Ok(()) => (true, String::new()),
                    Err(err) => (false, err.to_string()),
                },
                Some(Err(_)) => (false, "invalid depth".to_string()),
                None => (true, self.engine.config().depth.to_string()),
            },

            "ratio" => match args.first().map(|a| a.parse::<f64>()) {
                Some(Ok(ratio)) => match self.engine.set_ratio(ratio) {
                    Ok(()) => (true, String::new()),
                    Err(err) => (false, err.to_string()),
                },
                Some(Err(_)) => (false, "invalid ratio".to_string()),
                None => (true, self.engine.config().ratio.to_string()),
            },

            _ => (false, format!("unknown command: {command}")),
        }
    }
}
