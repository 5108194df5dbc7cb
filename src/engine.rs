//! Game engine: owns the board and answers the turn loop.
//!
//! The turn loop applies the human's moves with [`Engine::apply_human_move`],
//! asks for replies with [`Engine::request_move`] and applies them with
//! [`Engine::apply_move`], checking [`Engine::check_win`] after each one.

use tracing::{info, warn};

use crate::board::{Board, Cell, Side};
use crate::config::Config;
use crate::error::EngineError;
use crate::eval::Evaluator;
use crate::search::{SearchStats, Searcher};
use crate::shapes::ShapeTable;

pub struct Engine {
    config: Config,
    board: Board,
    table: &'static ShapeTable,
    last_stats: Option<SearchStats>,
}

impl Engine {
    /// Engine with the standard shape table.
    pub fn new(config: Config) -> Result<Self, EngineError> {
        Self::with_table(config, ShapeTable::standard())
    }

    pub fn with_table(config: Config, table: &'static ShapeTable) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            config,
            board: Board::new(config.width(), config.height()),
            table,
            last_stats: None,
        })
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Clear the board for a new game.
    pub fn reset(&mut self) {
        self.board = Board::new(self.config.width(), self.config.height());
        self.last_stats = None;
    }

    /// Switch to a `width` x `height` board and start a new game on it.
    ///
    /// The current game is kept when the size is rejected.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), EngineError> {
        let (Some(column), Some(row)) = (width.checked_sub(1), height.checked_sub(1)) else {
            return Err(EngineError::InvalidConfig(
                "board must have at least five points per side",
            ));
        };
        let config = Config {
            column,
            row,
            ..self.config
        };
        config.validate()?;
        self.config = config;
        self.reset();
        Ok(())
    }

    pub fn set_depth(&mut self, depth: u32) -> Result<(), EngineError> {
        let config = Config { depth, ..self.config };
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn set_ratio(&mut self, ratio: f64) -> Result<(), EngineError> {
        let config = Config { ratio, ..self.config };
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Diagnostics of the most recent search, if any.
    pub fn last_stats(&self) -> Option<&SearchStats> {
        self.last_stats.as_ref()
    }

    #[inline]
    pub fn check_win(&self, side: Side) -> bool {
        self.board.has_five(side)
    }

    pub fn winner(&self) -> Option<Side> {
        [Side::Human, Side::Engine]
            .into_iter()
            .find(|&side| self.check_win(side))
    }

    /// Choose a move for `side` without playing it.
    ///
    /// On an empty board this is the centre point; otherwise it is the result
    /// of an alpha-beta search at the configured depth. The returned cell is
    /// always empty.
    pub fn request_move(&mut self, side: Side) -> Result<Cell, EngineError> {
        if self.winner().is_some() {
            return Err(EngineError::GameOver);
        }
        if self.board.is_full() {
            return Err(EngineError::NoLegalMove);
        }
        if self.board.is_empty() {
            return Ok(Cell::new(self.config.column / 2, self.config.row / 2));
        }

        let evaluator = Evaluator::new(self.table, self.config.ratio);
        let mut searcher = Searcher::new(evaluator, self.config.depth);
        let outcome = searcher.search(&mut self.board, side)?;

        let stats = &outcome.stats;
        info!(
            stones = self.board.stones(side).len(),
            nodes = stats.nodes,
            prunes = stats.prunes,
            score = stats.score,
            elapsed = ?stats.elapsed,
            "{side} plays {}",
            outcome.best_move
        );
        self.last_stats = Some(outcome.stats);
        Ok(outcome.best_move)
    }

    /// Place a stone for `side`.
    pub fn apply_move(&mut self, side: Side, cell: Cell) -> Result<(), EngineError> {
        if self.winner().is_some() {
            return Err(EngineError::GameOver);
        }
        self.board.place(side, cell)?;
        Ok(())
    }

    /// Place the human's stone, refusing occupied and off-board cells.
    pub fn apply_human_move(&mut self, cell: Cell) -> Result<(), EngineError> {
        self.apply_move(Side::Human, cell).inspect_err(|err| {
            warn!(%cell, %err, "human move refused");
        })
    }

    /// Search for `side` and play the result.
    pub fn play(&mut self, side: Side) -> Result<Cell, EngineError> {
        let cell = self.request_move(side)?;
        self.apply_move(side, cell)?;
        Ok(cell)
    }
}
