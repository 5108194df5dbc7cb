//! Gobang: a five-in-a-row engine using negamax with alpha-beta pruning.
//!
//! The engine plays against a human on a 16x16 grid. Moves are chosen by a
//! depth-limited search over cells next to existing stones, scoring leaves
//! with a table of line shapes.
//!
//! ## Modules
//!
//! - [`constants`] - Board extents, search and scanning parameters
//! - [`config`] - Runtime configuration
//! - [`board`] - Board state and win detection
//! - [`shapes`] - Shape score table
//! - [`movegen`] - Candidate generation and ordering
//! - [`eval`] - Line and position evaluation
//! - [`search`] - Negamax with alpha-beta pruning
//! - [`engine`] - The interface a turn loop talks to
//! - [`protocol`] - Text command loop
//!
//! ## Example
//!
//! ```
//! use gobang::board::{Cell, Side};
//! use gobang::config::Config;
//! use gobang::engine::Engine;
//!
//! let mut engine = Engine::new(Config::default()).unwrap();
//! engine.apply_human_move(Cell::new(7, 7)).unwrap();
//!
//! let reply = engine.request_move(Side::Engine).unwrap();
//! engine.apply_move(Side::Engine, reply).unwrap();
//! assert!(!engine.check_win(Side::Engine));
//! ```

pub mod board;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod eval;
pub mod movegen;
pub mod protocol;
pub mod search;
pub mod shapes;
