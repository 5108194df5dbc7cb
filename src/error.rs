//! Error types surfaced to the turn loop.

use crate::board::BoardError;

/// Errors returned by [`crate::engine::Engine`] and [`crate::search::Searcher`].
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A requested move was rejected by the board. Recoverable: ask again.
    InvalidMove(BoardError),
    /// No empty cell is left to play. The game is a draw.
    NoLegalMove,
    /// A configuration value is out of range.
    InvalidConfig(&'static str),
    /// The game already has a winner.
    GameOver,
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::InvalidMove(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidMove(err) => write!(f, "invalid move: {err}"),
            EngineError::NoLegalMove => write!(f, "no legal move left, the game is a draw"),
            EngineError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            EngineError::GameOver => write!(f, "the game is already over"),
        }
    }
}

impl From<BoardError> for EngineError {
    fn from(err: BoardError) -> Self {
        EngineError::InvalidMove(err)
    }
}
