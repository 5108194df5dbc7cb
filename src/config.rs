//! Runtime engine configuration.

use crate::constants::{COLUMN, DEPTH, MAX_EXTENT, RATIO, ROW, WIN_LENGTH};
use crate::error::EngineError;

/// Tunable engine parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Largest x coordinate (the board has `column + 1` points per row).
    pub column: usize,
    /// Largest y coordinate.
    pub row: usize,
    /// Search depth in plies.
    pub depth: u32,
    /// Attack/defense ratio.
    pub ratio: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            column: COLUMN,
            row: ROW,
            depth: DEPTH,
            ratio: RATIO,
        }
    }
}

impl Config {
    #[inline]
    pub fn width(&self) -> usize {
        self.column.saturating_add(1)
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.row.saturating_add(1)
    }

    /// Check that every field is in a usable range.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.column > MAX_EXTENT || self.row > MAX_EXTENT {
            return Err(EngineError::InvalidConfig(
                "board must have at most 256 points per side",
            ));
        }
        if self.width() < WIN_LENGTH || self.height() < WIN_LENGTH {
            return Err(EngineError::InvalidConfig(
                "board must have at least five points per side",
            ));
        }
        if self.depth == 0 {
            return Err(EngineError::InvalidConfig("search depth must be at least 1"));
        }
        if !self.ratio.is_finite() || self.ratio < 0.0 {
            return Err(EngineError::InvalidConfig(
                "ratio must be a finite, non-negative number",
            ));
        }
        Ok(())
    }
}
