//! Constants for board extents, search parameters, and shape scanning.
//!
//! These are the defaults the engine starts from. Everything that is meant to
//! be tuned at runtime is also carried by [`crate::config::Config`].

// =============================================================================
// Board Geometry
// =============================================================================

/// Largest x coordinate on the default board. The grid has `COLUMN + 1` points per row.
pub const COLUMN: usize = 15;

/// Largest y coordinate on the default board.
pub const ROW: usize = 15;

/// Largest x or y coordinate a configured board may have.
pub const MAX_EXTENT: usize = 255;

/// The four line directions scanned by evaluation and win detection:
/// vertical, horizontal, diagonal and anti-diagonal.
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// Offsets to the 8 cells surrounding a point, scanned row by row.
pub const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Stones in a row needed to win.
pub const WIN_LENGTH: usize = 5;

// =============================================================================
// Search Parameters
// =============================================================================

/// Default search depth in plies.
pub const DEPTH: u32 = 2;

/// Default attack/defense ratio: how heavily the opponent's shapes count
/// against the side being evaluated.
pub const RATIO: f64 = 1.0;

/// Weight applied to the opponent's aggregate on top of the ratio.
pub const DEFENSE_WEIGHT: f64 = 0.1;

/// Bound of the initial alpha-beta window.
pub const INFINITY: f64 = 99_999_999.0;

// =============================================================================
// Shape Scanning
// =============================================================================

/// Length of the widest shape window.
pub const WINDOW_LEN: usize = 6;

/// Number of cells a scored shape claims on the board.
pub const SPAN_LEN: usize = 5;

/// Leftmost window offset relative to the anchoring stone.
pub const WINDOW_MIN_OFFSET: isize = -5;

/// Two overlapping shapes earn a bonus only when both score above this.
pub const OVERLAP_THRESHOLD: i64 = 10;
