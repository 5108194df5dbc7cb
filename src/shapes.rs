//! Shape score table for line evaluation.
//!
//! A shape is a 5- or 6-cell window along one line, written as a string:
//! - `0`: empty point
//! - `1`: own stone
//! - `2`: blocked (enemy stone or off the board)
//!
//! The standard table is compiled once from [`SHAPE_SRC`] and shared by the
//! whole process. Evaluators take a table reference, so tests can build their
//! own with [`ShapeTable::new`].

use std::sync::OnceLock;

use crate::constants::WINDOW_LEN;

/// The standard shapes, from open two up to five in a row.
pub const SHAPE_SRC: &[(i64, &str)] = &[
    (50, "01100"),
    (50, "00110"),
    (500, "11100"),
    (500, "11010"),
    (500, "01110"),
    (500, "011010"),
    (500, "010110"),
    (500, "00111"),
    (5_000, "11110"),
    (5_000, "11101"),
    (5_000, "11011"),
    (5_000, "10111"),
    (5_000, "01111"),
    (50_000, "011110"),
    (99_999_999, "11111"),
];

/// What a window position holds, seen from the side being evaluated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellState {
    Empty,
    Own,
    Blocked,
}

impl CellState {
    fn from_char(c: char) -> Self {
        match c {
            '0' => CellState::Empty,
            '1' => CellState::Own,
            _ => CellState::Blocked,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shape {
    pub score: i64,
    pub pattern: Vec<CellState>,
}

/// Ordered list of scored shapes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShapeTable {
    shapes: Vec<Shape>,
}

static STANDARD: OnceLock<ShapeTable> = OnceLock::new();

impl ShapeTable {
    /// Build a table from `(score, pattern)` pairs.
    pub fn new(src: &[(i64, &str)]) -> Self {
        let shapes = src
            .iter()
            .map(|&(score, pat)| {
                debug_assert!(pat.len() <= WINDOW_LEN, "shape {pat} is wider than a window");
                Shape {
                    score,
                    pattern: pat.chars().map(CellState::from_char).collect(),
                }
            })
            .collect();
        Self { shapes }
    }

    /// The process-wide standard table.
    pub fn standard() -> &'static ShapeTable {
        STANDARD.get_or_init(|| ShapeTable::new(SHAPE_SRC))
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Highest score among shapes that match the start of `window`.
    ///
    /// 5-cell shapes are compared with the first five cells, 6-cell shapes
    /// with the whole window.
    pub fn best_match(&self, window: &[CellState; WINDOW_LEN]) -> Option<i64> {
        self.shapes
            .iter()
            .filter(|shape| window.starts_with(&shape.pattern))
            .map(|shape| shape.score)
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::CellState::{Blocked as B, Empty as E, Own as O};

    #[test]
    fn test_standard_table() {
        let table = ShapeTable::standard();
        assert_eq!(table.len(), SHAPE_SRC.len());
        assert_eq!(table.shapes()[0].score, 50);
        assert_eq!(table.shapes().last().map(|s| s.score), Some(99_999_999));
        assert!(std::ptr::eq(table, ShapeTable::standard()));
    }

    #[test]
    fn test_open_four_beats_closed_four() {
        let table = ShapeTable::standard();
        // 011110 matches both "01111" (5000) and "011110" (50000)
        assert_eq!(table.best_match(&[E, O, O, O, O, E]), Some(50_000));
        assert_eq!(table.best_match(&[E, O, O, O, O, B]), Some(5_000));
    }

    #[test]
    fn test_five() {
        let table = ShapeTable::standard();
        assert_eq!(table.best_match(&[O, O, O, O, O, B]), Some(99_999_999));
    }

    #[test]
    fn test_no_match() {
        let table = ShapeTable::standard();
        assert_eq!(table.best_match(&[E, E, O, E, E, E]), None);
        assert_eq!(table.best_match(&[B, O, O, B, E, E]), None);
    }

    #[test]
    fn test_custom_table() {
        let table = ShapeTable::new(&[(7, "10"), (3, "2")]);
        assert_eq!(table.best_match(&[O, E, B, B, B, B]), Some(7));
        assert_eq!(table.best_match(&[B, E, E, E, E, E]), Some(3));
        assert_eq!(table.best_match(&[E, E, E, E, E, E]), None);
    }
}
