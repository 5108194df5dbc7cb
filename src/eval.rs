//! Position evaluation by pattern matching along lines.
//!
//! Every stone is scanned in the four line directions. For each direction the
//! best matching shape among the six windows containing the stone is kept and
//! recorded, so the same physical shape is not scored again from another of
//! its stones. When a new shape shares a cell with a shape already recorded
//! and both are worth more than [`OVERLAP_THRESHOLD`], both scores are added
//! again as a bonus: one stone extending two threats at once.
//!
//! Records live for one side of one evaluation; they are never kept between
//! calls.

use crate::board::{Board, Cell, Side};
use crate::constants::{
    DEFENSE_WEIGHT, DIRECTIONS, OVERLAP_THRESHOLD, SPAN_LEN, WINDOW_LEN, WINDOW_MIN_OFFSET,
};
use crate::shapes::{CellState, ShapeTable};

/// A shape already counted during the current evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoredShape {
    pub score: i64,
    /// The in-board cells among the five the shape covers.
    pub span: Vec<Cell>,
    pub direction: (isize, isize),
}

/// Scores positions with a given shape table and attack/defense ratio.
#[derive(Clone, Copy, Debug)]
pub struct Evaluator<'t> {
    table: &'t ShapeTable,
    ratio: f64,
}

impl<'t> Evaluator<'t> {
    pub fn new(table: &'t ShapeTable, ratio: f64) -> Self {
        Self { table, ratio }
    }

    #[inline]
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Value of the position for `side`: its own shape score minus the
    /// opponent's, the latter scaled by `ratio * DEFENSE_WEIGHT`.
    pub fn evaluate(&self, board: &Board, side: Side) -> f64 {
        let mine = self.side_score(board, side);
        let theirs = self.side_score(board, side.opponent());
        mine as f64 - theirs as f64 * self.ratio * DEFENSE_WEIGHT
    }

    /// Sum of line scores over every stone of `owner` in every direction.
    pub fn side_score(&self, board: &Board, owner: Side) -> i64 {
        let mut records = Vec::new();
        board
            .stones(owner)
            .iter()
            .map(|&stone| {
                DIRECTIONS
                    .iter()
                    .map(|&dir| self.line_score(board, stone, dir, owner, &mut records))
                    .sum::<i64>()
            })
            .sum()
    }

    /// Score of the best shape through `cell` along `direction`, plus any
    /// overlap bonus against `records`. Records the shape it finds.
    ///
    /// Returns 0 when a recorded shape in the same direction already covers `cell`.
    pub fn line_score(
        &self,
        board: &Board,
        cell: Cell,
        direction: (isize, isize),
        owner: Side,
        records: &mut Vec<ScoredShape>,
    ) -> i64 {
        if records
            .iter()
            .any(|r| r.direction == direction && r.span.contains(&cell))
        {
            return 0;
        }

        let (dx, dy) = direction;
        let mut best: Option<(i64, isize)> = None;
        for offset in WINDOW_MIN_OFFSET..=0 {
            let window: [CellState; WINDOW_LEN] = std::array::from_fn(|i| {
                classify(board, board.step(cell, dx, dy, offset + i as isize), owner)
            });
            if let Some(score) = self.table.best_match(&window) {
                // Strictly greater: ties keep the lowest offset.
                if score > best.map_or(0, |(s, _)| s) {
                    best = Some((score, offset));
                }
            }
        }

        let Some((score, offset)) = best else {
            return 0;
        };
        let span: Vec<Cell> = (0..SPAN_LEN as isize)
            .filter_map(|i| board.step(cell, dx, dy, offset + i))
            .collect();

        let bonus: i64 = records
            .iter()
            .filter(|prev| {
                prev.score > OVERLAP_THRESHOLD
                    && score > OVERLAP_THRESHOLD
                    && prev.span.iter().any(|c| span.contains(c))
            })
            .map(|prev| prev.score + score)
            .sum();

        records.push(ScoredShape {
            score,
            span,
            direction,
        });
        bonus + score
    }
}

fn classify(board: &Board, cell: Option<Cell>, owner: Side) -> CellState {
    match cell.map(|c| board.owner(c)) {
        None => CellState::Blocked,
        Some(None) => CellState::Empty,
        Some(Some(side)) if side == owner => CellState::Own,
        Some(Some(_)) => CellState::Blocked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(engine: &[(usize, usize)], human: &[(usize, usize)]) -> Board {
        let mut board = Board::new(16, 16);
        for &(x, y) in engine {
            board.place(Side::Engine, Cell::new(x, y)).unwrap();
        }
        for &(x, y) in human {
            board.place(Side::Human, Cell::new(x, y)).unwrap();
        }
        board
    }

    #[test]
    fn test_open_four_scored_once() {
        let board = board_with(&[(3, 7), (4, 7), (5, 7), (6, 7)], &[]);
        let eval = Evaluator::new(ShapeTable::standard(), 1.0);
        let mut records = Vec::new();

        let first = eval.line_score(&board, Cell::new(3, 7), (1, 0), Side::Engine, &mut records);
        assert_eq!(first, 50_000);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].span.first(), Some(&Cell::new(2, 7)));
        assert_eq!(records[0].span.last(), Some(&Cell::new(6, 7)));

        let second = eval.line_score(&board, Cell::new(4, 7), (1, 0), Side::Engine, &mut records);
        assert_eq!(second, 0);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_lone_stone_scores_nothing() {
        let board = board_with(&[(7, 7)], &[]);
        let eval = Evaluator::new(ShapeTable::standard(), 1.0);
        let mut records = Vec::new();
        for dir in DIRECTIONS {
            assert_eq!(eval.line_score(&board, Cell::new(7, 7), dir, Side::Engine, &mut records), 0);
        }
        assert!(records.is_empty());
    }

    #[test]
    fn test_enemy_stone_blocks() {
        // X X X X O: closed four, only the 5000 shapes fit
        let board = board_with(&[(3, 7), (4, 7), (5, 7), (6, 7)], &[(7, 7)]);
        let eval = Evaluator::new(ShapeTable::standard(), 1.0);
        let mut records = Vec::new();
        let score = eval.line_score(&board, Cell::new(3, 7), (1, 0), Side::Engine, &mut records);
        assert_eq!(score, 5_000);
    }

    #[test]
    fn test_board_edge_blocks() {
        // Four on the left edge: "2 1 1 1 1 0" never matches the open four
        let board = board_with(&[(0, 3), (1, 3), (2, 3), (3, 3)], &[]);
        let eval = Evaluator::new(ShapeTable::standard(), 1.0);
        let mut records = Vec::new();
        let score = eval.line_score(&board, Cell::new(0, 3), (1, 0), Side::Engine, &mut records);
        assert_eq!(score, 5_000);
    }

    #[test]
    fn test_overlap_bonus() {
        let board = board_with(&[(7, 6), (7, 7), (7, 8)], &[]);
        let eval = Evaluator::new(ShapeTable::standard(), 1.0);
        let crossing = ScoredShape {
            score: 500,
            span: (5..10).map(|x| Cell::new(x, 7)).collect(),
            direction: (1, 0),
        };

        let mut records = vec![crossing.clone()];
        let score = eval.line_score(&board, Cell::new(7, 7), (0, 1), Side::Engine, &mut records);
        assert_eq!(score, 500 + (500 + 500));
        assert_eq!(records.len(), 2);

        // A trivial earlier shape does not earn a bonus
        let mut records = vec![ScoredShape { score: 10, ..crossing }];
        let score = eval.line_score(&board, Cell::new(7, 7), (0, 1), Side::Engine, &mut records);
        assert_eq!(score, 500);
    }

    #[test]
    fn test_overlap_bonus_same_direction_counts_once() {
        let board = board_with(&[(4, 7), (5, 7), (6, 7)], &[]);
        let eval = Evaluator::new(ShapeTable::standard(), 1.0);
        // Same line, sharing (5, 7) and (6, 7) with the shape found from (4, 7)
        let mut records = vec![ScoredShape {
            score: 500,
            span: (5..10).map(|x| Cell::new(x, 7)).collect(),
            direction: (1, 0),
        }];

        let score = eval.line_score(&board, Cell::new(4, 7), (1, 0), Side::Engine, &mut records);
        assert_eq!(score, 500 + (500 + 500));
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].span, (2..7).map(|x| Cell::new(x, 7)).collect::<Vec<_>>());
    }

    #[test]
    fn test_evaluate_ratio() {
        let board = board_with(&[(3, 7), (4, 7), (5, 7), (6, 7)], &[(10, 10)]);

        let eval = Evaluator::new(ShapeTable::standard(), 1.0);
        assert_eq!(eval.side_score(&board, Side::Engine), 50_000);
        assert_eq!(eval.side_score(&board, Side::Human), 0);
        assert_eq!(eval.evaluate(&board, Side::Engine), 50_000.0);
        assert_eq!(eval.evaluate(&board, Side::Human), -5_000.0);

        let aggressive = Evaluator::new(ShapeTable::standard(), 2.0);
        assert_eq!(aggressive.evaluate(&board, Side::Human), -10_000.0);
    }

    #[test]
    fn test_substitute_table() {
        let table = ShapeTable::new(&[(1, "11")]);
        let board = board_with(&[(7, 7), (8, 7)], &[]);
        let eval = Evaluator::new(&table, 1.0);
        // Horizontal pair counted once, nothing else matches
        assert_eq!(eval.side_score(&board, Side::Engine), 1);
    }
}
