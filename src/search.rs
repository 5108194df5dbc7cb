//! Negamax search with alpha-beta pruning.
//!
//! The search runs in place on the caller's [`Board`]. Every tentative move
//! goes through a [`Placement`] guard which takes the stone back when it is
//! dropped, so the board is restored on every exit path, cutoffs included.
//!
//! Leaves are scored with [`Evaluator::evaluate`] from the perspective of the
//! side to move. A position where either side already has five in a row is
//! treated as a leaf and scored the same way; there is no separate win score.

use std::ops::{Deref, DerefMut};
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::board::{Board, Cell, Side};
use crate::constants::INFINITY;
use crate::error::EngineError;
use crate::eval::Evaluator;
use crate::movegen::candidates;

/// Counters collected during one search, for diagnostics only.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// Candidate moves tried
    pub nodes: u64,
    /// Beta cutoffs
    pub prunes: u64,
    /// Score of the root position for the side to move
    pub score: f64,
    pub elapsed: Duration,
}

/// Result of a root search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub best_move: Cell,
    pub stats: SearchStats,
}

/// A stone placed for the duration of one search branch.
struct Placement<'b> {
    board: &'b mut Board,
    side: Side,
    cell: Cell,
}

impl<'b> Placement<'b> {
    /// Panics if the cell is taken: candidates are always empty cells, so a
    /// failure here means the board invariants are already broken.
    fn new(board: &'b mut Board, side: Side, cell: Cell) -> Self {
        if let Err(err) = board.place(side, cell) {
            panic!("invariant violation during search: {err}");
        }
        Self { board, side, cell }
    }
}

impl Deref for Placement<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Placement<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Placement<'_> {
    fn drop(&mut self) {
        let removed = self.board.remove(self.side, self.cell);
        debug_assert!(removed.is_ok(), "placement guard lost its stone");
    }
}

/// Depth-limited alpha-beta searcher.
pub struct Searcher<'t> {
    evaluator: Evaluator<'t>,
    depth: u32,
    nodes: u64,
    prunes: u64,
    best: Option<Cell>,
}

impl<'t> Searcher<'t> {
    pub fn new(evaluator: Evaluator<'t>, depth: u32) -> Self {
        Self {
            evaluator,
            depth,
            nodes: 0,
            prunes: 0,
            best: None,
        }
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Find the best move for `side`. The board is unchanged on return.
    ///
    /// Fails with [`EngineError::NoLegalMove`] if there is no empty cell next
    /// to a stone. If no candidate raises the score above the initial window,
    /// the first candidate in search order is returned.
    pub fn search(&mut self, board: &mut Board, side: Side) -> Result<SearchOutcome, EngineError> {
        let start = Instant::now();
        self.nodes = 0;
        self.prunes = 0;
        self.best = None;

        let Some(&first) = candidates(board).first() else {
            return Err(EngineError::NoLegalMove);
        };

        let score = self.negamax(board, side, self.depth, -INFINITY, INFINITY);
        let best_move = self.best.unwrap_or(first);

        Ok(SearchOutcome {
            best_move,
            stats: SearchStats {
                nodes: self.nodes,
                prunes: self.prunes,
                score,
                elapsed: start.elapsed(),
            },
        })
    }

    fn negamax(&mut self, board: &mut Board, side: Side, depth: u32, mut alpha: f64, beta: f64) -> f64 {
        if depth == 0 || board.has_five(Side::Engine) || board.has_five(Side::Human) {
            return self.evaluator.evaluate(board, side);
        }

        for cell in candidates(board) {
            self.nodes += 1;

            let value = {
                let mut placed = Placement::new(board, side, cell);
                -self.negamax(&mut placed, side.opponent(), depth - 1, -beta, -alpha)
            };
            trace!(%cell, depth, value, "searched");

            if value > alpha {
                if depth == self.depth {
                    debug!(%cell, value, "new best root move");
                    self.best = Some(cell);
                }
                if value >= beta {
                    self.prunes += 1;
                    return beta;
                }
                alpha = value;
            }
        }

        alpha
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeTable;

    fn searcher(depth: u32) -> Searcher<'static> {
        Searcher::new(Evaluator::new(ShapeTable::standard(), 1.0), depth)
    }

    #[test]
    fn test_empty_board_has_no_move() {
        let mut board = Board::new(16, 16);
        let err = searcher(2).search(&mut board, Side::Engine).unwrap_err();
        assert_eq!(err, EngineError::NoLegalMove);
    }

    #[test]
    fn test_board_restored() {
        let mut board = Board::new(16, 16);
        board.place(Side::Human, Cell::new(7, 7)).unwrap();
        board.place(Side::Engine, Cell::new(8, 8)).unwrap();
        board.place(Side::Human, Cell::new(7, 8)).unwrap();
        let before = board.clone();

        let outcome = searcher(2).search(&mut board, Side::Engine).unwrap();
        assert_eq!(board, before);
        assert!(!board.occupied(outcome.best_move));
        assert!(outcome.stats.nodes > 0);
    }

    #[test]
    fn test_completes_own_four() {
        let mut board = Board::new(16, 16);
        for x in 4..8 {
            board.place(Side::Engine, Cell::new(x, 3)).unwrap();
            board.place(Side::Human, Cell::new(x, 10)).unwrap();
        }
        // Human's four at y=10 is open too, but taking five ends the game first
        let outcome = searcher(2).search(&mut board, Side::Engine).unwrap();
        let five = [Cell::new(3, 3), Cell::new(8, 3)];
        assert!(five.contains(&outcome.best_move), "got {}", outcome.best_move);
    }

    #[test]
    fn test_blocks_closed_four() {
        let mut board = Board::new(16, 16);
        for (side, x, y) in [
            (Side::Human, 5, 5),
            (Side::Engine, 4, 5),
            (Side::Human, 6, 5),
            (Side::Engine, 12, 2),
            (Side::Human, 7, 5),
            (Side::Engine, 2, 12),
            (Side::Human, 8, 5),
        ] {
            board.place(side, Cell::new(x, y)).unwrap();
        }
        let outcome = searcher(2).search(&mut board, Side::Engine).unwrap();
        assert_eq!(outcome.best_move, Cell::new(9, 5));
    }

    #[test]
    #[should_panic(expected = "invariant violation")]
    fn test_placement_on_occupied_cell_panics() {
        let mut board = Board::new(16, 16);
        board.place(Side::Human, Cell::new(1, 1)).unwrap();
        let _placed = Placement::new(&mut board, Side::Engine, Cell::new(1, 1));
    }

    #[test]
    fn test_placement_guard_undoes() {
        let mut board = Board::new(16, 16);
        board.place(Side::Human, Cell::new(1, 1)).unwrap();
        let before = board.clone();
        {
            let mut placed = Placement::new(&mut board, Side::Engine, Cell::new(2, 2));
            assert_eq!(placed.owner(Cell::new(2, 2)), Some(Side::Engine));
            let _nested = Placement::new(&mut placed, Side::Human, Cell::new(3, 3));
        }
        assert_eq!(board, before);
    }
}
