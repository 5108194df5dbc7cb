//! Candidate move generation and ordering.
//!
//! Only empty cells touching at least one stone are worth searching. Cells
//! around the most recent move go first: they are the most likely to cause
//! alpha-beta cutoffs. Ordering never changes which move the search picks as
//! best, only how fast it gets there.

use crate::board::{Board, Cell};
use crate::constants::NEIGHBORS;

/// Empty cells with an occupied neighbor, the last move's surroundings first.
///
/// The remaining cells keep the board's x-major scan order. Returns an empty
/// list on an empty or full board.
pub fn candidates(board: &Board) -> Vec<Cell> {
    let contested = board
        .cells()
        .filter(|&c| !board.occupied(c) && board.has_neighbor(c));

    let Some(anchor) = board.last_move() else {
        return contested.collect();
    };

    let mut moves: Vec<Cell> = NEIGHBORS
        .iter()
        .filter_map(|&(dx, dy)| board.step(anchor, dx, dy, 1))
        .filter(|&c| !board.occupied(c))
        .collect();
    moves.extend(contested.filter(|c| !c.is_adjacent(anchor)));
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Side;

    #[test]
    fn test_empty_board_has_no_candidates() {
        let board = Board::new(16, 16);
        assert!(candidates(&board).is_empty());
    }

    #[test]
    fn test_single_stone() {
        let mut board = Board::new(16, 16);
        board.place(Side::Human, Cell::new(7, 7)).unwrap();

        let moves = candidates(&board);
        assert_eq!(moves.len(), 8);
        assert_eq!(moves[0], Cell::new(6, 6));
        assert_eq!(moves[7], Cell::new(8, 8));
        assert!(moves.iter().all(|c| c.is_adjacent(Cell::new(7, 7))));
    }

    #[test]
    fn test_corner_stone() {
        let mut board = Board::new(16, 16);
        board.place(Side::Human, Cell::new(0, 0)).unwrap();
        let moves = candidates(&board);
        assert_eq!(moves, vec![Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)]);
    }

    #[test]
    fn test_last_move_neighbors_first() {
        let mut board = Board::new(16, 16);
        board.place(Side::Human, Cell::new(2, 2)).unwrap();
        board.place(Side::Engine, Cell::new(10, 10)).unwrap();

        let moves = candidates(&board);
        assert_eq!(moves.len(), 16);
        assert!(moves[..8].iter().all(|c| c.is_adjacent(Cell::new(10, 10))));
        assert!(moves[8..].iter().all(|c| c.is_adjacent(Cell::new(2, 2))));
    }

    #[test]
    fn test_no_duplicates_and_all_empty() {
        let mut board = Board::new(16, 16);
        for (side, x, y) in [
            (Side::Human, 7, 7),
            (Side::Engine, 8, 8),
            (Side::Human, 7, 8),
            (Side::Engine, 6, 6),
        ] {
            board.place(side, Cell::new(x, y)).unwrap();
        }

        let moves = candidates(&board);
        let mut sorted = moves.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), moves.len());
        assert!(moves.iter().all(|&c| !board.occupied(c) && board.has_neighbor(c)));
    }
}
