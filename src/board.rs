//! Board state: which side owns which cell.
//!
//! Membership is a dense grid, so `occupied`/`owner` are O(1). Each side also
//! keeps its stones in placement order, and the board remembers the order of
//! all placements so the most recent move can anchor candidate ordering.

use std::fmt;

use crate::constants::{DIRECTIONS, NEIGHBORS, WIN_LENGTH};

/// The two players.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Engine,
    Human,
}

impl Side {
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::Engine => Side::Human,
            Side::Human => Side::Engine,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Engine => write!(f, "engine"),
            Side::Human => write!(f, "human"),
        }
    }
}

/// A grid point. `x` runs along a row, `y` along a column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    #[inline]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// True if `other` is one of the 8 cells surrounding this one.
    pub fn is_adjacent(self, other: Cell) -> bool {
        self != other && self.x.abs_diff(other.x) <= 1 && self.y.abs_diff(other.y) <= 1
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Reasons a board mutation is refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Cell lies outside the grid
    OutOfBounds(Cell),
    /// Cell already holds a stone
    Occupied(Cell),
    /// Cell is not owned by the side asked to give it up
    NotOwned { side: Side, cell: Cell },
}

impl std::error::Error for BoardError {}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfBounds(cell) => write!(f, "cell {cell} is off the board"),
            BoardError::Occupied(cell) => write!(f, "cell {cell} is already occupied"),
            BoardError::NotOwned { side, cell } => {
                write!(f, "cell {cell} holds no {side} stone")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Option<Side>>,
    engine: Vec<Cell>,
    human: Vec<Cell>,
    history: Vec<Cell>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
            engine: Vec::new(),
            human: Vec::new(),
            history: Vec::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn idx(&self, cell: Cell) -> usize {
        cell.y * self.width + cell.x
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// Walk `k` steps from `cell` along `(dx, dy)`. `None` once the walk leaves the grid.
    #[inline]
    pub fn step(&self, cell: Cell, dx: isize, dy: isize, k: isize) -> Option<Cell> {
        let x = cell.x.checked_add_signed(dx * k)?;
        let y = cell.y.checked_add_signed(dy * k)?;
        let target = Cell::new(x, y);
        self.contains(target).then_some(target)
    }

    /// Put a stone for `side` on an empty cell.
    pub fn place(&mut self, side: Side, cell: Cell) -> Result<(), BoardError> {
        if !self.contains(cell) {
            return Err(BoardError::OutOfBounds(cell));
        }
        let idx = self.idx(cell);
        if self.cells[idx].is_some() {
            return Err(BoardError::Occupied(cell));
        }
        self.cells[idx] = Some(side);
        self.stones_mut(side).push(cell);
        self.history.push(cell);
        Ok(())
    }

    /// Take back a stone owned by `side`.
    pub fn remove(&mut self, side: Side, cell: Cell) -> Result<(), BoardError> {
        if self.owner(cell) != Some(side) {
            return Err(BoardError::NotOwned { side, cell });
        }
        let idx = self.idx(cell);
        self.cells[idx] = None;
        // Search undoes moves in reverse order, so the stone is normally last.
        let stones = self.stones_mut(side);
        if let Some(i) = stones.iter().rposition(|&c| c == cell) {
            stones.remove(i);
        }
        if let Some(i) = self.history.iter().rposition(|&c| c == cell) {
            self.history.remove(i);
        }
        Ok(())
    }

    #[inline]
    pub fn owner(&self, cell: Cell) -> Option<Side> {
        if self.contains(cell) {
            self.cells[self.idx(cell)]
        } else {
            None
        }
    }

    #[inline]
    pub fn occupied(&self, cell: Cell) -> bool {
        self.owner(cell).is_some()
    }

    /// Stones of one side, in the order they were placed.
    #[inline]
    pub fn stones(&self, side: Side) -> &[Cell] {
        match side {
            Side::Engine => &self.engine,
            Side::Human => &self.human,
        }
    }

    fn stones_mut(&mut self, side: Side) -> &mut Vec<Cell> {
        match side {
            Side::Engine => &mut self.engine,
            Side::Human => &mut self.human,
        }
    }

    /// Most recently placed stone of either side.
    #[inline]
    pub fn last_move(&self) -> Option<Cell> {
        self.history.last().copied()
    }

    #[inline]
    pub fn stone_count(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.history.len() == self.cells.len()
    }

    /// Every cell of the grid, x-major then y.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.width).flat_map(move |x| (0..self.height).map(move |y| Cell::new(x, y)))
    }

    /// True if any of the 8 surrounding cells holds a stone.
    pub fn has_neighbor(&self, cell: Cell) -> bool {
        NEIGHBORS
            .iter()
            .filter_map(|&(dx, dy)| self.step(cell, dx, dy, 1))
            .any(|n| self.occupied(n))
    }

    /// True if `side` has five (or more) stones in a row anywhere on the board.
    ///
    /// Scans every cell and direction; there is no incremental win tracking.
    pub fn has_five(&self, side: Side) -> bool {
        self.cells().any(|start| {
            DIRECTIONS.iter().any(|&(dx, dy)| {
                (0..WIN_LENGTH as isize).all(|k| {
                    self.step(start, dx, dy, k)
                        .is_some_and(|c| self.owner(c) == Some(side))
                })
            })
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for x in 0..self.width {
            write!(f, "{x:>3}")?;
        }
        writeln!(f)?;
        for y in (0..self.height).rev() {
            write!(f, "{y:>3}")?;
            for x in 0..self.width {
                let ch = match self.owner(Cell::new(x, y)) {
                    Some(Side::Engine) => 'X',
                    Some(Side::Human) => 'O',
                    None => '.',
                };
                write!(f, "{ch:>3}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
