//! Hex board: cell ownership, adjacency, and connectivity.
//!
//! The board is a `rows x columns` rhombus stored as a flat row-major vector.
//! Adjacency is not stored; it is computed from coordinates using the six
//! offsets in [`HEX_DELTAS`].
//!
//! Player A connects column 0 to the last column, player B connects row 0 to
//! the last row. On a completely filled board exactly one of the two is
//! connected, which the rollouts in [`crate::playout`] rely on.

use std::collections::VecDeque;
use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::constants::{GLYPH_A, GLYPH_B, GLYPH_EMPTY, HEX_DELTAS, MIN_DIMENSION};
use crate::error::HexError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    /// First to move; connects column 0 to column `columns - 1`.
    A,
    /// Connects row 0 to row `rows - 1`.
    B,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// Player number as shown to users (1 or 2).
    pub fn number(self) -> u8 {
        match self {
            Player::A => 1,
            Player::B => 2,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Player::A),
            2 => Some(Player::B),
            _ => None,
        }
    }

    fn glyph(self) -> char {
        match self {
            Player::A => GLYPH_A,
            Player::B => GLYPH_B,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.number())
    }
}

/// `(row, column)`.
pub type Coord = (usize, usize);

/// Snapshot of one cell: its fixed coordinates and current owner.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub row: usize,
    pub column: usize,
    pub owner: Option<Player>,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        self.owner.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<Option<Player>>,
    winner: Option<Player>,
}

impl Board {
    /// Create an empty board. Both dimensions must be greater than one.
    pub fn new(rows: usize, columns: usize) -> Result<Self, HexError> {
        if rows < MIN_DIMENSION || columns < MIN_DIMENSION {
            return Err(HexError::InvalidDimensions { rows, columns });
        }
        let len = rows
            .checked_mul(columns)
            .ok_or(HexError::InvalidDimensions { rows, columns })?;
        Ok(Self {
            rows,
            columns,
            cells: vec![None; len],
            winner: None,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.columns + col
    }

    fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.columns
    }

    /// Owner of a cell, or `None` if it is empty or off the board.
    pub fn owner(&self, row: usize, col: usize) -> Option<Player> {
        if !self.in_bounds(row, col) {
            return None;
        }
        self.cells[self.idx(row, col)]
    }

    /// Snapshot of a cell, or `None` off the board.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.in_bounds(row, col).then(|| Cell {
            row,
            column: col,
            owner: self.cells[self.idx(row, col)],
        })
    }

    /// True iff the coordinates are on the board and the cell is empty.
    pub fn is_legal(&self, row: usize, col: usize) -> bool {
        self.in_bounds(row, col) && self.cells[self.idx(row, col)].is_none()
    }

    /// Claim a cell for `player`.
    ///
    /// The caller must have checked [`Board::is_legal`] first; applying to an
    /// occupied or off-board cell is a bug in the caller.
    pub fn apply(&mut self, row: usize, col: usize, player: Player) {
        debug_assert!(self.is_legal(row, col), "apply on illegal cell ({row}, {col})");
        let i = self.idx(row, col);
        self.cells[i] = Some(player);
    }

    /// Reset a cell to empty.
    pub fn clear(&mut self, row: usize, col: usize) {
        let i = self.idx(row, col);
        self.cells[i] = None;
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Coord> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(i, _)| (i / self.columns, i % self.columns))
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Winner recorded by the last successful [`Board::check_connected`].
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// On-board hex neighbours of a cell.
    pub fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = Coord> + '_ {
        HEX_DELTAS.iter().filter_map(move |&(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            self.in_bounds(r, c).then_some((r, c))
        })
    }

    fn on_start_edge(&self, player: Player) -> Vec<Coord> {
        match player {
            Player::A => (0..self.rows).map(|r| (r, 0)).collect(),
            Player::B => (0..self.columns).map(|c| (0, c)).collect(),
        }
    }

    fn on_target_edge(&self, player: Player, (row, col): Coord) -> bool {
        match player {
            Player::A => col == self.columns - 1,
            Player::B => row == self.rows - 1,
        }
    }

    /// Breadth-first search from the player's starting edge to its target edge.
    ///
    /// Pure query: no state survives between calls and the recorded winner is
    /// left alone.
    pub fn is_connected(&self, player: Player) -> bool {
        let mut visited = vec![false; self.cells.len()];
        let mut queue = VecDeque::new();

        for (r, c) in self.on_start_edge(player) {
            if self.owner(r, c) == Some(player) {
                visited[self.idx(r, c)] = true;
                queue.push_back((r, c));
            }
        }

        while let Some((r, c)) = queue.pop_front() {
            for (nr, nc) in self.neighbors(r, c) {
                let ni = self.idx(nr, nc);
                if visited[ni] || self.cells[ni] != Some(player) {
                    continue;
                }
                if self.on_target_edge(player, (nr, nc)) {
                    return true;
                }
                visited[ni] = true;
                queue.push_back((nr, nc));
            }
        }

        false
    }

    /// Like [`Board::is_connected`], and records `player` as the winner on success.
    pub fn check_connected(&mut self, player: Player) -> bool {
        let connected = self.is_connected(player);
        if connected {
            self.winner = Some(player);
        }
        connected
    }

    /// Textual rendering of the board (same as `Display`).
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Open a mutation scope. Every cell placed through the returned guard is
    /// cleared again when the guard is dropped.
    pub fn scoped(&mut self) -> ScopedMoves<'_> {
        ScopedMoves {
            board: self,
            placed: Vec::new(),
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            let indent = "  ".repeat(r);
            write!(f, "{indent}")?;
            for c in 0..self.columns {
                let ch = self.owner(r, c).map_or(GLYPH_EMPTY, Player::glyph);
                if c > 0 {
                    write!(f, " - ")?;
                }
                write!(f, "{ch}")?;
            }
            writeln!(f)?;

            if r + 1 < self.rows {
                write!(f, "{indent}")?;
                for c in 0..self.columns {
                    write!(f, " \\")?;
                    if c + 1 < self.columns {
                        write!(f, " /")?;
                    }
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Scoped board mutation.
///
/// Dereferences to the underlying [`Board`] so searches can recurse through
/// it. On drop, every cell placed via [`ScopedMoves::place`] is cleared in
/// reverse order, so the board is restored on every exit path.
pub struct ScopedMoves<'a> {
    board: &'a mut Board,
    placed: Vec<Coord>,
}

impl ScopedMoves<'_> {
    /// Place `player` on an empty cell for the lifetime of this scope.
    pub fn place(&mut self, (row, col): Coord, player: Player) {
        self.board.apply(row, col, player);
        self.placed.push((row, col));
    }

    /// Number of cells placed so far in this scope.
    pub fn placed(&self) -> usize {
        self.placed.len()
    }
}

impl Deref for ScopedMoves<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        &*self.board
    }
}

impl DerefMut for ScopedMoves<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        &mut *self.board
    }
}

impl Drop for ScopedMoves<'_> {
    fn drop(&mut self) {
        for &(r, c) in self.placed.iter().rev() {
            self.board.clear(r, c);
        }
    }
}
