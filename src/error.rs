//! Error types for the Hex engine.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HexError {
    #[error("invalid board dimensions {rows}x{columns}: rows and columns must both be greater than one")]
    InvalidDimensions { rows: usize, columns: usize },

    #[error("no legal moves: the board is full")]
    NoLegalMoves,

    /// Raised by the game controller only. `Board::apply` treats an occupied
    /// or off-board cell as a caller bug.
    #[error("illegal move at [{row}, {column}]")]
    IllegalMove { row: usize, column: usize },
}
