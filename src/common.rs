//! Common types for the engine: errors and shot outcomes.

use core::fmt;

use crate::bitboard::BitBoardError;

/// Result of resolving a shot against a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    /// Shot landed in open water.
    Miss,
    /// Shot struck a ship that is still afloat.
    Hit,
    /// Shot struck the last intact cell of a ship.
    Sunk,
}

/// Errors returned by engine operations.
///
/// Every variant is recoverable: the caller picks another target or
/// action and tries again. Nothing is mutated when an error is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Coordinate (or part of a ship) lies outside the board.
    OutOfBounds { row: usize, col: usize },
    /// Placement overlaps a ship, or touches one under the no-touch policy.
    CellOccupied { row: usize, col: usize },
    /// The cell has already been fired upon.
    AlreadyShot { row: usize, col: usize },
    /// Operation is not allowed in the current game phase.
    InvalidState(&'static str),
}

impl From<BitBoardError> for GameError {
    fn from(err: BitBoardError) -> Self {
        match err {
            BitBoardError::IndexOutOfBounds { row, col } => GameError::OutOfBounds { row, col },
        }
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::OutOfBounds { row, col } => {
                write!(f, "Coordinate ({}, {}) is outside the board", row, col)
            }
            GameError::CellOccupied { row, col } => {
                write!(f, "Cell ({}, {}) is already occupied or too close to a ship", row, col)
            }
            GameError::AlreadyShot { row, col } => {
                write!(f, "Cell ({}, {}) has already been shot", row, col)
            }
            GameError::InvalidState(reason) => write!(f, "Invalid state: {}", reason),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}
