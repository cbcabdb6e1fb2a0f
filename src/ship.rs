//! Ship definitions: placement descriptor plus damage counter.

use core::fmt;

use crate::bitboard::BitBoard;
use crate::common::GameError;
use crate::config::BOARD_SIZE;

type BB = BitBoard<u128, { BOARD_SIZE as usize }>;

/// Shortest ship the engine accepts.
pub const MIN_SHIP_LENGTH: usize = 2;
/// Longest ship the engine accepts.
pub const MAX_SHIP_LENGTH: usize = 5;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Cell `offset` steps from (`row`, `col`) along this orientation.
    #[inline]
    pub fn step(self, row: usize, col: usize, offset: usize) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (row, col + offset),
            Orientation::Vertical => (row + offset, col),
        }
    }

    pub fn is_horizontal(self) -> bool {
        self == Orientation::Horizontal
    }
}

/// Type of ship: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipType {
    name: &'static str,
    length: usize,
}

impl ShipType {
    /// Create a new ship type.
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    /// Ship's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Ship's length.
    pub fn length(&self) -> usize {
        self.length
    }
}

/// A ship anchored on the board with a damage counter.
///
/// The ship occupies `length` contiguous cells from its anchor along its
/// orientation. Damage only grows and never exceeds `length`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    length: usize,
    row: usize,
    col: usize,
    orientation: Orientation,
    damage: usize,
}

impl Ship {
    /// Describe a ship of `length` anchored at (`row`, `col`).
    ///
    /// Fails with `OutOfBounds` naming the first off-board cell when the
    /// ship does not fit on the board.
    pub fn new(
        length: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<Self, GameError> {
        if !(MIN_SHIP_LENGTH..=MAX_SHIP_LENGTH).contains(&length) {
            return Err(GameError::InvalidState("ship length must be between 2 and 5"));
        }
        for i in 0..length {
            let (r, c) = orientation.step(row, col, i);
            if !BB::in_bounds(r, c) {
                return Err(GameError::OutOfBounds { row: r, col: c });
            }
        }
        Ok(Ship {
            length,
            row,
            col,
            orientation,
            damage: 0,
        })
    }

    /// Same ship with a restored damage count.
    pub fn with_damage(mut self, damage: usize) -> Result<Self, GameError> {
        if damage > self.length {
            return Err(GameError::InvalidState("ship damage exceeds its length"));
        }
        self.damage = damage;
        Ok(self)
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Anchor cell (row, col).
    pub fn origin(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn damage(&self) -> usize {
        self.damage
    }

    /// Check if the ship is sunk.
    pub fn is_sunk(&self) -> bool {
        self.damage >= self.length
    }

    /// Cells covered by the ship, anchor first.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.length).map(move |i| self.orientation.step(self.row, self.col, i))
    }

    /// True if the ship covers (`row`, `col`).
    pub fn contains(&self, row: usize, col: usize) -> bool {
        match self.orientation {
            Orientation::Horizontal => {
                row == self.row && col >= self.col && col < self.col + self.length
            }
            Orientation::Vertical => {
                col == self.col && row >= self.row && row < self.row + self.length
            }
        }
    }

    /// Occupancy mask of the ship on the board.
    pub fn mask(&self) -> BB {
        let mut mask = BB::new();
        for (r, c) in self.cells() {
            // in bounds by construction
            let _ = mask.set(r, c);
        }
        mask
    }

    /// Record one confirmed hit. Returns `true` when this hit sank the ship.
    ///
    /// Hits on an already sunk ship leave the damage unchanged.
    pub fn register_hit(&mut self) -> bool {
        if self.is_sunk() {
            return false;
        }
        self.damage += 1;
        self.is_sunk()
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ length: {}, origin: ({}, {}), orientation: {:?}, damage: {} }}",
            self.length, self.row, self.col, self.orientation, self.damage,
        )
    }
}
