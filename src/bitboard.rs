//! Square grids of flags packed into one unsigned integer.
//!
//! Cell (row, col) of a `BitBoard<T, N>` is bit `row * N + col` of `T`. No
//! allocation, `Copy`, usable without `std`. Every 10×10 grid in the engine
//! (occupancy, hits, misses, sunk cells) is a `BitBoard<u128, 10>`.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};
use core::{fmt, mem};
use num_traits::{PrimInt, Unsigned};

/// Backing integer of a bitboard. Needs at least `N * N` bits.
pub trait BitStore: PrimInt + Unsigned {}

impl<T: PrimInt + Unsigned> BitStore for T {}

/// Raised when a coordinate falls outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitBoardError {
    IndexOutOfBounds { row: usize, col: usize },
}

impl fmt::Display for BitBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let BitBoardError::IndexOutOfBounds { row, col } = self;
        write!(f, "cell ({}, {}) is outside the grid", row, col)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BitBoardError {}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BitBoard<T: BitStore, const N: usize> {
    bits: T,
}

impl<T: BitStore, const N: usize> BitBoard<T, N> {
    /// All `N * N` cells set.
    fn full_mask() -> T {
        let cells = N * N;
        if cells >= mem::size_of::<T>() * 8 {
            T::max_value()
        } else {
            (T::one() << cells) - T::one()
        }
    }

    /// Single-bit mask for (row, col).
    #[inline]
    fn cell_bit(row: usize, col: usize) -> Result<T, BitBoardError> {
        if Self::in_bounds(row, col) {
            Ok(T::one() << (row * N + col))
        } else {
            Err(BitBoardError::IndexOutOfBounds { row, col })
        }
    }

    #[inline]
    pub fn new() -> Self {
        BitBoard { bits: T::zero() }
    }

    pub fn count_ones(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == T::zero()
    }

    /// True when `row`/`col` address a cell of the grid.
    #[inline]
    pub fn in_bounds(row: usize, col: usize) -> bool {
        row < N && col < N
    }

    pub fn get(&self, row: usize, col: usize) -> Result<bool, BitBoardError> {
        let bit = Self::cell_bit(row, col)?;
        Ok((self.bits & bit) != T::zero())
    }

    /// Like [`BitBoard::get`], with off-grid cells reading as clear.
    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.get(row, col).unwrap_or(false)
    }

    pub fn set(&mut self, row: usize, col: usize) -> Result<(), BitBoardError> {
        self.bits = self.bits | Self::cell_bit(row, col)?;
        Ok(())
    }

    pub fn clear(&mut self, row: usize, col: usize) -> Result<(), BitBoardError> {
        self.bits = self.bits & !Self::cell_bit(row, col)?;
        Ok(())
    }

    /// Board with exactly the listed cells set. Fails on the first
    /// off-grid cell.
    pub fn from_cells<I>(cells: I) -> Result<Self, BitBoardError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        cells.into_iter().try_fold(Self::new(), |mut acc, (r, c)| {
            acc.set(r, c)?;
            Ok(acc)
        })
    }

    /// Set cells in row-major order.
    #[inline]
    pub fn iter_set_bits(&self) -> SetBits<T, N> {
        SetBits { rest: self.bits }
    }

    /// Every set cell together with its eight neighbours.
    ///
    /// A placement that avoids the halo of the occupancy board neither
    /// overlaps nor touches (diagonally included) any placed ship.
    pub fn halo(&self) -> Self {
        let mut out = *self;
        for (r, c) in self.iter_set_bits() {
            for nr in r.saturating_sub(1)..=r + 1 {
                for nc in c.saturating_sub(1)..=c + 1 {
                    // the far edge spills off the grid; ignore those
                    let _ = out.set(nr, nc);
                }
            }
        }
        out
    }
}

impl<T: BitStore, const N: usize> Default for BitBoard<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: BitStore, const N: usize> fmt::Debug for BitBoard<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard<{}> ({} set)", N, self.count_ones())?;
        for r in 0..N {
            for c in 0..N {
                f.write_str(if self.contains(r, c) { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator returned by [`BitBoard::iter_set_bits`].
#[derive(Clone, Copy)]
pub struct SetBits<T: BitStore, const N: usize> {
    rest: T,
}

impl<T: BitStore, const N: usize> Iterator for SetBits<T, N> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest == T::zero() {
            return None;
        }
        let idx = self.rest.trailing_zeros() as usize;
        // drop the lowest set bit
        self.rest = self.rest & (self.rest - T::one());
        Some((idx / N, idx % N))
    }
}

impl<T: BitStore, const N: usize> BitAnd for BitBoard<T, N> {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        BitBoard { bits: self.bits & rhs.bits }
    }
}

impl<T: BitStore, const N: usize> BitOr for BitBoard<T, N> {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        BitBoard { bits: self.bits | rhs.bits }
    }
}

/// Complement within the grid; bits past `N * N` stay clear.
impl<T: BitStore, const N: usize> Not for BitBoard<T, N> {
    type Output = Self;
    fn not(self) -> Self {
        BitBoard { bits: !self.bits & Self::full_mask() }
    }
}

impl<T: BitStore, const N: usize> BitAndAssign for BitBoard<T, N> {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = *self & rhs;
    }
}

impl<T: BitStore, const N: usize> BitOrAssign for BitBoard<T, N> {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}
