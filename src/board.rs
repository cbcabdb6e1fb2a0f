//! Game board: occupancy grid plus shot-result grid, with placement and
//! shot resolution.

use core::fmt;

use log::{debug, warn};
use rand::Rng;

use crate::bitboard::BitBoard;
use crate::common::{GameError, ShotOutcome};
use crate::config::{PlacementPolicy, BOARD_SIZE, MAX_PLACEMENT_ATTEMPTS};
use crate::ship::{Orientation, Ship};
use crate::view::{CellState, CellView, OpponentView, OwnView};

type BB = BitBoard<u128, { BOARD_SIZE as usize }>;

const N: usize = BOARD_SIZE as usize;

/// Serializable board state for saving games.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardState {
    pub occupancy: BB,
    pub hits: BB,
    pub misses: BB,
    pub sunk: BB,
}

/// A player's 10×10 board.
///
/// Occupancy marks and shot marks are both write-once per cell. Ships are
/// not stored here: the owning player passes its fleet in and ships are
/// matched to cells by containment.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    occupancy: BB,
    /// Struck cells of ships still afloat.
    hits: BB,
    misses: BB,
    /// Cells of sunk ships. Supersedes `hits`.
    sunk: BB,
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear both grids.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Occupancy mask of all placed ships.
    pub fn occupancy(&self) -> BB {
        self.occupancy
    }

    /// True if (`row`, `col`) has already been fired upon.
    pub fn is_shot(&self, row: usize, col: usize) -> bool {
        self.shots().contains(row, col)
    }

    /// Every cell fired upon so far.
    pub fn shots(&self) -> BB {
        self.hits | self.misses | self.sunk
    }

    /// Build the ship a placement would produce, or the reason it cannot be
    /// placed under `policy`.
    pub fn check_placement(
        &self,
        policy: PlacementPolicy,
        row: usize,
        col: usize,
        length: usize,
        orientation: Orientation,
    ) -> Result<Ship, GameError> {
        let ship = Ship::new(length, row, col, orientation)?;
        let blocked = match policy {
            PlacementPolicy::AllowTouching => self.occupancy,
            PlacementPolicy::NoTouching => self.occupancy.halo(),
        };
        if let Some((r, c)) = ship.cells().find(|&(r, c)| blocked.contains(r, c)) {
            return Err(GameError::CellOccupied { row: r, col: c });
        }
        Ok(ship)
    }

    /// True iff a ship of `length` fits at (`row`, `col`) without leaving the
    /// board or overlapping another ship.
    pub fn can_place(&self, row: usize, col: usize, length: usize, orientation: Orientation) -> bool {
        self.can_place_with(PlacementPolicy::AllowTouching, row, col, length, orientation)
    }

    /// Like [`Board::can_place`] but under an explicit adjacency policy.
    pub fn can_place_with(
        &self,
        policy: PlacementPolicy,
        row: usize,
        col: usize,
        length: usize,
        orientation: Orientation,
    ) -> bool {
        self.check_placement(policy, row, col, length, orientation).is_ok()
    }

    /// Mark a ship on the occupancy grid using the overlap-only rule.
    ///
    /// Nothing is written unless the whole ship fits.
    pub fn place(
        &mut self,
        row: usize,
        col: usize,
        length: usize,
        orientation: Orientation,
    ) -> Result<Ship, GameError> {
        self.place_with(PlacementPolicy::AllowTouching, row, col, length, orientation)
    }

    /// Mark a ship on the occupancy grid under `policy`.
    pub fn place_with(
        &mut self,
        policy: PlacementPolicy,
        row: usize,
        col: usize,
        length: usize,
        orientation: Orientation,
    ) -> Result<Ship, GameError> {
        let ship = self.check_placement(policy, row, col, length, orientation)?;
        self.occupancy |= ship.mask();
        Ok(ship)
    }

    /// Every valid (row, col, orientation) for a ship of `length`, in
    /// row-major order with horizontal before vertical.
    pub fn valid_placements(
        &self,
        policy: PlacementPolicy,
        length: usize,
    ) -> impl Iterator<Item = (usize, usize, Orientation)> + '_ {
        (0..N * N).flat_map(move |idx| {
            [Orientation::Horizontal, Orientation::Vertical]
                .into_iter()
                .map(move |o| (idx / N, idx % N, o))
        })
        .filter(move |&(r, c, o)| self.can_place_with(policy, r, c, length, o))
    }

    /// Returns a random valid (row, col, Orientation) for a ship of `length`.
    ///
    /// Samples up to `MAX_PLACEMENT_ATTEMPTS` random positions, then falls
    /// back to the first position of a full scan so the search always ends.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        length: usize,
        policy: PlacementPolicy,
    ) -> Result<(usize, usize, Orientation), GameError> {
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let orient = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let r = rng.random_range(0..N);
            let c = rng.random_range(0..N);
            if self.can_place_with(policy, r, c, length, orient) {
                return Ok((r, c, orient));
            }
        }
        warn!(
            "random placement of length {} exhausted {} attempts, scanning",
            length, MAX_PLACEMENT_ATTEMPTS
        );
        self.valid_placements(policy, length)
            .next()
            .ok_or(GameError::InvalidState("no room left for ship"))
    }

    /// Fire at (`row`, `col`), updating the shot grid and the damage of the
    /// ship in `fleet` that covers the cell.
    ///
    /// When the hit sinks the ship every cell of it is marked sunk.
    pub fn resolve_shot(
        &mut self,
        row: usize,
        col: usize,
        fleet: &mut [Ship],
    ) -> Result<ShotOutcome, GameError> {
        if !BB::in_bounds(row, col) {
            return Err(GameError::OutOfBounds { row, col });
        }
        if self.is_shot(row, col) {
            return Err(GameError::AlreadyShot { row, col });
        }
        if !self.occupancy.contains(row, col) {
            self.misses.set(row, col)?;
            debug!("shot ({}, {}) missed", row, col);
            return Ok(ShotOutcome::Miss);
        }
        let ship = fleet
            .iter_mut()
            .find(|s| s.contains(row, col))
            .ok_or(GameError::InvalidState("occupied cell is not covered by any ship"))?;
        self.hits.set(row, col)?;
        if ship.register_hit() {
            let mask = ship.mask();
            self.sunk |= mask;
            self.hits &= !mask;
            debug!("shot ({}, {}) sank {:?}", row, col, ship);
            Ok(ShotOutcome::Sunk)
        } else {
            debug!("shot ({}, {}) hit", row, col);
            Ok(ShotOutcome::Hit)
        }
    }

    /// Shot result at a cell, as the opponent sees it.
    pub fn cell_view(&self, row: usize, col: usize) -> Option<CellView> {
        if !BB::in_bounds(row, col) {
            return None;
        }
        Some(if self.sunk.contains(row, col) {
            CellView::Sunk
        } else if self.hits.contains(row, col) {
            CellView::Hit
        } else if self.misses.contains(row, col) {
            CellView::Miss
        } else {
            CellView::Unknown
        })
    }

    /// The shot-result grid only. Safe to hand to the opponent.
    pub fn opponent_view(&self) -> OpponentView {
        let mut cells = [[CellView::Unknown; N]; N];
        for (r, row) in cells.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = self.cell_view(r, c).unwrap_or_default();
            }
        }
        OpponentView::from_cells(cells)
    }

    /// Ships and shot results together; for the board's owner only.
    pub fn own_view(&self) -> OwnView {
        let mut cells = [[CellState::Empty; N]; N];
        for (r, row) in cells.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = match self.cell_view(r, c).unwrap_or_default() {
                    CellView::Sunk => CellState::Sunk,
                    CellView::Hit => CellState::Hit,
                    CellView::Miss => CellState::Miss,
                    CellView::Unknown if self.occupancy.contains(r, c) => CellState::Ship,
                    CellView::Unknown => CellState::Empty,
                };
            }
        }
        OwnView::from_cells(cells)
    }

    /// Returns `true` when every ship in `fleet` is sunk.
    pub fn all_sunk(&self, fleet: &[Ship]) -> bool {
        fleet.iter().all(Ship::is_sunk)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  occupancy: {:?},\n  hits: {:?},\n  misses: {:?},\n  sunk: {:?}\n}}",
            self.occupancy, self.hits, self.misses, self.sunk
        )
    }
}

impl From<&Board> for BoardState {
    fn from(b: &Board) -> Self {
        BoardState {
            occupancy: b.occupancy,
            hits: b.hits,
            misses: b.misses,
            sunk: b.sunk,
        }
    }
}

impl From<BoardState> for Board {
    fn from(state: BoardState) -> Self {
        Board {
            occupancy: state.occupancy,
            hits: state.hits,
            misses: state.misses,
            sunk: state.sunk,
        }
    }
}
