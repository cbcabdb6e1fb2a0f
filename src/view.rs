//! Read-only grids handed out by a board: the opponent's view and the
//! owner's view.
//!
//! Both carry the single-character alphabet used by save files:
//! `' '` empty/unknown, `'S'` ship, `'H'` hit, `'M'` miss, `'D'` sunk.

use crate::config::BOARD_SIZE;

const N: usize = BOARD_SIZE as usize;

/// What an opponent may know about a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellView {
    /// Not yet fired upon.
    #[default]
    Unknown,
    Hit,
    Miss,
    /// Part of a ship that has been sunk.
    Sunk,
}

impl CellView {
    pub fn to_char(self) -> char {
        match self {
            CellView::Unknown => ' ',
            CellView::Hit => 'H',
            CellView::Miss => 'M',
            CellView::Sunk => 'D',
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            ' ' => Some(CellView::Unknown),
            'H' => Some(CellView::Hit),
            'M' => Some(CellView::Miss),
            'D' => Some(CellView::Sunk),
            _ => None,
        }
    }
}

/// Full state of a cell as seen by the board's owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Empty,
    /// Intact ship cell.
    Ship,
    Hit,
    Miss,
    Sunk,
}

impl CellState {
    pub fn to_char(self) -> char {
        match self {
            CellState::Empty => ' ',
            CellState::Ship => 'S',
            CellState::Hit => 'H',
            CellState::Miss => 'M',
            CellState::Sunk => 'D',
        }
    }
}

/// Shot-result grid of a board. Never carries occupancy information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpponentView {
    cells: [[CellView; N]; N],
}

impl OpponentView {
    pub(crate) fn from_cells(cells: [[CellView; N]; N]) -> Self {
        Self { cells }
    }

    /// View with every cell unknown.
    pub fn unknown() -> Self {
        Self {
            cells: [[CellView::Unknown; N]; N],
        }
    }

    /// Cell at (`row`, `col`), `None` off the board.
    pub fn get(&self, row: usize, col: usize) -> Option<CellView> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// True if (`row`, `col`) is on the board and has not been shot.
    pub fn is_unknown(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Some(CellView::Unknown)
    }

    pub fn rows(&self) -> &[[CellView; N]; N] {
        &self.cells
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), CellView)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, &v)| ((r, c), v)))
    }

    /// Number of cells showing `kind`.
    pub fn count(&self, kind: CellView) -> usize {
        self.cells().filter(|&(_, v)| v == kind).count()
    }
}

/// Owner's view of a board: ships merged with shot results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnView {
    cells: [[CellState; N]; N],
}

impl OwnView {
    pub(crate) fn from_cells(cells: [[CellState; N]; N]) -> Self {
        Self { cells }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<CellState> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }
}
