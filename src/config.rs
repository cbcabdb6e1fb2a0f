use crate::ship::ShipType;

pub const BOARD_SIZE: u8 = 10;

/// Random samples tried per ship before scanning for a valid position.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 100;

/// Whole-fleet restarts allowed when automatic placement paints itself
/// into a corner under the no-touch policy.
pub const MAX_FLEET_RESTARTS: usize = 8;

pub const STANDARD_FLEET: [ShipType; 5] = [
    ShipType::new("Carrier", 5),
    ShipType::new("Battleship", 4),
    ShipType::new("Cruiser", 3),
    ShipType::new("Submarine", 3),
    ShipType::new("Destroyer", 2),
];

pub const CLASSIC_FLEET: [ShipType; 4] = [
    ShipType::new("Carrier", 5),
    ShipType::new("Battleship", 4),
    ShipType::new("Cruiser", 3),
    ShipType::new("Destroyer", 2),
];

/// The fixed ship-size set each player must place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum FleetLayout {
    /// Five ships: 5, 4, 3, 3, 2.
    #[default]
    Standard,
    /// Four ships: 5, 4, 3, 2.
    Classic,
}

impl FleetLayout {
    /// Ship types in placement order.
    pub fn ships(self) -> &'static [ShipType] {
        match self {
            FleetLayout::Standard => &STANDARD_FLEET,
            FleetLayout::Classic => &CLASSIC_FLEET,
        }
    }

    /// Ship lengths in placement order.
    pub fn lengths(self) -> impl Iterator<Item = usize> {
        self.ships().iter().map(|s| s.length())
    }

    /// Number of ships in the fleet.
    pub fn len(self) -> usize {
        self.ships().len()
    }

    /// Total number of ship cells in the fleet.
    pub fn total_cells(self) -> usize {
        self.lengths().sum()
    }

    /// Find the layout whose lengths match `lengths` as a multiset.
    pub fn from_lengths(lengths: &[usize]) -> Option<Self> {
        [FleetLayout::Standard, FleetLayout::Classic]
            .into_iter()
            .find(|layout| {
                if layout.len() != lengths.len() {
                    return false;
                }
                let mut want = [0usize; 6];
                let mut have = [0usize; 6];
                for l in layout.lengths() {
                    want[l] += 1;
                }
                for &l in lengths {
                    match have.get_mut(l) {
                        Some(n) => *n += 1,
                        None => return false,
                    }
                }
                want == have
            })
    }
}

/// Adjacency rule used when ships are placed automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum PlacementPolicy {
    /// Ships may not overlap but may touch.
    #[default]
    AllowTouching,
    /// Ships may not overlap or touch, diagonals included.
    NoTouching,
}

/// Per-game settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    pub fleet: FleetLayout,
    pub auto_placement: PlacementPolicy,
}
