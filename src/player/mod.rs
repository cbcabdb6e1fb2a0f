//! Players: a board, a fleet and a controller deciding where to shoot.
//!
//! The controller is a tagged variant over the two kinds of player:
//! - HumanPlayer: shots are supplied from outside (UI, terminal)
//! - AutomatedPlayer: shots come from the targeting heuristic

use alloc::vec::Vec;

use log::warn;
use rand::rngs::SmallRng;

use crate::board::Board;
use crate::common::{GameError, ShotOutcome};
use crate::config::{FleetLayout, PlacementPolicy, MAX_FLEET_RESTARTS};
use crate::ship::Ship;
use crate::view::{OpponentView, OwnView};

pub mod ai;
pub mod human;

pub use ai::AutomatedPlayer;
pub use human::HumanPlayer;

/// Capabilities every kind of player provides.
pub trait Commander {
    /// Place a whole fleet onto an empty `board`, recording each ship in
    /// `fleet`.
    fn place_fleet(
        &mut self,
        rng: &mut SmallRng,
        board: &mut Board,
        fleet: &mut Vec<Ship>,
        layout: FleetLayout,
        policy: PlacementPolicy,
    ) -> Result<(), GameError> {
        place_fleet_randomly(rng, board, fleet, layout, policy)
    }

    /// Choose the next target given the opponent's shot-result grid.
    /// `None` means no move is available right now.
    fn choose_shot(&mut self, rng: &mut SmallRng, view: &OpponentView) -> Option<(usize, usize)>;
}

/// Reset `board` and `fleet`, then place every ship of `layout` at random.
///
/// If a ship finds no room (possible under `NoTouching`) the whole fleet is
/// laid out again, up to `MAX_FLEET_RESTARTS` times.
pub fn place_fleet_randomly(
    rng: &mut SmallRng,
    board: &mut Board,
    fleet: &mut Vec<Ship>,
    layout: FleetLayout,
    policy: PlacementPolicy,
) -> Result<(), GameError> {
    let mut last_err = GameError::InvalidState("fleet placement never attempted");
    for attempt in 0..=MAX_FLEET_RESTARTS {
        board.reset();
        fleet.clear();
        let placed = layout.lengths().try_for_each(|len| {
            let (r, c, o) = board.random_placement(rng, len, policy)?;
            fleet.push(board.place_with(policy, r, c, len, o)?);
            Ok(())
        });
        match placed {
            Ok(()) => return Ok(()),
            Err(e) => {
                warn!("fleet placement attempt {} failed: {}", attempt + 1, e);
                last_err = e;
            }
        }
    }
    board.reset();
    fleet.clear();
    Err(last_err)
}

/// Which kind of controller drives a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerKind {
    Human,
    Automated,
}

/// Tagged dispatch over the player kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Controller {
    Human(HumanPlayer),
    Automated(AutomatedPlayer),
}

impl Controller {
    pub fn kind(&self) -> PlayerKind {
        match self {
            Controller::Human(_) => PlayerKind::Human,
            Controller::Automated(_) => PlayerKind::Automated,
        }
    }
}

impl From<PlayerKind> for Controller {
    fn from(kind: PlayerKind) -> Self {
        match kind {
            PlayerKind::Human => Controller::Human(HumanPlayer::new()),
            PlayerKind::Automated => Controller::Automated(AutomatedPlayer::new()),
        }
    }
}

impl Commander for Controller {
    fn place_fleet(
        &mut self,
        rng: &mut SmallRng,
        board: &mut Board,
        fleet: &mut Vec<Ship>,
        layout: FleetLayout,
        policy: PlacementPolicy,
    ) -> Result<(), GameError> {
        match self {
            Controller::Human(p) => p.place_fleet(rng, board, fleet, layout, policy),
            Controller::Automated(p) => p.place_fleet(rng, board, fleet, layout, policy),
        }
    }

    fn choose_shot(&mut self, rng: &mut SmallRng, view: &OpponentView) -> Option<(usize, usize)> {
        match self {
            Controller::Human(p) => p.choose_shot(rng, view),
            Controller::Automated(p) => p.choose_shot(rng, view),
        }
    }
}

/// One side of the game: its board, its fleet and its controller.
///
/// Every ship in the fleet is marked on the board and every occupied cell
/// belongs to exactly one ship of the fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    controller: Controller,
    board: Board,
    fleet: Vec<Ship>,
}

impl Player {
    pub fn new(controller: Controller) -> Self {
        Self {
            controller,
            board: Board::new(),
            fleet: Vec::new(),
        }
    }

    pub fn human() -> Self {
        Self::new(Controller::Human(HumanPlayer::new()))
    }

    pub fn automated() -> Self {
        Self::new(Controller::Automated(AutomatedPlayer::new()))
    }

    /// Rebuild a player from parts already known to be consistent.
    pub(crate) fn from_parts(controller: Controller, board: Board, fleet: Vec<Ship>) -> Self {
        Self {
            controller,
            board,
            fleet,
        }
    }

    pub fn kind(&self) -> PlayerKind {
        self.controller.kind()
    }

    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    /// The player's own board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn fleet(&self) -> &[Ship] {
        &self.fleet
    }

    /// Shot-result grid of this player's board, for the opponent.
    pub fn opponent_view(&self) -> OpponentView {
        self.board.opponent_view()
    }

    /// Ships and shot results, for this player only.
    pub fn own_view(&self) -> OwnView {
        self.board.own_view()
    }

    /// Place `ship` on the board with the overlap-only rule and add it to
    /// the fleet. Nothing changes on error.
    pub fn register_ship(&mut self, ship: Ship) -> Result<(), GameError> {
        let (row, col) = ship.origin();
        self.board
            .place(row, col, ship.length(), ship.orientation())?;
        self.fleet.push(ship);
        Ok(())
    }

    /// Replace the fleet with a freshly randomised one.
    pub fn place_fleet_automatically(
        &mut self,
        rng: &mut SmallRng,
        layout: FleetLayout,
        policy: PlacementPolicy,
    ) -> Result<(), GameError> {
        self.controller
            .place_fleet(rng, &mut self.board, &mut self.fleet, layout, policy)
    }

    /// Ask the controller for its next target.
    pub fn choose_shot(&mut self, rng: &mut SmallRng, view: &OpponentView) -> Option<(usize, usize)> {
        self.controller.choose_shot(rng, view)
    }

    /// Resolve an incoming shot against this player's board and fleet.
    pub fn receive_shot(&mut self, row: usize, col: usize) -> Result<ShotOutcome, GameError> {
        self.board.resolve_shot(row, col, &mut self.fleet)
    }

    /// True once every ship of a non-empty fleet is sunk.
    pub fn is_defeated(&self) -> bool {
        !self.fleet.is_empty() && self.board.all_sunk(&self.fleet)
    }

    /// Ships still afloat.
    pub fn ships_remaining(&self) -> usize {
        self.fleet.iter().filter(|s| !s.is_sunk()).count()
    }

    /// Lengths from `layout` that have no ship in the fleet yet.
    pub fn unplaced_lengths(&self, layout: FleetLayout) -> Vec<usize> {
        let mut remaining: Vec<usize> = layout.lengths().collect();
        for ship in &self.fleet {
            if let Some(i) = remaining.iter().position(|&l| l == ship.length()) {
                remaining.remove(i);
            }
        }
        remaining
    }

    /// True when the fleet matches `layout` exactly.
    pub fn fleet_complete(&self, layout: FleetLayout) -> bool {
        self.fleet.len() == layout.len() && self.unplaced_lengths(layout).is_empty()
    }

    /// Remove every ship and clear the board.
    pub fn reset(&mut self) {
        self.board.reset();
        self.fleet.clear();
        if let Controller::Human(h) = &mut self.controller {
            h.clear_next_shot();
        }
    }
}
