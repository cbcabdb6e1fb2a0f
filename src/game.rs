//! Turn controller: setup, alternating shots and victory detection.

use alloc::vec::Vec;

use log::{debug, info};
use rand::rngs::SmallRng;

use crate::bitboard::BitBoard;
use crate::board::{Board, BoardState};
use crate::common::{GameError, ShotOutcome};
use crate::config::{GameConfig, BOARD_SIZE};
use crate::player::{Controller, Player, PlayerKind};
use crate::ship::{Orientation, Ship};
use crate::view::{CellView, OpponentView, OwnView};

/// Seat of a player in the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    /// The other seat.
    pub fn opponent(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// 0 for `One`, 1 for `Two`.
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    /// 1-based number, as shown to users and written to save files.
    pub fn number(self) -> usize {
        self.index() + 1
    }
}

/// Where the session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Fleets are being placed; no shots accepted.
    Setup,
    /// The given player is about to shoot.
    AwaitingShot(PlayerId),
    /// A fleet has been destroyed. Terminal.
    GameOver { winner: PlayerId },
}

/// What a call to [`Game::take_turn`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The active player has no shot ready yet; nothing changed.
    NoMove,
    /// Shot resolved and the turn passed to the other player.
    TurnComplete {
        shooter: PlayerId,
        target: (usize, usize),
        outcome: ShotOutcome,
    },
    /// Shot resolved and sank the defender's last ship.
    GameOver {
        winner: PlayerId,
        target: (usize, usize),
        outcome: ShotOutcome,
    },
}

/// Serializable snapshot of one player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub kind: PlayerKind,
    pub fleet: Vec<Ship>,
    pub board: BoardState,
}

/// Serializable overall game state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub config: GameConfig,
    pub phase: Phase,
    pub players: [PlayerState; 2],
}

/// A two-player session.
///
/// Exactly one shot is resolved per [`Game::take_turn`]; roles swap after
/// every resolved shot until one fleet is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    config: GameConfig,
    phase: Phase,
    players: [Player; 2],
}

impl Game {
    /// New session in the setup phase with empty boards.
    pub fn new(player1: Controller, player2: Controller, config: GameConfig) -> Self {
        Self {
            config,
            phase: Phase::Setup,
            players: [Player::new(player1), Player::new(player2)],
        }
    }

    /// Human (player one) against the computer (player two).
    pub fn human_vs_computer(config: GameConfig) -> Self {
        Self::new(PlayerKind::Human.into(), PlayerKind::Automated.into(), config)
    }

    /// Computer against computer.
    pub fn computer_vs_computer(config: GameConfig) -> Self {
        Self::new(PlayerKind::Automated.into(), PlayerKind::Automated.into(), config)
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Player about to shoot, while the game is running.
    pub fn active(&self) -> Option<PlayerId> {
        match self.phase {
            Phase::AwaitingShot(id) => Some(id),
            _ => None,
        }
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.phase {
            Phase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver { .. })
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    /// `id`'s board as its opponent sees it.
    pub fn opponent_view(&self, id: PlayerId) -> OpponentView {
        self.player(id).opponent_view()
    }

    /// `id`'s board as its owner sees it.
    pub fn own_view(&self, id: PlayerId) -> OwnView {
        self.player(id).own_view()
    }

    /// Ships of `id` still afloat.
    pub fn ships_remaining(&self, id: PlayerId) -> usize {
        self.player(id).ships_remaining()
    }

    /// Shots `id` has fired at its opponent.
    pub fn shots_fired(&self, id: PlayerId) -> usize {
        self.player(id.opponent()).board().shots().count_ones()
    }

    fn require_setup(&self) -> Result<(), GameError> {
        match self.phase {
            Phase::Setup => Ok(()),
            _ => Err(GameError::InvalidState("fleet placement is locked once the game starts")),
        }
    }

    /// Manually place one ship of `length` for `id`.
    ///
    /// Uses the overlap-only rule. `length` must match a ship of the fleet
    /// layout that `id` has not placed yet.
    pub fn place_ship(
        &mut self,
        id: PlayerId,
        length: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), GameError> {
        self.require_setup()?;
        let layout = self.config.fleet;
        let player = self.player_mut(id);
        if !player.unplaced_lengths(layout).contains(&length) {
            return Err(GameError::InvalidState("no unplaced ship of that length"));
        }
        let ship = Ship::new(length, row, col, orientation)?;
        player.register_ship(ship)
    }

    /// Lay out `id`'s whole fleet at random, replacing any ships placed so
    /// far. Uses the configured automatic placement policy.
    pub fn auto_place(&mut self, id: PlayerId, rng: &mut SmallRng) -> Result<(), GameError> {
        self.require_setup()?;
        let GameConfig {
            fleet,
            auto_placement,
        } = self.config;
        self.player_mut(id)
            .place_fleet_automatically(rng, fleet, auto_placement)
    }

    /// Remove all of `id`'s ships.
    pub fn clear_fleet(&mut self, id: PlayerId) -> Result<(), GameError> {
        self.require_setup()?;
        self.player_mut(id).reset();
        Ok(())
    }

    /// Lock setup and hand the first shot to player one.
    pub fn start(&mut self) -> Result<(), GameError> {
        self.require_setup()?;
        let layout = self.config.fleet;
        if !self.players.iter().all(|p| p.fleet_complete(layout)) {
            return Err(GameError::InvalidState("both fleets must be fully placed"));
        }
        self.phase = Phase::AwaitingShot(PlayerId::One);
        info!("game started with {:?}", self.config);
        Ok(())
    }

    /// Queue a shot for the active human player.
    pub fn submit_shot(&mut self, row: usize, col: usize) -> Result<(), GameError> {
        let active = self.awaiting()?;
        let view = self.opponent_view(active.opponent());
        match self.player_mut(active).controller_mut() {
            Controller::Human(h) => h.set_next_shot(row, col, &view),
            Controller::Automated(_) => {
                Err(GameError::InvalidState("active player is not driven by input"))
            }
        }
    }

    fn awaiting(&self) -> Result<PlayerId, GameError> {
        match self.phase {
            Phase::AwaitingShot(id) => Ok(id),
            Phase::Setup => Err(GameError::InvalidState("game has not started")),
            Phase::GameOver { .. } => Err(GameError::InvalidState("game is over")),
        }
    }

    /// Ask the active player for a shot and resolve it.
    ///
    /// Returns `NoMove` without changing anything when a human has not
    /// supplied a coordinate. Invalid targets are rejected before any grid
    /// is touched.
    pub fn take_turn(&mut self, rng: &mut SmallRng) -> Result<TurnOutcome, GameError> {
        let shooter = self.awaiting()?;
        let defender = shooter.opponent();
        let view = self.opponent_view(defender);
        let Some((row, col)) = self.player_mut(shooter).choose_shot(rng, &view) else {
            return Ok(TurnOutcome::NoMove);
        };
        match view.get(row, col) {
            None => return Err(GameError::OutOfBounds { row, col }),
            Some(v) if v != CellView::Unknown => {
                return Err(GameError::AlreadyShot { row, col })
            }
            Some(_) => {}
        }

        let outcome = self.player_mut(defender).receive_shot(row, col)?;
        debug!(
            "player {} fired at ({}, {}): {:?}",
            shooter.number(),
            row,
            col,
            outcome
        );

        if self.player(defender).is_defeated() {
            self.phase = Phase::GameOver { winner: shooter };
            info!("player {} wins", shooter.number());
            return Ok(TurnOutcome::GameOver {
                winner: shooter,
                target: (row, col),
                outcome,
            });
        }
        self.phase = Phase::AwaitingShot(defender);
        Ok(TurnOutcome::TurnComplete {
            shooter,
            target: (row, col),
            outcome,
        })
    }

    /// Back to setup with empty boards; controllers are kept.
    pub fn reset(&mut self) {
        for p in self.players.iter_mut() {
            p.reset();
        }
        self.phase = Phase::Setup;
    }

    /// Generate a serializable snapshot of the current state.
    pub fn state(&self) -> GameState {
        let snapshot = |p: &Player| PlayerState {
            kind: p.kind(),
            fleet: p.fleet().to_vec(),
            board: BoardState::from(p.board()),
        };
        GameState {
            config: self.config,
            phase: self.phase,
            players: [snapshot(&self.players[0]), snapshot(&self.players[1])],
        }
    }

    /// Restore a session from a snapshot.
    ///
    /// The snapshot is checked for consistency so that the restored game
    /// behaves exactly like one played up to the same point.
    pub fn from_state(state: GameState) -> Result<Self, GameError> {
        let GameState {
            config,
            phase,
            players,
        } = state;
        let [p1, p2] = players;
        let players = [restore_player(p1, config)?, restore_player(p2, config)?];

        let expected = match (players[0].is_defeated(), players[1].is_defeated()) {
            (true, true) => return Err(GameError::InvalidState("both fleets are sunk")),
            (true, false) => Some(PlayerId::Two),
            (false, true) => Some(PlayerId::One),
            (false, false) => None,
        };
        if phase != Phase::Setup && !players.iter().all(|p| p.fleet_complete(config.fleet)) {
            return Err(GameError::InvalidState("fleet does not match the layout"));
        }
        match (phase, expected) {
            (Phase::GameOver { winner }, Some(w)) if winner == w => {}
            (Phase::AwaitingShot(_), None) => {}
            (Phase::Setup, None) => {
                if players.iter().any(|p| !p.board().shots().is_empty()) {
                    return Err(GameError::InvalidState("shots recorded during setup"));
                }
            }
            _ => return Err(GameError::InvalidState("phase does not match the fleets")),
        }
        Ok(Self {
            config,
            phase,
            players,
        })
    }
}

const GRID: usize = BOARD_SIZE as usize;

/// Rebuild a player by re-placing its ships, then check the recorded
/// grids agree with the fleet.
fn restore_player(state: PlayerState, config: GameConfig) -> Result<Player, GameError> {
    let mut board = Board::new();
    for ship in &state.fleet {
        let (row, col) = ship.origin();
        board.place(row, col, ship.length(), ship.orientation())?;
    }
    let recorded = state.board;
    let grids = [recorded.occupancy, recorded.hits, recorded.misses, recorded.sunk];
    if grids.iter().any(|&g| (g & !BitBoard::<u128, GRID>::new()) != g) {
        return Err(GameError::InvalidState("grid has marks outside the board"));
    }
    if recorded.occupancy != board.occupancy() {
        return Err(GameError::InvalidState("occupancy grid does not match the fleet"));
    }
    let mut unplaced: Vec<usize> = config.fleet.lengths().collect();
    for ship in &state.fleet {
        match unplaced.iter().position(|&l| l == ship.length()) {
            Some(i) => {
                unplaced.remove(i);
            }
            None => return Err(GameError::InvalidState("ship length is not part of the fleet")),
        }
    }

    let struck = recorded.hits | recorded.sunk;
    if !(struck & !recorded.occupancy).is_empty() {
        return Err(GameError::InvalidState("hit recorded on open water"));
    }
    if !(recorded.misses & recorded.occupancy).is_empty()
        || !(recorded.hits & recorded.sunk).is_empty()
    {
        return Err(GameError::InvalidState("conflicting shot marks"));
    }
    for ship in &state.fleet {
        let mask = ship.mask();
        if (struck & mask).count_ones() != ship.damage() {
            return Err(GameError::InvalidState("ship damage does not match the shot grid"));
        }
        let sunk_cells = (recorded.sunk & mask).count_ones();
        let expected = if ship.is_sunk() { ship.length() } else { 0 };
        if sunk_cells != expected {
            return Err(GameError::InvalidState("sunk marks do not match ship damage"));
        }
    }
    Ok(Player::from_parts(
        state.kind.into(),
        Board::from(recorded),
        state.fleet,
    ))
}
