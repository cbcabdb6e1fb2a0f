#![cfg(feature = "std")]

//! Saving and loading sessions.
//!
//! The text format is line based:
//!
//! ```text
//! CURRENT_PLAYER:1
//! PLAYER_1_KIND:HUMAN
//! PLAYER_2_KIND:COMPUTER
//! PLAYER_1_START
//! SHIPS_COUNT:5
//! SHIP:5,0,0,true,2
//! ...
//! SHIPGRID_START
//! <10 rows of ' '/'S'>
//! INFOGRID_START
//! <10 rows of ' '/'H'/'M'/'D'>
//! PLAYER_1_END
//! PLAYER_2_START
//! ...
//! PLAYER_2_END
//! ```
//!
//! `KIND` lines are optional; without them player one is human and player
//! two is the computer. A binary form of the same state is available through
//! `bincode`.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use log::{info, warn};

use crate::bitboard::BitBoard;
use crate::board::BoardState;
use crate::common::GameError;
use crate::config::{FleetLayout, GameConfig, BOARD_SIZE};
use crate::game::{Game, GameState, Phase, PlayerId, PlayerState};
use crate::player::PlayerKind;
use crate::ship::{Orientation, Ship};
use crate::view::CellView;

type BB = BitBoard<u128, { BOARD_SIZE as usize }>;

const N: usize = BOARD_SIZE as usize;

/// Conventional file extension for text saves.
pub const SAVE_EXTENSION: &str = "bsg";

fn kind_label(kind: PlayerKind) -> &'static str {
    match kind {
        PlayerKind::Human => "HUMAN",
        PlayerKind::Automated => "COMPUTER",
    }
}

fn parse_kind(label: &str) -> Result<PlayerKind> {
    match label.trim().to_ascii_uppercase().as_str() {
        "HUMAN" => Ok(PlayerKind::Human),
        "COMPUTER" | "AUTOMATED" => Ok(PlayerKind::Automated),
        other => bail!("unknown player kind '{}'", other),
    }
}

/// Serialize a running or finished session to the text format.
pub fn write_session(game: &Game) -> Result<String> {
    let current = match game.phase() {
        Phase::Setup => {
            return Err(GameError::InvalidState("cannot save a game that has not started").into())
        }
        Phase::AwaitingShot(id) => id,
        // turns stop switching once the winning shot lands
        Phase::GameOver { winner } => winner,
    };
    let mut out = String::new();
    writeln!(out, "CURRENT_PLAYER:{}", current.number())?;
    for id in [PlayerId::One, PlayerId::Two] {
        writeln!(out, "PLAYER_{}_KIND:{}", id.number(), kind_label(game.player(id).kind()))?;
    }
    for id in [PlayerId::One, PlayerId::Two] {
        write_player(&mut out, game, id)?;
    }
    Ok(out)
}

fn write_player(out: &mut String, game: &Game, id: PlayerId) -> Result<()> {
    let player = game.player(id);
    writeln!(out, "PLAYER_{}_START", id.number())?;
    writeln!(out, "SHIPS_COUNT:{}", player.fleet().len())?;
    for ship in player.fleet() {
        let (row, col) = ship.origin();
        writeln!(
            out,
            "SHIP:{},{},{},{},{}",
            ship.length(),
            row,
            col,
            ship.orientation().is_horizontal(),
            ship.damage()
        )?;
    }
    writeln!(out, "SHIPGRID_START")?;
    let occupancy = player.board().occupancy();
    for r in 0..N {
        let line: String = (0..N)
            .map(|c| if occupancy.contains(r, c) { 'S' } else { ' ' })
            .collect();
        writeln!(out, "{}", line)?;
    }
    writeln!(out, "INFOGRID_START")?;
    for row in player.opponent_view().rows() {
        let line: String = row.iter().map(|v| v.to_char()).collect();
        writeln!(out, "{}", line)?;
    }
    writeln!(out, "PLAYER_{}_END", id.number())?;
    Ok(())
}

/// Line cursor that reports 1-based line numbers in errors.
struct Lines<'a> {
    inner: std::iter::Enumerate<std::str::Lines<'a>>,
    last: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.lines().enumerate(),
            last: 0,
        }
    }

    fn next_line(&mut self) -> Option<&'a str> {
        self.inner.next().map(|(i, line)| {
            self.last = i + 1;
            line
        })
    }

    fn expect_line(&mut self, what: &str) -> Result<&'a str> {
        self.next_line()
            .ok_or_else(|| anyhow!("unexpected end of file, expected {}", what))
    }

    fn expect_exact(&mut self, marker: &str) -> Result<()> {
        let line = self.expect_line(marker)?;
        if line.trim() != marker {
            bail!("line {}: expected '{}', found '{}'", self.last, marker, line);
        }
        Ok(())
    }

    fn expect_field(&mut self, prefix: &str) -> Result<&'a str> {
        let line = self.expect_line(prefix)?;
        line.trim_end()
            .strip_prefix(prefix)
            .ok_or_else(|| anyhow!("line {}: expected '{}...', found '{}'", self.last, prefix, line))
    }

    /// A grid row; short rows are padded with blanks.
    fn expect_grid_row(&mut self) -> Result<[char; N]> {
        let line = self.expect_line("grid row")?;
        let mut row = [' '; N];
        let mut chars = line.chars();
        for slot in row.iter_mut() {
            match chars.next() {
                Some(ch) => *slot = ch,
                None => break,
            }
        }
        if chars.any(|ch| ch != ' ') {
            bail!("line {}: grid row longer than {} cells", self.last, N);
        }
        Ok(row)
    }
}

fn parse_ship(fields: &str) -> Result<Ship> {
    let parts: Vec<&str> = fields.split(',').map(str::trim).collect();
    let [length, row, col, horizontal, damage] = parts.as_slice() else {
        bail!("ship record needs 5 fields, found {}", parts.len());
    };
    let orientation = match horizontal.to_ascii_lowercase().as_str() {
        "true" => Orientation::Horizontal,
        "false" => Orientation::Vertical,
        other => bail!("orientation must be true or false, found '{}'", other),
    };
    let ship = Ship::new(length.parse()?, row.parse()?, col.parse()?, orientation)?;
    Ok(ship.with_damage(damage.parse()?)?)
}

fn parse_player(lines: &mut Lines<'_>, kind: PlayerKind, number: usize) -> Result<PlayerState> {
    let count: usize = lines
        .expect_field("SHIPS_COUNT:")?
        .trim()
        .parse()
        .with_context(|| format!("line {}: bad ship count", lines.last))?;
    let largest = FleetLayout::Standard.len();
    if count > largest {
        bail!("line {}: {} ships exceed the largest fleet of {}", lines.last, count, largest);
    }
    let mut fleet = Vec::with_capacity(count);
    for _ in 0..count {
        let fields = lines.expect_field("SHIP:")?;
        let ship = parse_ship(fields).with_context(|| format!("line {}", lines.last))?;
        fleet.push(ship);
    }

    lines.expect_exact("SHIPGRID_START")?;
    let mut occupancy = BB::new();
    for r in 0..N {
        for (c, ch) in lines.expect_grid_row()?.into_iter().enumerate() {
            match ch {
                'S' => occupancy.set(r, c)?,
                ' ' => {}
                other => bail!("line {}: unexpected ship grid cell '{}'", lines.last, other),
            }
        }
    }

    lines.expect_exact("INFOGRID_START")?;
    let mut state = BoardState {
        occupancy,
        ..BoardState::default()
    };
    for r in 0..N {
        for (c, ch) in lines.expect_grid_row()?.into_iter().enumerate() {
            let cell = CellView::from_char(ch)
                .ok_or_else(|| anyhow!("line {}: unexpected info grid cell '{}'", lines.last, ch))?;
            match cell {
                CellView::Unknown => {}
                CellView::Hit => state.hits.set(r, c)?,
                CellView::Miss => state.misses.set(r, c)?,
                CellView::Sunk => state.sunk.set(r, c)?,
            }
        }
    }
    lines.expect_exact(&format!("PLAYER_{}_END", number))?;

    Ok(PlayerState {
        kind,
        fleet,
        board: state,
    })
}

/// Rebuild a session from the text format.
///
/// The result is checked to be a state reachable by normal play.
pub fn read_session(text: &str) -> Result<Game> {
    let mut lines = Lines::new(text);
    let mut current = PlayerId::One;
    let mut kinds = [PlayerKind::Human, PlayerKind::Automated];
    let mut players: [Option<PlayerState>; 2] = [None, None];

    while let Some(line) = lines.next_line() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(value) = line.strip_prefix("CURRENT_PLAYER:") {
            current = match value.trim() {
                "1" => PlayerId::One,
                "2" => PlayerId::Two,
                other => bail!("line {}: current player must be 1 or 2, found '{}'", lines.last, other),
            };
            continue;
        }
        let mut matched = false;
        for id in [PlayerId::One, PlayerId::Two] {
            let n = id.number();
            if let Some(value) = line.strip_prefix(&format!("PLAYER_{}_KIND:", n)) {
                kinds[id.index()] = parse_kind(value)?;
                matched = true;
            } else if line == format!("PLAYER_{}_START", n) {
                let state = parse_player(&mut lines, kinds[id.index()], n)
                    .with_context(|| format!("reading player {}", n))?;
                players[id.index()] = Some(state);
                matched = true;
            }
        }
        if !matched {
            warn!("ignoring unrecognised save line {}: '{}'", lines.last, line);
        }
    }

    let [Some(p1), Some(p2)] = players else {
        bail!("save file must contain both players");
    };
    let lengths: Vec<usize> = p1.fleet.iter().map(Ship::length).collect();
    let fleet = FleetLayout::from_lengths(&lengths)
        .ok_or_else(|| anyhow!("fleet of lengths {:?} matches no known layout", lengths))?;
    let defeated = |p: &PlayerState| !p.fleet.is_empty() && p.fleet.iter().all(Ship::is_sunk);
    let phase = match (defeated(&p1), defeated(&p2)) {
        (true, _) => Phase::GameOver { winner: PlayerId::Two },
        (_, true) => Phase::GameOver { winner: PlayerId::One },
        _ => Phase::AwaitingShot(current),
    };
    let state = GameState {
        config: GameConfig {
            fleet,
            ..GameConfig::default()
        },
        phase,
        players: [p1, p2],
    };
    let game = Game::from_state(state).context("save file is not a consistent game")?;
    Ok(game)
}

/// Write the text form of `game` to `path`.
pub fn save_to_path(game: &Game, path: &Path) -> Result<()> {
    let text = write_session(game)?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    info!("game saved to {}", path.display());
    Ok(())
}

/// Read a text save from `path`.
pub fn load_from_path(path: &Path) -> Result<Game> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let game = read_session(&text).with_context(|| format!("loading {}", path.display()))?;
    info!("game loaded from {}", path.display());
    Ok(game)
}

/// Compact binary snapshot of `game`.
pub fn encode_snapshot(game: &Game) -> Result<Vec<u8>> {
    Ok(bincode::serialize(&game.state())?)
}

/// Restore a game from [`encode_snapshot`] output.
pub fn decode_snapshot(bytes: &[u8]) -> Result<Game> {
    let state: GameState = bincode::deserialize(bytes)?;
    Ok(Game::from_state(state)?)
}
