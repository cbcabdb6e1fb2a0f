#![cfg(feature = "std")]

//! Terminal rendering of boards and coordinate parsing for the front ends.

use std::fmt::Write as _;

use crate::config::BOARD_SIZE;
use crate::view::{CellState, CellView, OpponentView, OwnView};

const N: usize = BOARD_SIZE as usize;

/// Format (row, col) as a label such as `A1` or `J10`.
pub fn coord_to_string(r: usize, c: usize) -> String {
    let col = (b'A' + c as u8) as char;
    format!("{}{}", col, r + 1)
}

/// Parse a label such as `B7` into (row, col).
pub fn parse_coord(input: &str) -> Result<(usize, usize), String> {
    let input = input.trim();
    if input.len() < 2 {
        return Err("Too short - need column letter and row number (e.g., A5)".to_string());
    }
    let mut chars = input.chars();
    let col_ch = chars
        .next()
        .ok_or("No column letter")?
        .to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("Invalid column '{}' - must be a letter A-J", col_ch));
    }
    let col = (col_ch as u8).wrapping_sub(b'A') as usize;
    if col >= N {
        return Err(format!("Column '{}' out of bounds - must be A-J", col_ch));
    }
    let row_str: String = chars.collect();
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-10", row_str))?;
    if row == 0 || row > N {
        return Err(format!("Row {} out of bounds - must be 1-10", row));
    }
    Ok((row - 1, col))
}

fn frame<F>(mut cell: F) -> String
where
    F: FnMut(usize, usize) -> char,
{
    let mut out = String::new();
    out.push_str("    ");
    for c in 0..N {
        let _ = write!(out, " {}", (b'A' + c as u8) as char);
    }
    out.push('\n');
    for r in 0..N {
        let _ = write!(out, "  {:2}", r + 1);
        for c in 0..N {
            let _ = write!(out, " {}", cell(r, c));
        }
        out.push('\n');
    }
    out
}

/// The owner's board: `S` ship, `X` hit, `#` sunk, `o` miss, `.` water.
pub fn render_own(view: &OwnView) -> String {
    let mut out = frame(|r, c| match view.get(r, c).unwrap_or_default() {
        CellState::Empty => '.',
        CellState::Ship => 'S',
        CellState::Hit => 'X',
        CellState::Miss => 'o',
        CellState::Sunk => '#',
    });
    out.push_str("    Legend: S=Ship  X=Hit  #=Sunk  o=Miss  .=Water\n");
    out
}

/// The opponent's board as far as it is known.
pub fn render_opponent(view: &OpponentView) -> String {
    let mut out = frame(|r, c| match view.get(r, c).unwrap_or_default() {
        CellView::Unknown => '.',
        CellView::Hit => 'X',
        CellView::Miss => 'o',
        CellView::Sunk => '#',
    });
    out.push_str("    Legend: X=Hit  #=Sunk  o=Miss  .=Unknown\n");
    out
}
