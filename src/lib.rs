#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod ai;
mod bitboard;
mod board;
mod common;
mod config;
mod game;
#[cfg(feature = "std")]
mod logging;
pub mod player;
#[cfg(feature = "std")]
pub mod render;
#[cfg(feature = "std")]
pub mod save;
mod ship;
mod view;

pub use ai::choose_target;
pub use bitboard::{BitBoard, BitBoardError, BitStore, SetBits};
pub use board::*;
pub use common::*;
pub use config::*;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::{format_record, init_logging, parse_level, LOG_ENV};
pub use player::{
    AutomatedPlayer, Commander, Controller, HumanPlayer, Player, PlayerKind,
};
pub use ship::*;
pub use view::*;
