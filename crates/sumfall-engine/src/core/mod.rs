//! Board and pack model.
//!
//! - [`Block`] - A single cell value (empty, numbered, or obstacle)
//! - [`Pack`] - The 2×2 shape dropped each turn, with quarter-turn rotation
//! - [`Board`] - A player's grid, with hidden margin rows above the visible area
//! - [`BoardGeometry`] - Board dimensions, [`BoardGeometry::STANDARD`] for the real game
//!
//! Every transform here is a pure function returning a new value.

pub use self::{block::*, board::*, geometry::*, pack::*};

pub(crate) mod block;
pub(crate) mod board;
pub(crate) mod geometry;
pub(crate) mod obstacle;
pub(crate) mod pack;

/// Side length of a pack.
pub const PACK_SIZE: usize = 2;
/// Number of columns on a board.
pub const BOARD_WIDTH: usize = 10;
/// Number of rows the game shows (and sends over the protocol).
pub const VISIBLE_HEIGHT: usize = 16;
/// Hidden rows above the visible area, enough to hold a whole pack overflowing the top.
pub const MARGIN_HEIGHT: usize = PACK_SIZE + 1;
/// Total rows of a board, margin included.
pub const SIMULATION_HEIGHT: usize = VISIBLE_HEIGHT + MARGIN_HEIGHT;
/// Two neighbouring numbered blocks whose values add up to this are erased.
pub const ERASING_SUM: u8 = 10;
