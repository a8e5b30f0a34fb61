//! Turn-level game logic built on top of the [`core`](crate::core) model.
//!
//! - [`PlayerStatus`] / [`TurnState`] - Per-turn state of both players as received each turn
//! - [`PackSchedule`] - The packs for every turn of the game, known up front
//! - [`Command`] - The decision sent back for a turn
//! - [`simulate_drop`] - Drops a pack onto a board and resolves erase chains
//! - [`PlacementPolicy`] / [`RandomPolicy`] - Decision making
//!
//! # Turn Flow
//!
//! 1. Build a [`TurnState`] from the per-turn input
//! 2. [`TurnState::normalized`] drops pending obstacle blocks onto both boards
//! 3. Look up the turn's pack in the [`PackSchedule`]
//! 4. Ask a [`PlacementPolicy`] for a [`Command`]
//!
//! # Example
//!
//! ```
//! use sumfall_engine::{
//!     Board, BoardGeometry, Pack, PackSchedule, PlacementPolicy, PlayerStatus, RandomPolicy,
//!     TurnState,
//! };
//!
//! let pack = Pack::from_rows(&[[1u8, 2], [3, 4]]).unwrap();
//! let schedule: PackSchedule = std::iter::repeat_n(pack, 3).collect();
//! let status = PlayerStatus::new(Board::empty(BoardGeometry::STANDARD));
//! let turn = TurnState::new(0, status.clone(), status).normalized();
//!
//! let mut policy = RandomPolicy::with_seed(123_456);
//! let command = policy.decide(&turn, schedule.get(turn.turn()).unwrap());
//! assert!(command.is_drop());
//! ```

pub use self::{
    command::*, pack_schedule::*, player_status::*, policy::*, simulator::*, turn_state::*,
};

mod command;
mod pack_schedule;
mod player_status;
mod policy;
mod simulator;
mod turn_state;
