//! Pure game state for Gridmatch: the board and the move selector.
//!
//! Nothing in this crate does I/O or async. The session layer owns one
//! [`Board`] and one [`MoveSelector`] per game and is the only thing
//! that mutates them.
//!
//! # Key types
//!
//! - [`Role`] — a player's fixed seat (one or two) for the session
//! - [`Board`] — the 3×3 grid: placement, fullness, win detection
//! - [`MoveSelector`] — accumulates the two-phase column/row selection

mod board;
mod selector;

pub use board::{Board, HEIGHT, Role, WIDTH};
pub use selector::{MoveOutcome, MovePhase, MoveSelector};
