//! The Gridmatch session layer: everything between a raw input event
//! and a surface operation.
//!
//! Each game session runs as an isolated Tokio task (actor model) that
//! owns the board, the move selector, the turn, and the input gate.
//! State transitions happen synchronously inside the actor; the surface
//! I/O they trigger is drained by a separate executor task, so publish
//! latency never delays — or reorders — input validation.
//!
//! # Key types
//!
//! - [`GameSession`] — the pure state machine (events in, effects out)
//! - [`InputGate`] — authorizes which events are currently valid
//! - [`Effect`] — one surface operation the session wants performed
//! - [`SessionHandle`] — send commands to a running session actor
//! - [`SessionManager`] — creates sessions and routes events by message

mod actor;
mod error;
mod gate;
mod manager;
mod render;
mod session;
mod status;

pub use actor::{SessionCommand, SessionHandle, spawn_session};
pub use error::SessionError;
pub use gate::{GateDecision, InputGate};
pub use manager::SessionManager;
pub use render::{render_invitation, render_match};
pub use session::{Effect, GameSession, SessionConfig};
pub use status::{Outcome, SessionStatus};
