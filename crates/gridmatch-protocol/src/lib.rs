//! Shared vocabulary for Gridmatch.
//!
//! This crate defines the types that cross layer boundaries:
//!
//! - **Identities** ([`UserId`], [`MessageId`], [`SessionId`]) — opaque
//!   newtypes for the external chat service's users and messages, and
//!   for Gridmatch's own sessions.
//! - **Symbols** ([`Symbol`], [`Digit`]) — the fixed set of reaction
//!   symbols a player can press: accept, decline, and the three digits.
//! - **Events** ([`InputEvent`]) — one symbol press on one message by
//!   one user, as delivered by the chat surface.
//!
//! # Architecture
//!
//! The protocol layer knows nothing about boards, turns, or sessions —
//! it only names the things the other layers talk about.
//!
//! ```text
//! Surface (chat I/O) → Protocol (events, symbols) → Session (game state)
//! ```

mod error;
mod types;

pub use error::ProtocolError;
pub use types::{
    Digit, InputEvent, MessageId, PlayerHandle, SessionId, Symbol, UserId,
};
