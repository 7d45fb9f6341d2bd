//! The chat-surface boundary for Gridmatch.
//!
//! A game session lives on one message published to an external chat
//! service. Everything the session ever asks of that service goes
//! through the [`ChatSurface`] trait: publish or edit the game message,
//! delete it, send a side-channel notice, and manage the reaction
//! symbols attached to it.
//!
//! The trait is deliberately narrow — it is the *entire* contract with
//! the outside world, so the whole engine can be exercised against the
//! in-memory [`MemorySurface`] with no network in sight.
//!
//! Surface calls are best-effort from the session's point of view:
//! failures are logged and the game state remains authoritative
//! (the next successful edit reflects it).

mod error;
mod memory;

pub use error::SurfaceError;
pub use memory::{MemorySurface, SurfaceOp};

use std::future::Future;

use gridmatch_protocol::{MessageId, Symbol, UserId};

/// One channel on a chat service, as seen by a game session.
///
/// An implementation is scoped to a single channel — the session does
/// not address channels, only the message it published there.
///
/// Methods return explicit `impl Future + Send` (rather than `async fn`)
/// because the futures cross `tokio::spawn` boundaries inside the
/// session actor.
pub trait ChatSurface: Send + Sync + 'static {
    /// Publishes a new message and returns its id.
    fn publish(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<MessageId, SurfaceError>> + Send;

    /// Replaces the text of a previously published message.
    fn edit(
        &self,
        message: MessageId,
        text: &str,
    ) -> impl Future<Output = Result<(), SurfaceError>> + Send;

    /// Deletes a previously published message.
    fn delete(
        &self,
        message: MessageId,
    ) -> impl Future<Output = Result<(), SurfaceError>> + Send;

    /// Sends a free-standing notice to the channel.
    ///
    /// Used for advisories that must not overwrite the game message.
    fn notify(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<(), SurfaceError>> + Send;

    /// Attaches a reaction symbol to a message as the automated user.
    fn attach(
        &self,
        message: MessageId,
        symbol: Symbol,
    ) -> impl Future<Output = Result<(), SurfaceError>> + Send;

    /// Removes one user's reaction symbol from a message.
    ///
    /// This is the "undo the event at the source" operation — it needs
    /// message-management rights on most chat services, which is where
    /// [`SurfaceError::PermissionDenied`] usually comes from.
    fn detach(
        &self,
        message: MessageId,
        user: UserId,
        symbol: Symbol,
    ) -> impl Future<Output = Result<(), SurfaceError>> + Send;

    /// Removes every reaction from a message.
    fn clear(
        &self,
        message: MessageId,
    ) -> impl Future<Output = Result<(), SurfaceError>> + Send;
}
