//! Error types for the session layer.

use gridmatch_protocol::SessionId;

/// Errors that can occur driving a session from the outside.
///
/// Note what is *not* here: an illegal move is normal control flow
/// inside the session (the player is re-prompted), and surface failures
/// are logged by the effect executor without touching game state.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No session with this id is registered.
    #[error("session {0} not found")]
    NotFound(SessionId),

    /// The session's actor has stopped or its command channel is full.
    #[error("session {0} is unavailable")]
    Unavailable(SessionId),
}
