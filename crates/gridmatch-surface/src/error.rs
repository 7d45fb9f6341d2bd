//! Error types for the surface layer.

use gridmatch_protocol::MessageId;

/// Errors that can occur talking to the chat service.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    /// The automated user lacks the rights for this operation —
    /// typically reaction removal, which needs message-management
    /// permission. The session surfaces this to users once, then
    /// suppresses it.
    #[error("missing permission to manage messages")]
    PermissionDenied,

    /// The target message no longer exists (deleted out from under us).
    #[error("message {0} not found")]
    NotFound(MessageId),

    /// The chat service could not be reached or rejected the call.
    #[error("surface unavailable: {0}")]
    Unavailable(String),
}
