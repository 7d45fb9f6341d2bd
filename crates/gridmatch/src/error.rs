//! Unified error type for the Gridmatch engine.

use gridmatch_protocol::ProtocolError;
use gridmatch_session::SessionError;
use gridmatch_surface::SurfaceError;

use crate::config::ConfigError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `gridmatch` meta-crate, you deal with this single
/// error type instead of importing errors from each sub-crate.
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum GridmatchError {
    /// A protocol-level error (unknown symbol, digit out of range).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A chat-surface error (publish, edit, reaction management).
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    /// A session-level error (not found, actor unavailable).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A configuration error (unreadable or malformed config file).
    #[error(transparent)]
    Config(#[from] ConfigError),
}
