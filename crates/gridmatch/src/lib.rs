//! # Gridmatch
//!
//! A reaction-driven grid game engine for chat services.
//!
//! Gridmatch runs two-player 3×3 matches entirely on a chat surface:
//! the game lives in a single message, players move by pressing
//! reaction symbols, and the engine edits the message in place as the
//! match progresses. Each match runs as an isolated Tokio task; a
//! [`SessionManager`] routes incoming reaction events to the right one.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use gridmatch::prelude::*;
//!
//! # async fn run() -> Result<(), GridmatchError> {
//! let config = BotConfig::load("config.json")?;
//! let surface = Arc::new(MemorySurface::new()); // or a real service
//! let mut manager = SessionManager::new(
//!     surface,
//!     SessionConfig::new(config.automated_user()),
//! );
//!
//! // On "!play <@2>" from user 1:
//! let challenger = PlayerHandle::new(UserId(1), "<@1>");
//! let opponent = PlayerHandle::new(UserId(2), "<@2>");
//! manager.create_session(challenger, opponent).await;
//!
//! // Feed every reaction event from the service:
//! // manager.route_event(event).await;
//! # Ok(())
//! # }
//! ```

mod config;
mod dispatch;
mod error;

pub use config::{BotConfig, ConfigError};
pub use dispatch::{Command, parse_command, parse_mention};
pub use error::GridmatchError;

// Re-export the sub-crates under their layer names.
pub use gridmatch_core as core;
pub use gridmatch_protocol as protocol;
pub use gridmatch_session as session;
pub use gridmatch_surface as surface;

/// Installs a `tracing` subscriber reading `RUST_LOG`.
///
/// Convenience for binaries; call once at startup. Library code never
/// touches the global subscriber.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// Everything needed to embed the engine, in one import.
pub mod prelude {
    pub use crate::{
        BotConfig, Command, GridmatchError, parse_command,
    };
    pub use gridmatch_core::{Board, Role};
    pub use gridmatch_protocol::{
        InputEvent, MessageId, PlayerHandle, SessionId, Symbol, UserId,
    };
    pub use gridmatch_session::{
        Outcome, SessionConfig, SessionManager, SessionStatus,
    };
    pub use gridmatch_surface::{ChatSurface, MemorySurface, SurfaceError};
}
