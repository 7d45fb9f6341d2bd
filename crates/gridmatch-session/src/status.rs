//! Session lifecycle states.

use gridmatch_core::Role;
use serde::{Deserialize, Serialize};

/// How a finished session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The given role completed a line.
    Winner(Role),
    /// The board filled with no line completed.
    Tie,
    /// Declined invitation or external stop.
    Aborted,
}

/// The lifecycle state of a game session.
///
/// ```text
/// PendingInvitation → AwaitingMove → Finished
///         └────────────(decline/stop)────┘
/// ```
///
/// `AwaitingMove` internally cycles through the selector's column and
/// row phases without a transition at this level. `Finished` is
/// terminal and monotonic: once reached, neither the board, the
/// selector, nor the turn may change again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Waiting for the invited player to accept or decline.
    PendingInvitation,
    /// A game is in progress; the turn owner is selecting a move.
    AwaitingMove,
    /// The session is over, with its outcome.
    Finished(Outcome),
}

impl SessionStatus {
    /// Returns `true` once the session has reached its terminal state.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished(_))
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PendingInvitation => write!(f, "PendingInvitation"),
            Self::AwaitingMove => write!(f, "AwaitingMove"),
            Self::Finished(Outcome::Winner(role)) => {
                write!(f, "Finished(won by {role})")
            }
            Self::Finished(Outcome::Tie) => write!(f, "Finished(tie)"),
            Self::Finished(Outcome::Aborted) => {
                write!(f, "Finished(aborted)")
            }
        }
    }
}
