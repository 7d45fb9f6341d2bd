//! The input gate: decides which external events are currently valid.
//!
//! The gate is pure configuration plus one predicate. It never touches
//! game state — the session re-arms it synchronously on every phase
//! advance, and the caller carries out whatever its decision demands
//! (usually undoing a rejected event at the source).

use gridmatch_protocol::{InputEvent, Symbol, UserId};

/// What to do with one incoming event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// The event is from the expected actor with an accepted symbol —
    /// feed it to the session.
    Accept,
    /// Drop the event with no side effect at all. Self-events (the
    /// automated user attaching its own affordances) and events against
    /// a disarmed gate land here.
    Ignore,
    /// The event is unauthorized: wrong actor or wrong symbol. The
    /// caller must undo it at the source (remove the reaction).
    Reject,
}

#[derive(Debug, Clone)]
struct GateArm {
    actor: UserId,
    accepted: Vec<Symbol>,
}

/// Filters incoming events against an expected actor and symbol set.
///
/// The automated identity is passed in explicitly at construction —
/// the gate has no ambient knowledge of "the bot".
#[derive(Debug, Clone)]
pub struct InputGate {
    automated: UserId,
    arm: Option<GateArm>,
}

impl InputGate {
    /// Creates a disarmed gate. Every event is ignored until
    /// [`arm`](Self::arm) is called.
    pub fn new(automated: UserId) -> Self {
        Self {
            automated,
            arm: None,
        }
    }

    /// Arms the gate for one actor and one accepted symbol set.
    pub fn arm(&mut self, actor: UserId, accepted: Vec<Symbol>) {
        self.arm = Some(GateArm { actor, accepted });
    }

    /// Disarms the gate. Subsequent events are ignored, not rejected:
    /// a finished game does not go around deleting bystander reactions.
    pub fn disarm(&mut self) {
        self.arm = None;
    }

    /// Returns `true` if the gate currently accepts any input.
    pub fn is_armed(&self) -> bool {
        self.arm.is_some()
    }

    /// Classifies one event. Pure; no state change.
    pub fn check(&self, event: &InputEvent) -> GateDecision {
        // The automated user's own reactions echo back as events when
        // affordances are attached. Always a silent drop.
        if event.actor == self.automated {
            return GateDecision::Ignore;
        }
        let Some(arm) = &self.arm else {
            return GateDecision::Ignore;
        };
        if arm.actor == event.actor && arm.accepted.contains(&event.symbol)
        {
            GateDecision::Accept
        } else {
            GateDecision::Reject
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
