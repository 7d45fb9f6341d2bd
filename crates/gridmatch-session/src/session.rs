//! The game-session state machine.
//!
//! [`GameSession`] is pure with respect to I/O: events go in, state
//! changes happen synchronously, and a list of [`Effect`]s comes out
//! for the actor's executor to perform against the chat surface. The
//! input gate is re-armed inside the same call that mutates state, so
//! a slow publish can never leave a stale gate accepting input for the
//! wrong phase or actor.

use std::time::Duration;

use gridmatch_core::{Board, MoveOutcome, MoveSelector, Role};
use gridmatch_protocol::{Digit, InputEvent, PlayerHandle, Symbol, UserId};
use rand::Rng;

use crate::gate::{GateDecision, InputGate};
use crate::render::{render_invitation, render_match};
use crate::status::{Outcome, SessionStatus};

// ---------------------------------------------------------------------------
// Effects
// ---------------------------------------------------------------------------

/// One surface operation requested by a state transition.
///
/// Effects are descriptions, not actions: the session never awaits
/// anything. The executor performs them in order, and their latency
/// affects only when humans see the update — never which inputs are
/// currently valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Publish the session's message (issued exactly once, by `open`).
    Publish(String),
    /// Replace the session message's text.
    Edit(String),
    /// Delete the session's message.
    Delete,
    /// Attach a reaction affordance as the automated user.
    Attach(Symbol),
    /// Remove one user's reaction (undo an event at the source).
    Detach(UserId, Symbol),
    /// Remove every reaction from the session's message.
    Clear,
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Per-session settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// The system's own automated identity. Its reactions echo back as
    /// events and must be ignored, so the gate needs to know it.
    pub automated_user: UserId,
    /// Overrides the random opening-turn coin flip. For tests and demos.
    pub opening_turn: Option<Role>,
    /// Stops the session as aborted when no event arrives within the
    /// window. Off by default — an idle opponent holds the game open.
    pub idle_timeout: Option<Duration>,
}

impl SessionConfig {
    /// Creates a config with the random coin flip and no idle timeout.
    pub fn new(automated_user: UserId) -> Self {
        Self {
            automated_user,
            opening_turn: None,
            idle_timeout: None,
        }
    }

    /// Fixes the opening turn instead of flipping a coin.
    pub fn opening_turn(mut self, role: Role) -> Self {
        self.opening_turn = Some(role);
        self
    }

    /// Enables the idle timeout.
    pub fn idle_timeout(mut self, window: Duration) -> Self {
        self.idle_timeout = Some(window);
        self
    }
}

// ---------------------------------------------------------------------------
// GameSession
// ---------------------------------------------------------------------------

/// One two-player game, from invitation to outcome.
///
/// Owns the board, the move selector, the turn, and the input gate for
/// its whole lifetime; nothing else mutates them. The lifecycle is
/// driven entirely by [`handle_event`](Self::handle_event) plus the
/// boundary operations [`open`](Self::open) and [`stop`](Self::stop).
#[derive(Debug)]
pub struct GameSession {
    /// Seat order: index 0 is role one (the challenger), 1 is role two.
    players: [PlayerHandle; 2],
    board: Board,
    selector: MoveSelector,
    gate: InputGate,
    status: SessionStatus,
    /// Meaningful only while status is `AwaitingMove`.
    turn: Role,
    config: SessionConfig,
}

impl GameSession {
    /// Creates a session awaiting its invitation.
    ///
    /// The challenger takes role one, the invitee role two. Nothing is
    /// published until [`open`](Self::open).
    pub fn new(
        challenger: PlayerHandle,
        invitee: PlayerHandle,
        config: SessionConfig,
    ) -> Self {
        Self {
            players: [challenger, invitee],
            board: Board::new(),
            selector: MoveSelector::new(),
            gate: InputGate::new(config.automated_user),
            status: SessionStatus::PendingInvitation,
            turn: Role::One,
            config,
        }
    }

    /// The player seated at `role`.
    pub fn player(&self, role: Role) -> &PlayerHandle {
        match role {
            Role::One => &self.players[0],
            Role::Two => &self.players[1],
        }
    }

    /// Current lifecycle state.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// The role currently authorized to move, if a game is running.
    pub fn turn_owner(&self) -> Option<Role> {
        match self.status {
            SessionStatus::AwaitingMove => Some(self.turn),
            _ => None,
        }
    }

    /// Read access to the board, for snapshots and tests.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub(crate) fn idle_timeout(&self) -> Option<Duration> {
        self.config.idle_timeout
    }

    // -- Boundary operations ------------------------------------------------

    /// Publishes the invitation and arms the gate for the invitee.
    ///
    /// Called once by the actor when the session task starts.
    pub fn open(&mut self) -> Vec<Effect> {
        if self.status != SessionStatus::PendingInvitation {
            return Vec::new();
        }
        let invitee = self.player(Role::Two).id;
        tracing::info!(%invitee, "inviting");
        self.gate
            .arm(invitee, vec![Symbol::Accept, Symbol::Decline]);
        vec![
            Effect::Publish(render_invitation(
                self.player(Role::One),
                self.player(Role::Two),
            )),
            Effect::Attach(Symbol::Accept),
            Effect::Attach(Symbol::Decline),
        ]
    }

    /// Ends the session early. Idempotent — a second call is a no-op.
    ///
    /// Clears the message's affordances; if the game never started
    /// (still pending its invitation), the message itself is deleted
    /// rather than edited in place. Finished sessions are untouched.
    pub fn stop(&mut self) -> Vec<Effect> {
        if self.status.is_finished() {
            return Vec::new();
        }
        let never_started =
            self.status == SessionStatus::PendingInvitation;
        self.status = SessionStatus::Finished(Outcome::Aborted);
        self.gate.disarm();
        tracing::info!("session stopped");

        let mut effects = vec![Effect::Clear];
        if never_started {
            effects.push(Effect::Delete);
        }
        effects
    }

    // -- Event handling -----------------------------------------------------

    /// Feeds one external event through the gate and the state machine.
    ///
    /// All state mutation and gate reconfiguration happen before this
    /// returns; the effects can be performed at any later time without
    /// racing the next event.
    pub fn handle_event(&mut self, event: &InputEvent) -> Vec<Effect> {
        match self.gate.check(event) {
            GateDecision::Ignore => Vec::new(),
            GateDecision::Reject => {
                tracing::debug!(
                    actor = %event.actor,
                    symbol = %event.symbol,
                    "unauthorized input, undoing"
                );
                vec![Effect::Detach(event.actor, event.symbol)]
            }
            GateDecision::Accept => match self.status {
                SessionStatus::PendingInvitation => {
                    self.handle_invitation(event.symbol)
                }
                SessionStatus::AwaitingMove => self.handle_move(event),
                SessionStatus::Finished(_) => Vec::new(),
            },
        }
    }

    fn handle_invitation(&mut self, symbol: Symbol) -> Vec<Effect> {
        match symbol {
            Symbol::Accept => self.begin(),
            Symbol::Decline => {
                tracing::info!("invitation declined");
                self.stop()
            }
            // The gate only admits the two invitation symbols here.
            _ => Vec::new(),
        }
    }

    /// Starts the game after an accepted invitation.
    fn begin(&mut self) -> Vec<Effect> {
        self.status = SessionStatus::AwaitingMove;
        self.turn = self.config.opening_turn.unwrap_or_else(|| {
            if rand::rng().random_range(0..2) == 0 {
                Role::One
            } else {
                Role::Two
            }
        });
        self.board = Board::new();
        self.selector.reset();
        self.arm_for_turn();
        tracing::info!(opener = %self.turn, "game started");

        // Replace the invitation affordances with the digit strip.
        // Attachment requests are ordered; the executor awaits each one
        // so digits appear in sequence. Unavailable columns are skipped
        // outright rather than attached.
        let mut effects =
            vec![Effect::Clear, Effect::Edit(self.turn_payload())];
        for digit in Digit::ALL {
            if self.board.column_available(digit.index()) {
                effects.push(Effect::Attach(Symbol::Digit(digit)));
            }
        }
        effects
    }

    fn handle_move(&mut self, event: &InputEvent) -> Vec<Effect> {
        let Symbol::Digit(digit) = event.symbol else {
            // The gate only arms digit symbols during a game.
            return Vec::new();
        };

        // Remove the pressed reaction so the affordance stays clean
        // for the next press.
        let mut effects =
            vec![Effect::Detach(event.actor, event.symbol)];

        match self.selector.submit(digit.index()) {
            MoveOutcome::Partial => {
                // Column locked in; same actor now picks a row.
                self.arm_for_turn();
                effects.push(Effect::Edit(self.turn_payload()));
            }
            MoveOutcome::Complete { row, col } => {
                effects.extend(self.commit_move(row, col));
            }
        }
        effects
    }

    /// Applies a completed selection to the board and advances the game.
    fn commit_move(&mut self, row: usize, col: usize) -> Vec<Effect> {
        if !self.board.place(row, col, self.turn) {
            // Occupied cell: recoverable. Same actor restarts from the
            // column phase; the turn does not change hands.
            tracing::debug!(row, col, owner = %self.turn, "cell occupied");
            self.arm_for_turn();
            let notice = format!(
                "{} this move is not valid, try again.",
                self.player(self.turn)
            );
            return vec![Effect::Edit(self.match_payload(&notice))];
        }

        if let Some(winner) = self.board.winner() {
            return self.finish(
                Outcome::Winner(winner),
                format!("Game Over! {} won!", self.player(winner)),
            );
        }
        if self.board.is_full() {
            return self.finish(
                Outcome::Tie,
                "Game Over! It's a tie, nobody wins.".to_string(),
            );
        }

        // Nothing special: the other player is up.
        self.turn = self.turn.other();
        self.arm_for_turn();
        vec![Effect::Edit(self.turn_payload())]
    }

    /// Transitions to `Finished` and disarms the gate.
    fn finish(&mut self, outcome: Outcome, notice: String) -> Vec<Effect> {
        self.status = SessionStatus::Finished(outcome);
        self.gate.disarm();
        tracing::info!(status = %self.status, "game over");
        vec![Effect::Clear, Effect::Edit(self.match_payload(&notice))]
    }

    // -- Gate & payload helpers ---------------------------------------------

    /// Arms the gate for the turn owner with the availability-filtered
    /// digit set.
    ///
    /// The same set is kept through the row phase, where digits mean
    /// rows: filtering by *column* availability there is deliberate
    /// fidelity to the product's behavior, not an oversight. `place`
    /// remains the authority on whether a cell is actually free.
    fn arm_for_turn(&mut self) {
        let accepted: Vec<Symbol> = Digit::ALL
            .iter()
            .filter(|digit| self.board.column_available(digit.index()))
            .map(|&digit| Symbol::Digit(digit))
            .collect();
        self.gate.arm(self.player(self.turn).id, accepted);
    }

    fn match_payload(&self, status_line: &str) -> String {
        render_match(
            &self.board,
            &self.players,
            self.selector.phase(),
            status_line,
        )
    }

    fn turn_payload(&self) -> String {
        self.match_payload(&format!(
            "{} it's your turn!",
            self.player(self.turn)
        ))
    }
}

// =========================================================================
// Tests
// =========================================================================
