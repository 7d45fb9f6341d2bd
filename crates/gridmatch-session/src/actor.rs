//! Session actor: an isolated Tokio task that owns one game session.
//!
//! Each session runs in its own task, communicating with the outside
//! world through an mpsc channel — no shared mutable state, just
//! message passing. Surface I/O is pushed onto a second, unbounded
//! channel and drained sequentially by an executor task, so a slow
//! publish delays what humans *see*, never what inputs are valid.

use std::sync::Arc;

use gridmatch_protocol::{InputEvent, MessageId, SessionId};
use gridmatch_surface::{ChatSurface, SurfaceError};
use tokio::sync::{mpsc, oneshot};

use crate::error::SessionError;
use crate::session::{Effect, GameSession};
use crate::status::SessionStatus;

/// Advisory sent once per session when reaction removal is forbidden.
const PERMISSION_ADVISORY: &str =
    "I need permission to remove reactions to run this game cleanly.";

/// Commands sent to a session actor through its channel.
#[derive(Debug)]
pub enum SessionCommand {
    /// Deliver one external input event.
    Input(InputEvent),
    /// Stop the session early (abort).
    Stop,
    /// Request the current lifecycle state.
    Status {
        reply: oneshot::Sender<SessionStatus>,
    },
}

/// Handle to a running session actor. Used to send commands to it.
///
/// Cheap to clone — it's just an `mpsc::Sender` wrapper. The
/// `SessionManager` holds one of these per session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    session_id: SessionId,
    sender: mpsc::Sender<SessionCommand>,
}

impl SessionHandle {
    /// Returns the session's unique ID.
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Delivers an input event (fire-and-forget).
    pub async fn input(
        &self,
        event: InputEvent,
    ) -> Result<(), SessionError> {
        self.sender
            .send(SessionCommand::Input(event))
            .await
            .map_err(|_| SessionError::Unavailable(self.session_id))
    }

    /// Tells the session to stop early.
    pub async fn stop(&self) -> Result<(), SessionError> {
        self.sender
            .send(SessionCommand::Stop)
            .await
            .map_err(|_| SessionError::Unavailable(self.session_id))
    }

    /// Requests the session's current lifecycle state.
    pub async fn status(&self) -> Result<SessionStatus, SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(SessionCommand::Status { reply: reply_tx })
            .await
            .map_err(|_| SessionError::Unavailable(self.session_id))?;
        reply_rx
            .await
            .map_err(|_| SessionError::Unavailable(self.session_id))
    }
}

/// The internal session actor state. Runs inside a Tokio task.
struct SessionActor {
    session_id: SessionId,
    session: GameSession,
    receiver: mpsc::Receiver<SessionCommand>,
    /// Queue to the effect executor; unbounded so state transitions
    /// never block on surface latency.
    effects: mpsc::UnboundedSender<Effect>,
    /// Fires when the actor exits, however it exits. The registry
    /// prunes its entries on this signal.
    done: oneshot::Sender<()>,
}

impl SessionActor {
    /// Runs the actor loop, processing commands until the session
    /// finishes or its channel closes.
    async fn run(mut self) {
        tracing::info!(session_id = %self.session_id, "session actor started");

        let opening = self.session.open();
        self.push(opening);

        // The idle window is a deadline, not a per-recv timeout: only a
        // game event pushes it back. A status poller must not keep an
        // abandoned invitation alive.
        let window = self.session.idle_timeout();
        let mut deadline =
            window.map(|w| tokio::time::Instant::now() + w);

        loop {
            let cmd = match deadline {
                Some(at) => {
                    match tokio::time::timeout_at(
                        at,
                        self.receiver.recv(),
                    )
                    .await
                    {
                        Ok(cmd) => cmd,
                        Err(_) => {
                            tracing::info!(
                                session_id = %self.session_id,
                                "idle timeout, aborting"
                            );
                            let effects = self.session.stop();
                            self.push(effects);
                            break;
                        }
                    }
                }
                None => self.receiver.recv().await,
            };

            let Some(cmd) = cmd else { break };
            match cmd {
                SessionCommand::Input(event) => {
                    deadline = window
                        .map(|w| tokio::time::Instant::now() + w);
                    let effects = self.session.handle_event(&event);
                    self.push(effects);
                }
                SessionCommand::Stop => {
                    let effects = self.session.stop();
                    self.push(effects);
                }
                SessionCommand::Status { reply } => {
                    let _ = reply.send(self.session.status());
                }
            }

            if self.session.status().is_finished() {
                break;
            }
        }

        tracing::info!(
            session_id = %self.session_id,
            status = %self.session.status(),
            "session actor stopped"
        );
        let _ = self.done.send(());
    }

    /// Hands a transition's effects to the executor, in order.
    ///
    /// A send can only fail if the executor has panicked; the session
    /// keeps its state machine consistent regardless.
    fn push(&self, effects: Vec<Effect>) {
        for effect in effects {
            if self.effects.send(effect).is_err() {
                tracing::warn!(
                    session_id = %self.session_id,
                    "effect executor gone, dropping effect"
                );
            }
        }
    }
}

/// The effect executor: performs a session's surface operations
/// sequentially, in the order the session emitted them.
struct EffectExecutor<S: ChatSurface> {
    session_id: SessionId,
    surface: Arc<S>,
    receiver: mpsc::UnboundedReceiver<Effect>,
    /// The session's message, once published.
    message: Option<MessageId>,
    /// Resolves the message id for event routing.
    published: Option<oneshot::Sender<MessageId>>,
    /// The permission advisory is sent at most once per session.
    permissions_alerted: bool,
}

impl<S: ChatSurface> EffectExecutor<S> {
    async fn run(mut self) {
        while let Some(effect) = self.receiver.recv().await {
            self.perform(effect).await;
        }
        tracing::debug!(
            session_id = %self.session_id,
            "effect executor drained"
        );
    }

    async fn perform(&mut self, effect: Effect) {
        match effect {
            Effect::Publish(text) => match self.surface.publish(&text).await
            {
                Ok(id) => {
                    self.message = Some(id);
                    if let Some(reply) = self.published.take() {
                        let _ = reply.send(id);
                    }
                }
                Err(err) => self.log_failure("publish", &err),
            },
            Effect::Edit(text) => {
                let Some(id) = self.message else { return };
                if let Err(err) = self.surface.edit(id, &text).await {
                    self.log_failure("edit", &err);
                }
            }
            Effect::Delete => {
                let Some(id) = self.message.take() else { return };
                if let Err(err) = self.surface.delete(id).await {
                    self.log_failure("delete", &err);
                }
            }
            Effect::Attach(symbol) => {
                let Some(id) = self.message else { return };
                if let Err(err) = self.surface.attach(id, symbol).await {
                    self.log_failure("attach", &err);
                }
            }
            Effect::Detach(user, symbol) => {
                let Some(id) = self.message else { return };
                match self.surface.detach(id, user, symbol).await {
                    Ok(()) => {}
                    Err(SurfaceError::PermissionDenied) => {
                        self.advise_permissions().await;
                    }
                    Err(err) => self.log_failure("detach", &err),
                }
            }
            Effect::Clear => {
                let Some(id) = self.message else { return };
                match self.surface.clear(id).await {
                    Ok(()) => {}
                    Err(SurfaceError::PermissionDenied) => {
                        self.advise_permissions().await;
                    }
                    Err(err) => self.log_failure("clear", &err),
                }
            }
        }
    }

    /// Tells the players (once) that reaction removal is forbidden.
    /// The game keeps running without the cleanup.
    async fn advise_permissions(&mut self) {
        if self.permissions_alerted {
            return;
        }
        self.permissions_alerted = true;
        tracing::warn!(
            session_id = %self.session_id,
            "missing permission to remove reactions"
        );
        if let Err(err) = self.surface.notify(PERMISSION_ADVISORY).await {
            self.log_failure("notify", &err);
        }
    }

    /// Surface failures never stop the game; they are logged and the
    /// next effect proceeds.
    fn log_failure(&self, op: &str, err: &SurfaceError) {
        tracing::warn!(
            session_id = %self.session_id,
            op,
            error = %err,
            "surface operation failed"
        );
    }
}

/// Spawns a session actor task (plus its effect executor) and returns
/// a handle to communicate with it.
///
/// The first returned `oneshot::Receiver` resolves to the session
/// message's id once the invitation has been published — the registry
/// needs it to route reaction events back here. The second resolves
/// when the actor exits (finished game, stop, or closed channel) so
/// the registry can drop its entries. `channel_size` controls command
/// backpressure (bounded channel).
pub fn spawn_session<S: ChatSurface>(
    session_id: SessionId,
    session: GameSession,
    surface: Arc<S>,
    channel_size: usize,
) -> (
    SessionHandle,
    oneshot::Receiver<MessageId>,
    oneshot::Receiver<()>,
) {
    let (cmd_tx, cmd_rx) = mpsc::channel(channel_size);
    let (effect_tx, effect_rx) = mpsc::unbounded_channel();
    let (published_tx, published_rx) = oneshot::channel();
    let (done_tx, done_rx) = oneshot::channel();

    let executor = EffectExecutor {
        session_id,
        surface,
        receiver: effect_rx,
        message: None,
        published: Some(published_tx),
        permissions_alerted: false,
    };
    tokio::spawn(executor.run());

    let actor = SessionActor {
        session_id,
        session,
        receiver: cmd_rx,
        effects: effect_tx,
        done: done_tx,
    };
    tokio::spawn(actor.run());

    (
        SessionHandle {
            session_id,
            sender: cmd_tx,
        },
        published_rx,
        done_rx,
    )
}
