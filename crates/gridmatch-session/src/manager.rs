//! Session manager: creates sessions and routes events to them.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use gridmatch_protocol::{InputEvent, MessageId, PlayerHandle, SessionId};
use gridmatch_surface::ChatSurface;
use tokio::sync::Mutex;

use crate::actor::{SessionHandle, spawn_session};
use crate::error::SessionError;
use crate::session::{GameSession, SessionConfig};
use crate::status::SessionStatus;

/// Counter for generating unique session IDs.
static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Default command channel size for session actors.
const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Manages all active sessions and routes reaction events to them by
/// the message they landed on.
///
/// This is the entry point for session operations from higher layers
/// (the command dispatcher, the event feed). Both registries live
/// behind async mutexes and are shared with per-session janitor tasks:
/// a session's message id is only known after its invitation
/// publishes, and its entries must go away when its actor exits —
/// games that finish naturally never see `stop_session`, and a
/// long-running process must not accumulate dead handles.
pub struct SessionManager<S: ChatSurface> {
    surface: Arc<S>,
    config: SessionConfig,

    /// Active sessions, keyed by session ID.
    sessions: Arc<Mutex<HashMap<SessionId, SessionHandle>>>,

    /// Maps a session's message to the session, for event routing.
    routes: Arc<Mutex<HashMap<MessageId, SessionId>>>,
}

impl<S: ChatSurface> SessionManager<S> {
    /// Creates an empty manager over one chat surface.
    ///
    /// `config` is the template applied to every session it creates.
    pub fn new(surface: Arc<S>, config: SessionConfig) -> Self {
        Self {
            surface,
            config,
            sessions: Arc::new(Mutex::new(HashMap::new())),
            routes: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Starts a new session between two players and returns its ID.
    ///
    /// A janitor task follows the session's lifetime: it registers the
    /// message→session route once the invitation publishes (events
    /// arriving before that are not for this session anyway — its
    /// message does not exist yet), then removes both registry entries
    /// when the actor exits, however the game ended.
    pub async fn create_session(
        &mut self,
        challenger: PlayerHandle,
        invitee: PlayerHandle,
    ) -> SessionId {
        let session_id =
            SessionId(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed));
        let session = GameSession::new(
            challenger,
            invitee,
            self.config.clone(),
        );
        let (handle, published, finished) = spawn_session(
            session_id,
            session,
            Arc::clone(&self.surface),
            DEFAULT_CHANNEL_SIZE,
        );

        // Registered before the janitor spawns, so the prune below can
        // never run ahead of the insert.
        self.sessions.lock().await.insert(session_id, handle);

        let sessions = Arc::clone(&self.sessions);
        let routes = Arc::clone(&self.routes);
        tokio::spawn(async move {
            let message = published.await.ok();
            if let Some(message) = message {
                routes.lock().await.insert(message, session_id);
                tracing::debug!(%session_id, %message, "route registered");
            }

            // Resolves (or errors) when the actor task ends.
            let _ = finished.await;
            sessions.lock().await.remove(&session_id);
            if let Some(message) = message {
                routes.lock().await.remove(&message);
            }
            tracing::debug!(%session_id, "session pruned");
        });

        tracing::info!(%session_id, "session created");
        session_id
    }

    /// Routes a reaction event to the session living on its message.
    ///
    /// Events on messages no session owns are dropped silently — the
    /// feed delivers every reaction on the surface, most of which have
    /// nothing to do with us.
    pub async fn route_event(&self, event: InputEvent) {
        let session_id = {
            let routes = self.routes.lock().await;
            routes.get(&event.message).copied()
        };
        let Some(session_id) = session_id else {
            tracing::trace!(message = %event.message, "no session on message");
            return;
        };
        let handle = {
            let sessions = self.sessions.lock().await;
            sessions.get(&session_id).cloned()
        };
        if let Some(handle) = handle {
            if let Err(err) = handle.input(event).await {
                tracing::warn!(%session_id, error = %err, "event not delivered");
            }
        }
    }

    /// Queries a session's lifecycle state.
    pub async fn session_status(
        &self,
        session_id: SessionId,
    ) -> Result<SessionStatus, SessionError> {
        let handle = {
            let sessions = self.sessions.lock().await;
            sessions
                .get(&session_id)
                .cloned()
                .ok_or(SessionError::NotFound(session_id))?
        };
        handle.status().await
    }

    /// Stops a session early and removes it from the registry.
    ///
    /// The actor clears its message's affordances on the way out; a
    /// session that already finished on its own is a successful no-op
    /// at the game level.
    pub async fn stop_session(
        &mut self,
        session_id: SessionId,
    ) -> Result<(), SessionError> {
        let handle = self
            .sessions
            .lock()
            .await
            .remove(&session_id)
            .ok_or(SessionError::NotFound(session_id))?;
        // A closed channel means the actor already stopped — fine.
        let _ = handle.stop().await;
        self.routes
            .lock()
            .await
            .retain(|_, sid| *sid != session_id);
        tracing::info!(%session_id, "session stopped");
        Ok(())
    }

    /// Stops every active session.
    pub async fn stop_all(&mut self) {
        let ids: Vec<SessionId> =
            self.sessions.lock().await.keys().copied().collect();
        for session_id in ids {
            let _ = self.stop_session(session_id).await;
        }
    }

    /// Returns a handle to a session, if it is registered.
    pub async fn get(&self, session_id: SessionId) -> Option<SessionHandle> {
        self.sessions.lock().await.get(&session_id).cloned()
    }

    /// Returns the number of registered sessions.
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Returns `true` when no sessions are registered.
    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}
