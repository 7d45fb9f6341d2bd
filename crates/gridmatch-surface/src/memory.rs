//! In-memory chat surface for tests and local demos.

use std::collections::HashMap;

use gridmatch_protocol::{MessageId, Symbol, UserId};
use tokio::sync::Mutex;

use crate::{ChatSurface, SurfaceError};

/// One successfully executed surface operation, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOp {
    Published(MessageId, String),
    Edited(MessageId, String),
    Deleted(MessageId),
    Notified(String),
    Attached(MessageId, Symbol),
    Detached(MessageId, UserId, Symbol),
    Cleared(MessageId),
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    messages: HashMap<MessageId, String>,
    ops: Vec<SurfaceOp>,
}

/// A [`ChatSurface`] that keeps everything in memory.
///
/// Records every successful operation so tests can assert on the exact
/// sequence of calls the session made. `deny_detach` simulates a chat
/// service where the automated user lacks message-management rights,
/// for exercising the one-advisory-per-session path.
pub struct MemorySurface {
    inner: Mutex<Inner>,
    deny_detach: bool,
}

impl MemorySurface {
    /// Creates an empty surface.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            deny_detach: false,
        }
    }

    /// Creates a surface where every `detach` fails with
    /// [`SurfaceError::PermissionDenied`].
    pub fn with_detach_denied() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            deny_detach: true,
        }
    }

    /// A snapshot of every operation performed so far, in order.
    pub async fn ops(&self) -> Vec<SurfaceOp> {
        self.inner.lock().await.ops.clone()
    }

    /// The current text of a message, if it still exists.
    pub async fn text_of(&self, message: MessageId) -> Option<String> {
        self.inner.lock().await.messages.get(&message).cloned()
    }

    /// All notices sent so far, in order.
    pub async fn notices(&self) -> Vec<String> {
        self.inner
            .lock()
            .await
            .ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Notified(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSurface for MemorySurface {
    async fn publish(&self, text: &str) -> Result<MessageId, SurfaceError> {
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        let id = MessageId(inner.next_id);
        inner.messages.insert(id, text.to_string());
        inner.ops.push(SurfaceOp::Published(id, text.to_string()));
        tracing::debug!(message = %id, "published");
        Ok(id)
    }

    async fn edit(
        &self,
        message: MessageId,
        text: &str,
    ) -> Result<(), SurfaceError> {
        let mut inner = self.inner.lock().await;
        if !inner.messages.contains_key(&message) {
            return Err(SurfaceError::NotFound(message));
        }
        inner.messages.insert(message, text.to_string());
        inner.ops.push(SurfaceOp::Edited(message, text.to_string()));
        Ok(())
    }

    async fn delete(&self, message: MessageId) -> Result<(), SurfaceError> {
        let mut inner = self.inner.lock().await;
        if inner.messages.remove(&message).is_none() {
            return Err(SurfaceError::NotFound(message));
        }
        inner.ops.push(SurfaceOp::Deleted(message));
        Ok(())
    }

    async fn notify(&self, text: &str) -> Result<(), SurfaceError> {
        let mut inner = self.inner.lock().await;
        inner.ops.push(SurfaceOp::Notified(text.to_string()));
        Ok(())
    }

    async fn attach(
        &self,
        message: MessageId,
        symbol: Symbol,
    ) -> Result<(), SurfaceError> {
        let mut inner = self.inner.lock().await;
        if !inner.messages.contains_key(&message) {
            return Err(SurfaceError::NotFound(message));
        }
        inner.ops.push(SurfaceOp::Attached(message, symbol));
        Ok(())
    }

    async fn detach(
        &self,
        message: MessageId,
        user: UserId,
        symbol: Symbol,
    ) -> Result<(), SurfaceError> {
        if self.deny_detach {
            return Err(SurfaceError::PermissionDenied);
        }
        let mut inner = self.inner.lock().await;
        if !inner.messages.contains_key(&message) {
            return Err(SurfaceError::NotFound(message));
        }
        inner.ops.push(SurfaceOp::Detached(message, user, symbol));
        Ok(())
    }

    async fn clear(&self, message: MessageId) -> Result<(), SurfaceError> {
        let mut inner = self.inner.lock().await;
        if !inner.messages.contains_key(&message) {
            return Err(SurfaceError::NotFound(message));
        }
        inner.ops.push(SurfaceOp::Cleared(message));
        Ok(())
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_assigns_increasing_ids() {
        let surface = MemorySurface::new();
        let a = surface.publish("first").await.unwrap();
        let b = surface.publish("second").await.unwrap();
        assert_ne!(a, b);
        assert_eq!(surface.text_of(a).await.as_deref(), Some("first"));
        assert_eq!(surface.text_of(b).await.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_edit_replaces_text_and_records_op() {
        let surface = MemorySurface::new();
        let id = surface.publish("before").await.unwrap();
        surface.edit(id, "after").await.unwrap();
        assert_eq!(surface.text_of(id).await.as_deref(), Some("after"));
        assert_eq!(
            surface.ops().await.last(),
            Some(&SurfaceOp::Edited(id, "after".to_string()))
        );
    }

    #[tokio::test]
    async fn test_edit_unknown_message_is_not_found() {
        let surface = MemorySurface::new();
        let result = surface.edit(MessageId(99), "text").await;
        assert!(matches!(result, Err(SurfaceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_removes_message() {
        let surface = MemorySurface::new();
        let id = surface.publish("gone soon").await.unwrap();
        surface.delete(id).await.unwrap();
        assert_eq!(surface.text_of(id).await, None);
    }

    #[tokio::test]
    async fn test_detach_denied_surface_reports_permission_denied() {
        let surface = MemorySurface::with_detach_denied();
        let id = surface.publish("game").await.unwrap();
        let result =
            surface.detach(id, UserId(1), Symbol::Accept).await;
        assert!(matches!(result, Err(SurfaceError::PermissionDenied)));
    }

    #[tokio::test]
    async fn test_notices_collects_notify_texts_in_order() {
        let surface = MemorySurface::new();
        surface.notify("one").await.unwrap();
        surface.notify("two").await.unwrap();
        assert_eq!(surface.notices().await, vec!["one", "two"]);
    }
}
