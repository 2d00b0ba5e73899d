//! Lifetime scope for a view's subscriptions
//!
//! A [`Scope`] owns every stream subscription and one-shot task a view starts.
//! Each task runs under a child of the scope's root `CancellationToken`, so
//! closing the scope stops all of them at once. Tasks forward their output as
//! messages through the channel the scope was created with.
//!
//! # Example
//!
//! ```ignore
//! use dashboard_core::scope::Scope;
//! use std::time::Duration;
//!
//! let (msg_tx, mut msg_rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut scope = Scope::new("dashboard", msg_tx);
//!
//! // Long-lived: every store emission becomes a message
//! scope.stream("user", store.select(|s| s.user.clone()).map(Msg::UserDidChange));
//!
//! // One-shot after a delay
//! scope.delay("images", Duration::from_millis(500), async { Msg::ImagesDidLoad });
//!
//! // On teardown
//! scope.close();
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tokio_stream::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;

/// Identifies a task inside a scope.
///
/// Starting a task with a key that is already running replaces it.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ScopeKey(String);

impl ScopeKey {
    /// Create a new scope key.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the key name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for ScopeKey {
    fn from(s: &'static str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ScopeKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Owns the subscriptions and one-shot tasks of a single view.
///
/// # Type Parameters
///
/// - `M`: The message type tasks deliver back to the owner
pub struct Scope<M> {
    label: &'static str,
    root: CancellationToken,
    tasks: HashMap<ScopeKey, AbortHandle>,
    msg_tx: mpsc::UnboundedSender<M>,
}

impl<M> Scope<M>
where
    M: Send + 'static,
{
    /// Create an open scope delivering messages to `msg_tx`.
    pub fn new(label: &'static str, msg_tx: mpsc::UnboundedSender<M>) -> Self {
        Self {
            label,
            root: CancellationToken::new(),
            tasks: HashMap::new(),
            msg_tx,
        }
    }

    /// Forward every item of `stream` until the stream ends or the task is cancelled.
    pub fn stream<S>(&mut self, key: impl Into<ScopeKey>, stream: S) -> &mut Self
    where
        S: Stream<Item = M> + Send + 'static,
    {
        let key = key.into();
        let Some(token) = self.prepare(&key) else {
            return self;
        };

        let tx = self.msg_tx.clone();
        let name = key.name().to_string();
        let handle = tokio::spawn(async move {
            tokio::pin!(stream);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    item = stream.next() => match item {
                        Some(msg) => {
                            if tx.send(msg).is_err() {
                                // Owner is gone
                                break;
                            }
                        }
                        None => break,
                    },
                }
            }
            tracing::trace!(key = %name, "Scope stream finished");
        });

        self.tasks.insert(key, handle.abort_handle());
        self
    }

    /// Run `future` once and deliver its output, unless cancelled first.
    pub fn once<F>(&mut self, key: impl Into<ScopeKey>, future: F) -> &mut Self
    where
        F: Future<Output = M> + Send + 'static,
    {
        let key = key.into();
        let Some(token) = self.prepare(&key) else {
            return self;
        };

        let tx = self.msg_tx.clone();
        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                msg = future => {
                    let _ = tx.send(msg);
                }
            }
        });

        self.tasks.insert(key, handle.abort_handle());
        self
    }

    /// Wait for `duration`, then run `future` once and deliver its output.
    pub fn delay<F>(&mut self, key: impl Into<ScopeKey>, duration: Duration, future: F) -> &mut Self
    where
        F: Future<Output = M> + Send + 'static,
    {
        self.once(key, async move {
            tokio::time::sleep(duration).await;
            future.await
        })
    }

    /// Cancel one task by key.
    ///
    /// If no task exists with the given key, this is a no-op.
    pub fn cancel(&mut self, key: &ScopeKey) {
        if let Some(handle) = self.tasks.remove(key) {
            handle.abort();
        }
    }

    /// Close the scope: cancel every task and refuse new ones.
    pub fn close(&mut self) {
        if self.root.is_cancelled() && self.tasks.is_empty() {
            return;
        }
        self.root.cancel();
        let count = self.tasks.len();
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
        tracing::debug!(scope = self.label, tasks = count, "Scope closed");
    }

    /// Whether the scope has been closed.
    pub fn is_closed(&self) -> bool {
        self.root.is_cancelled()
    }

    /// Check if a task with the given key is still running.
    pub fn is_active(&self, key: &ScopeKey) -> bool {
        self.tasks
            .get(key)
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Number of tasks that have not finished yet.
    pub fn len(&self) -> usize {
        self.tasks.values().filter(|h| !h.is_finished()).count()
    }

    /// Check if no task is running.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace any task under `key` and hand out a child token, or `None` when closed.
    fn prepare(&mut self, key: &ScopeKey) -> Option<CancellationToken> {
        if self.root.is_cancelled() {
            tracing::warn!(scope = self.label, key = %key.name(), "Ignoring task on closed scope");
            return None;
        }
        self.cancel(key);
        self.tasks.retain(|_, handle| !handle.is_finished());
        Some(self.root.child_token())
    }
}

impl<M> Drop for Scope<M> {
    fn drop(&mut self) {
        self.root.cancel();
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Msg {
        Value(usize),
        Done,
    }

    #[test]
    fn test_scope_key() {
        let k1 = ScopeKey::new("user");
        let k2 = ScopeKey::from("user");
        let k3: ScopeKey = "user".into();

        assert_eq!(k1, k2);
        assert_eq!(k2, k3);
        assert_eq!(k1.name(), "user");
    }

    #[tokio::test]
    async fn test_stream_forwards_in_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scope = Scope::new("test", tx);

        scope.stream(
            "values",
            tokio_stream::iter(vec![Msg::Value(1), Msg::Value(2), Msg::Value(3)]),
        );

        let mut values = vec![];
        for _ in 0..3 {
            let msg = tokio::time::timeout(Duration::from_millis(100), rx.recv())
                .await
                .expect("timeout")
                .expect("channel closed");
            if let Msg::Value(v) = msg {
                values.push(v);
            }
        }

        assert_eq!(values, vec![1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_delivers_after_duration() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scope = Scope::new("test", tx);

        scope.delay("later", Duration::from_millis(500), async { Msg::Done });

        let early = tokio::time::timeout(Duration::from_millis(400), rx.recv()).await;
        assert!(early.is_err());

        let msg = tokio::time::timeout(Duration::from_millis(200), rx.recv())
            .await
            .expect("timeout");
        assert_eq!(msg, Some(Msg::Done));
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_key_replaces_task() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scope = Scope::new("test", tx);

        scope.delay("fetch", Duration::from_millis(100), async { Msg::Value(1) });
        scope.delay("fetch", Duration::from_millis(100), async { Msg::Value(2) });

        assert_eq!(scope.len(), 1);

        let msg = rx.recv().await;
        assert_eq!(msg, Some(Msg::Value(2)));

        let nothing = tokio::time::timeout(Duration::from_millis(500), rx.recv()).await;
        assert!(nothing.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_cancels_every_task() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scope = Scope::new("test", tx);

        let (stream_tx, stream_rx) = mpsc::unbounded_channel();
        scope.stream(
            "feed",
            tokio_stream::wrappers::UnboundedReceiverStream::new(stream_rx),
        );
        scope.delay("later", Duration::from_millis(50), async { Msg::Done });
        assert_eq!(scope.len(), 2);

        scope.close();
        assert!(scope.is_closed());
        assert!(scope.is_empty());

        // Upstream keeps producing, nothing reaches the owner
        let _ = stream_tx.send(Msg::Value(7));
        let nothing = tokio::time::timeout(Duration::from_millis(200), rx.recv()).await;
        assert!(matches!(nothing, Err(_) | Ok(None)));
    }

    #[tokio::test]
    async fn test_closed_scope_refuses_tasks() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut scope = Scope::new("test", tx);

        scope.close();
        scope.once("late", async { Msg::Done });

        assert!(scope.is_empty());
        assert!(!scope.is_active(&ScopeKey::new("late")));
    }

    #[tokio::test]
    async fn test_cancel_single_task() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut scope = Scope::new("test", tx);

        scope.delay("a", Duration::from_secs(10), async { Msg::Done });
        scope.delay("b", Duration::from_secs(10), async { Msg::Done });

        scope.cancel(&ScopeKey::new("a"));

        assert!(!scope.is_active(&ScopeKey::new("a")));
        assert!(scope.is_active(&ScopeKey::new("b")));
        assert!(!scope.is_closed());
    }
}
