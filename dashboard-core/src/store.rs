//! State container: reducer on the write side, selector streams on the read side

use std::marker::PhantomData;

use tokio::sync::{mpsc, watch};
use tokio_stream::wrappers::WatchStream;
use tokio_stream::{Stream, StreamExt};

use crate::Action;

/// `(state, action) -> changed`
///
/// Returning `false` keeps subscribers asleep.
pub type Reducer<S, A> = fn(&mut S, A) -> bool;

/// Errors surfaced through a [`StoreHandle`]
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The main loop owning the store has shut down
    #[error("store is closed; action `{0}` was not delivered")]
    Closed(&'static str),
}

/// Owner side of the application state
///
/// Only the loop that owns the store reduces actions. Everyone else gets a
/// [`StoreHandle`] and observes slices of the state through
/// [`StoreHandle::select`].
///
/// ```ignore
/// fn reducer(state: &mut Session, action: SessionAction) -> bool {
///     match action {
///         SessionAction::SignIn(name) => {
///             state.user = Some(name);
///             true
///         }
///         SessionAction::SignOut => state.user.take().is_some(),
///     }
/// }
///
/// let mut store = Store::new(Session::default(), reducer);
/// store.dispatch(SessionAction::SignIn("ada".into()));
/// assert_eq!(store.state().user.as_deref(), Some("ada"));
/// ```
pub struct Store<S, A: Action> {
    state: watch::Sender<S>,
    reducer: Reducer<S, A>,
    _marker: PhantomData<A>,
}

impl<S, A: Action> Store<S, A> {
    pub fn new(state: S, reducer: Reducer<S, A>) -> Self {
        let (state, _) = watch::channel(state);
        Self {
            state,
            reducer,
            _marker: PhantomData,
        }
    }

    /// Reduce `action`; subscribers are notified only when it changed something
    pub fn dispatch(&mut self, action: A) -> bool {
        let reducer = self.reducer;
        self.state.send_if_modified(|state| reducer(state, action))
    }

    /// Borrow the current state
    ///
    /// Keep the guard short-lived: it holds a read lock on the state.
    pub fn state(&self) -> watch::Ref<'_, S> {
        self.state.borrow()
    }

    /// Hand out a view-side handle whose writes go to `action_tx`
    pub fn handle(&self, action_tx: mpsc::UnboundedSender<A>) -> StoreHandle<S, A> {
        StoreHandle {
            state: self.state.subscribe(),
            action_tx,
        }
    }
}

/// The store as seen from a view
///
/// Reads go straight to the shared state; writes are queued on the action
/// channel and reduced by the loop that owns the [`Store`].
pub struct StoreHandle<S, A> {
    state: watch::Receiver<S>,
    action_tx: mpsc::UnboundedSender<A>,
}

impl<S, A> Clone for StoreHandle<S, A> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            action_tx: self.action_tx.clone(),
        }
    }
}

impl<S, A> StoreHandle<S, A>
where
    S: Clone + Send + Sync + 'static,
    A: Action,
{
    /// Observe a slice of the state
    ///
    /// The stream yields the current value immediately, then each value that
    /// differs from the previously emitted one.
    pub fn select<T, F>(&self, selector: F) -> impl Stream<Item = T> + Send + 'static
    where
        T: Clone + PartialEq + Send + 'static,
        F: Fn(&S) -> T + Send + 'static,
    {
        let mut last: Option<T> = None;
        WatchStream::new(self.state.clone())
            .map(move |state| selector(&state))
            .filter_map(move |value| {
                if last.as_ref() == Some(&value) {
                    return None;
                }
                last = Some(value.clone());
                Some(value)
            })
    }

    /// Read a slice of the current state without subscribing
    pub fn snapshot<T>(&self, selector: impl FnOnce(&S) -> T) -> T {
        selector(&self.state.borrow())
    }

    /// Queue an action for the store
    pub fn dispatch(&self, action: A) -> Result<(), StoreError> {
        let name = action.name();
        tracing::debug!(action = %name, "Queueing action");
        self.action_tx
            .send(action)
            .map_err(|_| StoreError::Closed(name))
    }
}

/// [`Store`] whose dispatch runs through a [`Middleware`]
pub struct StoreWithMiddleware<S, A: Action, M: Middleware<A>> {
    store: Store<S, A>,
    middleware: M,
}

impl<S, A: Action, M: Middleware<A>> StoreWithMiddleware<S, A, M> {
    pub fn new(state: S, reducer: Reducer<S, A>, middleware: M) -> Self {
        Self {
            store: Store::new(state, reducer),
            middleware,
        }
    }

    pub fn dispatch(&mut self, action: A) -> bool {
        self.middleware.before(&action);
        let changed = self.store.dispatch(action.clone());
        self.middleware.after(&action, changed);
        changed
    }

    pub fn state(&self) -> watch::Ref<'_, S> {
        self.store.state()
    }

    pub fn handle(&self, action_tx: mpsc::UnboundedSender<A>) -> StoreHandle<S, A> {
        self.store.handle(action_tx)
    }

    pub fn middleware(&self) -> &M {
        &self.middleware
    }
}

/// Hooks around the reducer
pub trait Middleware<A: Action> {
    fn before(&mut self, action: &A);

    /// `changed` is what the reducer returned
    fn after(&mut self, action: &A, changed: bool);
}

/// Traces every reduced action
///
/// The summary goes out at `trace` before reducing, the outcome at `debug`
/// after it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingMiddleware {
    reduced: u64,
}

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self::default()
    }

    /// Actions reduced so far
    pub fn reduced(&self) -> u64 {
        self.reduced
    }
}

impl<A: Action> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) {
        tracing::trace!(action = %action.summary(), "Reducing");
    }

    fn after(&mut self, action: &A, changed: bool) {
        self.reduced += 1;
        tracing::debug!(action = %action.name(), changed, seq = self.reduced, "Reduced");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct Session {
        visits: u32,
        user: Option<String>,
    }

    #[derive(Clone, Debug)]
    enum SessionAction {
        Visit,
        SignIn(String),
        SignOut,
    }

    impl Action for SessionAction {
        fn name(&self) -> &'static str {
            match self {
                SessionAction::Visit => "Visit",
                SessionAction::SignIn(_) => "SignIn",
                SessionAction::SignOut => "SignOut",
            }
        }
    }

    fn reducer(state: &mut Session, action: SessionAction) -> bool {
        match action {
            SessionAction::Visit => {
                state.visits += 1;
                true
            }
            SessionAction::SignIn(name) => {
                state.user = Some(name);
                true
            }
            SessionAction::SignOut => state.user.take().is_some(),
        }
    }

    fn handle_for(store: &Store<Session, SessionAction>) -> StoreHandle<Session, SessionAction> {
        let (tx, _rx) = mpsc::unbounded_channel();
        store.handle(tx)
    }

    #[test]
    fn test_dispatch_reduces() {
        let mut store = Store::new(Session::default(), reducer);

        assert!(store.dispatch(SessionAction::Visit));
        assert!(store.dispatch(SessionAction::SignIn("ada".into())));

        assert_eq!(store.state().visits, 1);
        assert_eq!(store.state().user.as_deref(), Some("ada"));
    }

    #[test]
    fn test_unchanged_state_does_not_notify() {
        let mut store = Store::new(Session::default(), reducer);
        let handle = handle_for(&store);

        assert!(!store.dispatch(SessionAction::SignOut));
        assert!(!handle.state.has_changed().unwrap());

        store.dispatch(SessionAction::Visit);
        assert!(handle.state.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_select_emits_current_then_distinct_changes() {
        let mut store = Store::new(Session::default(), reducer);
        let users = handle_for(&store).select(|s: &Session| s.user.clone());
        tokio::pin!(users);

        assert_eq!(users.next().await, Some(None));

        // Visits do not touch the selected slice
        store.dispatch(SessionAction::Visit);
        store.dispatch(SessionAction::SignIn("ada".into()));
        assert_eq!(users.next().await, Some(Some("ada".to_string())));

        store.dispatch(SessionAction::Visit);
        let quiet = tokio::time::timeout(Duration::from_millis(20), users.next()).await;
        assert!(quiet.is_err(), "unchanged slice should not emit");
    }

    #[test]
    fn test_handle_dispatch_is_queued_not_reduced() {
        let store = Store::new(Session::default(), reducer);
        let (tx, mut rx) = mpsc::unbounded_channel();

        store.handle(tx).dispatch(SessionAction::Visit).unwrap();

        assert!(matches!(rx.try_recv(), Ok(SessionAction::Visit)));
        assert_eq!(store.state().visits, 0);
    }

    #[test]
    fn test_handle_dispatch_after_loop_exit() {
        let store = Store::new(Session::default(), reducer);
        let handle = handle_for(&store);

        let err = handle.dispatch(SessionAction::SignOut).unwrap_err();
        assert!(matches!(err, StoreError::Closed("SignOut")));
    }

    #[test]
    fn test_snapshot_sees_latest_state() {
        let mut store = Store::new(Session::default(), reducer);
        let handle = handle_for(&store);

        store.dispatch(SessionAction::SignIn("grace".into()));

        assert_eq!(handle.snapshot(|s| s.user.clone()).as_deref(), Some("grace"));
    }

    #[derive(Default)]
    struct Recorder {
        seen: Vec<(&'static str, bool)>,
    }

    impl Middleware<SessionAction> for Recorder {
        fn before(&mut self, _action: &SessionAction) {}

        fn after(&mut self, action: &SessionAction, changed: bool) {
            self.seen.push((action.name(), changed));
        }
    }

    #[test]
    fn test_middleware_sees_outcome() {
        let mut store = StoreWithMiddleware::new(Session::default(), reducer, Recorder::default());

        store.dispatch(SessionAction::Visit);
        store.dispatch(SessionAction::SignOut);

        assert_eq!(store.middleware().seen, vec![("Visit", true), ("SignOut", false)]);
        assert_eq!(store.state().visits, 1);
    }

    #[test]
    fn test_logging_middleware_counts() {
        let mut store =
            StoreWithMiddleware::new(Session::default(), reducer, LoggingMiddleware::new());

        store.dispatch(SessionAction::Visit);
        store.dispatch(SessionAction::Visit);

        assert_eq!(store.middleware().reduced(), 2);
    }
}
