//! Store actions

use std::fmt::Debug;

/// A command the store's reducer understands
///
/// Actions cross the action channel into the main loop (`Send + 'static`)
/// and are cloned for middleware.
pub trait Action: Clone + Debug + Send + 'static {
    /// Variant name, used as a log field and in [`StoreError`](crate::StoreError)
    fn name(&self) -> &'static str;

    /// One-line rendering for trace logs
    ///
    /// Override to keep payloads (or personal data) out of logs.
    fn summary(&self) -> String {
        format!("{:?}", self)
    }
}
