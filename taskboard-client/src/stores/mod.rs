/// Reactive client-side stores
///
/// One store per server resource, plus the session store. Each resource
/// store keeps an in-memory cache of the collection (and, where the UI needs
/// it, a "current" detail pointer) and patches that cache from the server
/// response of every mutation.
///
/// # Stores
///
/// - `session`: Bearer token + current user, login/logout/restore
/// - `workspaces`: Workspace collection, detail with members
/// - `projects`: Project collection, optionally scoped to a workspace
/// - `tasks`: Task collection with kanban board grouping and drag-and-drop
/// - `documents`: Project documents
///
/// # Caching model
///
/// The caches are mirrors, not sources of truth. Stores never retry, never
/// deduplicate concurrent requests, and never reconcile staleness: a failed
/// call propagates its error and leaves the cache as it was, and concurrent
/// fetches of the same collection land in last-response-wins order.

pub mod documents;
pub mod projects;
pub mod session;
pub mod tasks;
pub mod workspaces;

use std::sync::atomic::{AtomicBool, Ordering};

/// Raises a store's loading flag for the duration of a fetch
///
/// Dropping the guard lowers the flag again, on the success and the error
/// path alike.
pub(crate) struct LoadingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> LoadingGuard<'a> {
    pub(crate) fn start(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self { flag }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
