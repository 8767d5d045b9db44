//! Re-entrancy guard for walks over possibly cyclic values.
//!
//! Applied calls and slots can reach themselves through their own
//! arguments. Walks that descend into them (rendering, snapshotting) enter a
//! guard keyed by the instance identity; re-entering an identity that is
//! already in progress on the current thread fails instead of recursing.

use std::cell::RefCell;

use rustc_hash::FxHashSet;

thread_local! {
    /// Identities currently being walked on this thread.
    static IN_PROGRESS: RefCell<FxHashSet<usize>> = RefCell::new(FxHashSet::default());
}

/// Marks an identity as in progress until dropped.
pub(crate) struct RecursionGuard {
    identity: usize,
}

impl RecursionGuard {
    /// Enters `identity`, or returns `None` if it is already in progress.
    pub(crate) fn enter(identity: usize) -> Option<Self> {
        IN_PROGRESS
            .with(|in_progress| in_progress.borrow_mut().insert(identity))
            .then_some(Self { identity })
    }
}

impl Drop for RecursionGuard {
    fn drop(&mut self) {
        IN_PROGRESS.with(|in_progress| {
            in_progress.borrow_mut().remove(&self.identity);
        });
    }
}
