//! Per-member serialization of balance mutation.
//!
//! There is no optimistic-concurrency token on accounts, so concurrent
//! contribution and withdrawal requests against the same member are
//! serialized through a keyed mutex instead. Lock granularity is the
//! member id: every pension account belongs to exactly one member.

use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use uuid::Uuid;

/// Keyed mutex over member ids.
#[derive(Default)]
pub struct AccountLocks {
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl AccountLocks {
    /// Creates an empty lock table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` while holding the member's lock.
    pub fn with_lock<R>(&self, member_id: Uuid, f: impl FnOnce() -> R) -> R {
        let cell = self
            .locks
            .entry(member_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        // A poisoned lock only means another mutation panicked; the
        // store session it held was rolled back on drop.
        let _guard = cell.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        f()
    }
}
