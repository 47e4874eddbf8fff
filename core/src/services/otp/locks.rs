//! Keyed lock table serializing lifecycle operations per phone number

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Table size past which idle entries are pruned
const PRUNE_THRESHOLD: usize = 1024;

/// One async mutex per phone number
///
/// The outer std mutex only guards the table lookup; it is never held
/// across an await. Distinct phones never contend on the inner locks.
pub struct PhoneLocks {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
    prune_threshold: usize,
}

impl PhoneLocks {
    pub fn new() -> Self {
        Self::with_prune_threshold(PRUNE_THRESHOLD)
    }

    pub fn with_prune_threshold(prune_threshold: usize) -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
            prune_threshold,
        }
    }

    /// Acquire the exclusive section for `phone`
    ///
    /// The guard releases the section when dropped.
    pub async fn lock(&self, phone: &str) -> OwnedMutexGuard<()> {
        let entry = {
            let mut locks = self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            if locks.len() >= self.prune_threshold {
                // An entry held only by the table has no waiter or owner.
                locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            }
            locks
                .entry(phone.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };
        entry.lock_owned().await
    }

    /// Number of phones currently in the table
    pub fn tracked(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

impl Default for PhoneLocks {
    fn default() -> Self {
        Self::new()
    }
}
