//! Per-pair mutual exclusion for sync operations

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type PairKey = (PathBuf, PathBuf);

/// Registry of async locks keyed by an unordered pair of paths
#[derive(Debug, Default)]
pub struct PairLocks {
    locks: Mutex<HashMap<PairKey, Arc<AsyncMutex<()>>>>,
}

impl PairLocks {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to the pair `(a, b)`
    ///
    /// `(a, b)` and `(b, a)` share one lock. Access lasts until the guard drops.
    pub async fn lock(&self, a: &Path, b: &Path) -> OwnedMutexGuard<()> {
        let key = pair_key(a, b);
        let lock = {
            let mut locks = self.locks.lock();
            // Entries only referenced by the map are idle.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(key).or_default())
        };

        lock.lock_owned().await
    }

    /// Number of pairs currently tracked
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    /// Check if no pairs are tracked
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn pair_key(a: &Path, b: &Path) -> PairKey {
    if a <= b {
        (a.to_path_buf(), b.to_path_buf())
    } else {
        (b.to_path_buf(), a.to_path_buf())
    }
}
