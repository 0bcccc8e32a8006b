//! Per-course mutual exclusion.
//!
//! All mutations of one course's membership ledger must be serialized;
//! mutations on different courses proceed independently. The registry
//! hands out one async mutex per course id, created lazily on first use.
//! This assumes a single service process in front of the database, which
//! matches the deployment the storage layer (single-writer SQLite) is
//! sized for.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use academy_core::types::DbId;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Registry of per-course locks.
#[derive(Debug, Default)]
pub struct CourseLocks {
    inner: Mutex<HashMap<DbId, Arc<AsyncMutex<()>>>>,
}

impl CourseLocks {
    /// Acquire the lock for `course_id`, waiting if another mutation on
    /// the same course holds it. The guard is released on drop.
    pub async fn acquire(&self, course_id: DbId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut registry = self.inner.lock().expect("course lock registry poisoned");
            Arc::clone(registry.entry(course_id).or_default())
        };
        lock.lock_owned().await
    }
}
