use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

/// Tracks workspaces with a confirm & save in flight so a second one can be
/// refused instead of racing the first against the backend.
#[derive(Clone, Default)]
pub struct PendingSaves {
    inner: Arc<Mutex<HashSet<Uuid>>>,
}

impl PendingSaves {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `id`. Returns `None` when a save for it is already running.
    /// The claim is released when the guard drops.
    pub fn begin(&self, id: Uuid) -> Option<SaveGuard> {
        let mut pending = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        pending.insert(id).then(|| SaveGuard {
            inner: Arc::clone(&self.inner),
            id,
        })
    }

    pub fn is_pending(&self, id: Uuid) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&id)
    }
}

pub struct SaveGuard {
    inner: Arc<Mutex<HashSet<Uuid>>>,
    id: Uuid,
}

impl Drop for SaveGuard {
    fn drop(&mut self) {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.id);
    }
}
