//! Registry of active poll sessions
//!
//! Maps each polled job to the id of the session tracking it. Entries are
//! only ever removed by the session that owns them, so a session that ends
//! late can never release a newer session's claim on the same job.

use gencertify_core::domain::job::JobHandle;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub(crate) struct SessionRegistry {
    sessions: Arc<Mutex<HashMap<JobHandle, Uuid>>>,
}

impl SessionRegistry {
    /// Claims `handle` for `session_id`. Returns false if another session holds it.
    pub(crate) fn claim(&self, handle: &JobHandle, session_id: Uuid) -> bool {
        let mut sessions = self.lock();
        if sessions.contains_key(handle) {
            return false;
        }
        sessions.insert(handle.clone(), session_id);
        true
    }

    /// Releases `handle` if `session_id` still holds it
    pub(crate) fn release(&self, handle: &JobHandle, session_id: Uuid) -> bool {
        let mut sessions = self.lock();
        if sessions.get(handle) == Some(&session_id) {
            sessions.remove(handle);
            return true;
        }
        false
    }

    pub(crate) fn contains(&self, handle: &JobHandle) -> bool {
        self.lock().contains_key(handle)
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<JobHandle, Uuid>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
