//! In-memory session store. Sessions are keyed by UUID, live for the
//! conversation, and vanish with the process — there is no persistence.
//!
//! Each session sits behind its own async mutex so a turn (which awaits the
//! completion service) serializes per conversation without blocking others.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::screening::session::Session;

type SharedSession = Arc<tokio::sync::Mutex<Session>>;

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<Uuid, SharedSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a fresh session and returns its id.
    pub fn insert(&self, session: Session) -> Uuid {
        let id = session.id;
        self.inner
            .lock()
            .expect("session store poisoned")
            .insert(id, Arc::new(tokio::sync::Mutex::new(session)));
        id
    }

    /// Handle to one session, if it exists.
    pub fn get(&self, id: Uuid) -> Option<SharedSession> {
        self.inner
            .lock()
            .expect("session store poisoned")
            .get(&id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("session store poisoned").len()
    }
}
