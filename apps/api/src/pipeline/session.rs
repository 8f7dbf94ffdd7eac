use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::info;
use uuid::Uuid;

use super::Pipeline;

/// One HTTP client's pipeline plus bookkeeping for idle eviction.
pub struct Session {
    pub pipeline: Pipeline,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    fn new(pipeline: Pipeline) -> Self {
        let now = Utc::now();
        Self {
            pipeline,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

pub type SessionHandle = Arc<Mutex<Session>>;

/// In-memory session map. Sessions idle for longer than `ttl` are dropped
/// whenever a new one is inserted.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn insert(&self, pipeline: Pipeline) -> (Uuid, SessionHandle) {
        let id = Uuid::new_v4();
        let handle = Arc::new(Mutex::new(Session::new(pipeline)));

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        let max_idle = chrono::Duration::from_std(self.ttl).unwrap_or(chrono::Duration::days(1));
        let cutoff = Utc::now() - max_idle;
        // A session that is locked is in use and therefore not idle.
        sessions.retain(|_, session| match session.try_lock() {
            Ok(s) => s.updated_at >= cutoff,
            Err(_) => true,
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(evicted, "Evicted idle sessions");
        }

        sessions.insert(id, handle.clone());
        (id, handle)
    }

    pub async fn get(&self, id: &Uuid) -> Option<SessionHandle> {
        self.sessions.read().await.get(id).cloned()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
