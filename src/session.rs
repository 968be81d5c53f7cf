//! In-memory store of generated question sets, keyed by session id.
//!
//! Each upload gets its own id, so concurrent quiz takers never grade against
//! each other's questions. The most recent set is also reachable without an id.
//! Oldest sets are evicted once `capacity` is exceeded.

use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::domain::Question;

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<Sessions>>,
    capacity: usize,
}

#[derive(Default)]
struct Sessions {
    by_id: HashMap<String, Vec<Question>>,
    /// Insertion order, oldest first. The back is the latest session.
    order: VecDeque<String>,
}

impl SessionStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Sessions::default())),
            capacity: capacity.max(1),
        }
    }

    /// Store a question set under a fresh session id and return the id.
    #[instrument(level = "debug", skip(self, questions), fields(count = questions.len()))]
    pub async fn insert(&self, questions: Vec<Question>) -> String {
        let id = Uuid::new_v4().to_string();
        let mut sessions = self.inner.write().await;
        sessions.by_id.insert(id.clone(), questions);
        sessions.order.push_back(id.clone());
        while sessions.order.len() > self.capacity {
            if let Some(old) = sessions.order.pop_front() {
                sessions.by_id.remove(&old);
                debug!(target: "quiz", session_id = %old, "Evicted oldest session");
            }
        }
        id
    }

    /// Read a session's question set. Reading does not clear it.
    pub async fn get(&self, id: &str) -> Option<Vec<Question>> {
        self.inner.read().await.by_id.get(id).cloned()
    }

    /// The most recently stored question set, if any.
    pub async fn latest(&self) -> Option<Vec<Question>> {
        let sessions = self.inner.read().await;
        let id = sessions.order.back()?;
        sessions.by_id.get(id).cloned()
    }

    /// Number of stored sessions.
    pub async fn count(&self) -> usize {
        self.inner.read().await.by_id.len()
    }
}
