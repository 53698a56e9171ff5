//! TTL-bounded store for completed search sessions
//!
//! Every search parks its session here under a fresh key; path explanations
//! look the session up again by that key. Expired entries are dropped
//! lazily on insert, so the store never needs a background task.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use papergraph_core::SearchSession;
use tokio::sync::RwLock;
use uuid::Uuid;

struct SessionEntry {
    session: SearchSession,
    created_at: Instant,
}

/// Keyed store of recent search sessions
pub struct SessionStore {
    ttl: Duration,
    capacity: usize,
    entries: RwLock<HashMap<String, SessionEntry>>,
}

impl SessionStore {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            ttl,
            capacity,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Park a session and hand back its key
    pub async fn insert(&self, session: SearchSession) -> String {
        let key = Uuid::new_v4().to_string();
        let mut entries = self.entries.write().await;

        entries.retain(|_, entry| entry.created_at.elapsed() < self.ttl);
        if entries.len() >= self.capacity {
            // still full after dropping expired entries, evict the oldest
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.created_at)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
            }
        }

        entries.insert(
            key.clone(),
            SessionEntry {
                session,
                created_at: Instant::now(),
            },
        );
        key
    }

    /// Look up a live session by key
    pub async fn get(&self, key: &str) -> Option<SearchSession> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.created_at.elapsed() >= self.ttl {
            return None;
        }
        Some(entry.session.clone())
    }

    /// Number of parked sessions, expired ones included
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
