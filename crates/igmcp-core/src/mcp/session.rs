//! In-memory session store.
//!
//! An explicit store object with injected lifetime — owned by whichever
//! server instance created it, never process-global — so independent
//! server instances (and tests) each get their own session namespace.
//! Mutated only by the dispatcher's state transitions: insert on
//! initialize, remove on close or transport teardown.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// One live session: opaque identifier bound to a transport connection.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub created_at: DateTime<Utc>,
}

/// Process-wide map of live sessions, identifier → record.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh session and return its identifier. UUIDv4 keeps
    /// identifiers unique among live sessions for the process lifetime.
    pub async fn create(&self) -> String {
        let session = Session {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: Utc::now(),
        };
        let id = session.id.clone();
        self.inner.write().await.insert(id.clone(), session);
        id
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.inner.read().await.contains_key(id)
    }

    /// Remove a session. Returns whether it was live — removing an
    /// already-closed identifier is not an error.
    pub async fn remove(&self, id: &str) -> bool {
        self.inner.write().await.remove(id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_contains_remove_cycle() {
        let store = SessionStore::new();
        assert!(store.is_empty().await);

        let id = store.create().await;
        assert!(store.contains(&id).await);
        assert_eq!(store.len().await, 1);

        assert!(store.remove(&id).await);
        assert!(!store.contains(&id).await);
        // Second remove reports not-live but does not fail.
        assert!(!store.remove(&id).await);
    }

    #[tokio::test]
    async fn test_identifiers_are_unique_across_handshakes() {
        let store = SessionStore::new();
        let mut ids = Vec::new();
        for _ in 0..16 {
            ids.push(store.create().await);
        }
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
        assert_eq!(store.len().await, 16);
    }

    #[tokio::test]
    async fn test_stores_are_independent() {
        let a = SessionStore::new();
        let b = SessionStore::new();
        let id = a.create().await;
        assert!(!b.contains(&id).await);
    }
}
