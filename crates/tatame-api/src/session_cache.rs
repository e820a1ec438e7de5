//! TTL cache of verified bearer tokens.
//!
//! Token verification is a round-trip to the identity provider; caching the
//! result for a few minutes keeps request latency sane. Logout evicts the
//! entry, so a signed-out token stops resolving here immediately rather than
//! at TTL expiry.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::RwLock;

use tatame_store::Identity;

struct CacheEntry {
    identity: Identity,
    verified_at: Instant,
}

/// In-memory verification cache, shared across handlers via `Clone`.
#[derive(Clone)]
pub struct SessionCache {
    inner: Arc<RwLock<HashMap<String, CacheEntry>>>,
    ttl: Duration,
}

impl SessionCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Look up a still-fresh verification for `token`.
    pub async fn get(&self, token: &str) -> Option<Identity> {
        let cache = self.inner.read().await;
        cache
            .get(token)
            .filter(|e| e.verified_at.elapsed() < self.ttl)
            .map(|e| e.identity.clone())
    }

    pub async fn insert(&self, token: String, identity: Identity) {
        let mut cache = self.inner.write().await;
        // Expired entries pile up only as fast as distinct tokens arrive;
        // sweep opportunistically on write.
        cache.retain(|_, e| e.verified_at.elapsed() < self.ttl);
        cache.insert(
            token,
            CacheEntry {
                identity,
                verified_at: Instant::now(),
            },
        );
    }

    pub async fn evict(&self, token: &str) {
        let mut cache = self.inner.write().await;
        cache.remove(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(uid: &str) -> Identity {
        Identity {
            uid: uid.into(),
            email: format!("{uid}@example.com"),
        }
    }

    #[tokio::test]
    async fn caches_and_returns_identity() {
        let cache = SessionCache::new(Duration::from_secs(60));
        cache.insert("tok".into(), identity("u1")).await;
        assert_eq!(cache.get("tok").await.unwrap().uid, "u1");
        assert!(cache.get("other").await.is_none());
    }

    #[tokio::test]
    async fn expired_entries_miss() {
        let cache = SessionCache::new(Duration::ZERO);
        cache.insert("tok".into(), identity("u1")).await;
        assert!(cache.get("tok").await.is_none());
    }

    #[tokio::test]
    async fn evict_removes_entry() {
        let cache = SessionCache::new(Duration::from_secs(60));
        cache.insert("tok".into(), identity("u1")).await;
        cache.evict("tok").await;
        assert!(cache.get("tok").await.is_none());
    }
}
