//! In-memory member store.
//!
//! Backs the ledger and API tests, and serves as the reference semantics for
//! the conditional-update contract: a write with a stale revision must fail
//! with `ConcurrentModification`, never clobber.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use tatame_common::error::{TatameError, TatameResult};
use tatame_common::models::member::{Member, PaymentPatch};

use crate::{MemberStore, Revision, Stored};

struct Entry {
    member: Member,
    version: u64,
}

/// Thread-safe in-memory implementation of [`MemberStore`].
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<String, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a member directly, bypassing registration. Handy for tests and
    /// for provisioning admin records.
    pub async fn seed(&self, member: Member) {
        let mut inner = self.inner.write().await;
        inner.insert(
            member.uid.clone(),
            Entry { member, version: 0 },
        );
    }
}

#[async_trait]
impl MemberStore for MemoryStore {
    async fn get(&self, uid: &str) -> TatameResult<Option<Stored>> {
        let inner = self.inner.read().await;
        Ok(inner.get(uid).map(|e| Stored {
            member: e.member.clone(),
            revision: Revision::new(e.version.to_string()),
        }))
    }

    async fn put(&self, member: &Member) -> TatameResult<()> {
        let mut inner = self.inner.write().await;
        let version = inner.get(&member.uid).map(|e| e.version + 1).unwrap_or(0);
        inner.insert(
            member.uid.clone(),
            Entry {
                member: member.clone(),
                version,
            },
        );
        Ok(())
    }

    async fn update_payment(
        &self,
        uid: &str,
        expected: &Revision,
        patch: &PaymentPatch,
    ) -> TatameResult<Member> {
        let mut inner = self.inner.write().await;
        let entry = inner.get_mut(uid).ok_or_else(|| TatameError::NotFound {
            resource: "Member".into(),
        })?;

        if entry.version.to_string() != expected.as_str() {
            return Err(TatameError::ConcurrentModification);
        }

        entry.member.apply(patch);
        entry.version += 1;
        Ok(entry.member.clone())
    }

    async fn list_all(&self) -> TatameResult<Vec<Member>> {
        let inner = self.inner.read().await;
        Ok(inner.values().map(|e| e.member.clone()).collect())
    }
}
