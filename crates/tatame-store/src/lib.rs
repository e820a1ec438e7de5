//! # tatame-store
//!
//! Clients for the two hosted collaborators Tatame delegates to:
//! - **Identity provider** — sign-up, sign-in, password reset, token
//!   verification. Never implemented here, only consumed.
//! - **Member record store** — a document store keyed by `uid`, one document
//!   per member, with revision-conditional partial updates.
//!
//! Both sit behind traits so the ledger and the API layer are independent of
//! the wire; [`memory::MemoryStore`] backs tests.

pub mod hosted;
pub mod identity;
pub mod memory;

pub use hosted::HostedStore;
pub use identity::{HostedIdentity, Identity, IdentityProvider, Session};
pub use memory::MemoryStore;

use async_trait::async_trait;
use tatame_common::error::TatameResult;
use tatame_common::models::member::{Member, PaymentPatch};

/// Opaque document revision observed at read time.
///
/// Writes that carry a stale revision are rejected by the store, which is how
/// payment transitions for one member stay serialized without any lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision(String);

impl Revision {
    pub fn new(rev: impl Into<String>) -> Self {
        Self(rev.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A member document together with the revision it was read at.
#[derive(Debug, Clone)]
pub struct Stored {
    pub member: Member,
    pub revision: Revision,
}

/// Document store holding one record per member, keyed by `uid`.
#[async_trait]
pub trait MemberStore: Send + Sync {
    /// Fetch one member document, or `None` if it doesn't exist.
    async fn get(&self, uid: &str) -> TatameResult<Option<Stored>>;

    /// Create or replace a member document.
    async fn put(&self, member: &Member) -> TatameResult<()>;

    /// Apply a payment patch iff the document is still at `expected`.
    ///
    /// A revision mismatch surfaces `ConcurrentModification`; the caller
    /// decides whether to re-read or report "please retry".
    async fn update_payment(
        &self,
        uid: &str,
        expected: &Revision,
        patch: &PaymentPatch,
    ) -> TatameResult<Member>;

    /// Fetch the whole collection. The roster is small and re-fetched on each
    /// admin view entry; there is no pagination.
    async fn list_all(&self) -> TatameResult<Vec<Member>>;
}
