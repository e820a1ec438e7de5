//! Per-request session context.
//!
//! No ambient session globals anywhere: the context is an explicit value,
//! built once per request after the role lookup completes, passed into the
//! gate and the ledger, dropped when the request ends.

use tatame_common::models::member::{Member, Role};
use tatame_store::Identity;

use crate::access::{resolve_access, AccessDecision};

/// A fully resolved session: verified identity plus the member's role.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub identity: Identity,
    pub role: Role,
}

impl SessionContext {
    /// Bind a verified identity to its member record. This is the only way to
    /// obtain a context, so a context in hand means the role lookup is done.
    pub fn resolve(identity: Identity, member: &Member) -> Self {
        Self {
            identity,
            role: member.role,
        }
    }

    pub fn uid(&self) -> &str {
        &self.identity.uid
    }

    /// The access decision for this session.
    pub fn decision(&self) -> AccessDecision {
        match resolve_access(Some(&self.identity), Some(self.role)) {
            Some(decision) => decision,
            // Both inputs are present by construction.
            None => AccessDecision::Denied,
        }
    }
}
