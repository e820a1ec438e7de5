//! Ledger service shell — executes what the pure state machine decides.
//!
//! Every transition is one read-modify-write: load the document, run the pure
//! transition, write the patch conditionally on the revision observed at read
//! time. No lock is taken anywhere; a lost race surfaces as
//! `ConcurrentModification` and is never retried automatically.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use tatame_common::error::{TatameError, TatameResult};
use tatame_common::models::member::Member;
use tatame_store::{MemberStore, Stored};

use crate::session::SessionContext;
use crate::{roster, transition};

/// The membership payment ledger.
#[derive(Clone)]
pub struct Ledger {
    store: Arc<dyn MemberStore>,
}

impl Ledger {
    pub fn new(store: Arc<dyn MemberStore>) -> Self {
        Self { store }
    }

    /// Load one member for display, applying the lazy expiry rule.
    ///
    /// A lapse found here is persisted before the record is returned. If that
    /// conditional write loses its race, someone else already moved the
    /// record — their state wins and is re-read instead of erroring.
    pub async fn load(&self, uid: &str, today: NaiveDate) -> TatameResult<Option<Member>> {
        let Some(stored) = self.store.get(uid).await? else {
            return Ok(None);
        };

        let Some(patch) = transition::check_expiry(&stored.member, today) else {
            return Ok(Some(stored.member));
        };

        match self
            .store
            .update_payment(uid, &stored.revision, &patch)
            .await
        {
            Ok(member) => {
                info!(uid, "confirmed payment lapsed to pending");
                Ok(Some(member))
            }
            Err(TatameError::ConcurrentModification) => {
                Ok(self.store.get(uid).await?.map(|s| s.member))
            }
            Err(e) => Err(e),
        }
    }

    /// Member-initiated payment signal (`unset`/`pending` → `awaiting`).
    pub async fn initiate_payment(&self, uid: &str, today: NaiveDate) -> TatameResult<Member> {
        let stored = self.require(uid).await?;

        // A stale confirmed record is already pending in everything but the
        // stored bytes; derive that before judging the transition.
        let mut member = stored.member;
        if let Some(lapse) = transition::check_expiry(&member, today) {
            member.apply(&lapse);
        }

        let patch = transition::initiate(&member, today)?;
        let updated = self
            .store
            .update_payment(uid, &stored.revision, &patch)
            .await?;
        info!(uid, "payment initiated, awaiting confirmation");
        Ok(updated)
    }

    /// Admin confirmation of an awaiting payment (`awaiting` → `confirmed`).
    pub async fn confirm_payment(
        &self,
        actor: &SessionContext,
        uid: &str,
    ) -> TatameResult<Member> {
        let stored = self.require(uid).await?;
        let patch = transition::confirm(actor.role, &stored.member)?;
        let updated = self
            .store
            .update_payment(uid, &stored.revision, &patch)
            .await?;
        info!(admin = actor.uid(), uid, "payment confirmed");
        Ok(updated)
    }

    /// The admin roster: the whole collection re-fetched, lazy expiry applied
    /// per record, admins excluded, then the optional substring filter.
    pub async fn roster(
        &self,
        actor: &SessionContext,
        query: &str,
        today: NaiveDate,
    ) -> TatameResult<Vec<Member>> {
        if !actor.role.is_admin() {
            return Err(TatameError::Unauthorized);
        }

        let all = self.store.list_all().await?;
        let mut members = Vec::with_capacity(all.len());
        for member in all {
            if transition::check_expiry(&member, today).is_some() {
                // The listing carries no revision; re-load to persist the lapse.
                if let Some(fresh) = self.load(&member.uid, today).await? {
                    members.push(fresh);
                }
            } else {
                members.push(member);
            }
        }

        Ok(roster::filter_by_query(roster::manageable(members), query))
    }

    async fn require(&self, uid: &str) -> TatameResult<Stored> {
        self.store
            .get(uid)
            .await?
            .ok_or_else(|| TatameError::NotFound {
                resource: "Member".into(),
            })
    }
}
