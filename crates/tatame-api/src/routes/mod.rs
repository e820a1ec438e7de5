pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod session;

use tatame_common::error::{TatameError, TatameResult};
use tatame_common::models::member::Member;
use tatame_ledger::SessionContext;

use crate::middleware::AuthContext;
use crate::AppState;

/// Bind a verified identity to its member record, yielding the session
/// context the gate and the ledger work with.
pub(crate) async fn resolve_session(
    state: &AppState,
    auth: &AuthContext,
) -> TatameResult<(SessionContext, Member)> {
    let stored = state
        .store
        .get(&auth.identity.uid)
        .await?
        .ok_or_else(|| TatameError::NotFound {
            resource: "Member".into(),
        })?;
    let ctx = SessionContext::resolve(auth.identity.clone(), &stored.member);
    Ok((ctx, stored.member))
}
