//! Administrator routes — the member roster and payment confirmation.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use tatame_common::error::{TatameError, TatameResult};
use tatame_common::models::member::MemberView;
use tatame_ledger::SessionContext;

use crate::{middleware::AuthContext, routes::resolve_session, today, AppState};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/members", get(list_members))
        .route("/admin/members/{uid}/payment", post(confirm_payment))
}

#[derive(Deserialize)]
struct RosterQuery {
    #[serde(default)]
    q: String,
}

async fn require_admin(
    state: &AppState,
    auth: &AuthContext,
) -> TatameResult<SessionContext> {
    let (ctx, _) = resolve_session(state, auth).await?;
    if !ctx.role.is_admin() {
        return Err(TatameError::Unauthorized);
    }
    Ok(ctx)
}

/// GET /api/v1/admin/members?q=
///
/// The full roster, re-fetched on every entry: lazy expiry per record,
/// admins excluded, optional case-insensitive name/nickname filter.
async fn list_members(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<RosterQuery>,
) -> TatameResult<Json<Vec<MemberView>>> {
    let ctx = require_admin(&state, &auth).await?;

    let members = state.ledger.roster(&ctx, &query.q, today()).await?;
    Ok(Json(members.into_iter().map(MemberView::from).collect()))
}

/// POST /api/v1/admin/members/{uid}/payment
///
/// Confirms an awaiting payment. The stored date stays the initiation date.
async fn confirm_payment(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(uid): Path<String>,
) -> TatameResult<Json<MemberView>> {
    let ctx = require_admin(&state, &auth).await?;

    let member = state.ledger.confirm_payment(&ctx, &uid).await?;
    Ok(Json(member.into()))
}
