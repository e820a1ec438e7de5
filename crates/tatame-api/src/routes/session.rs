//! Session resolution — the route guard's server half.
//!
//! The client calls this after (re)authenticating to learn which surface to
//! present: student dashboard, admin panel, or back to login.

use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use tatame_common::error::TatameResult;
use tatame_common::models::member::MemberView;
use tatame_ledger::AccessDecision;

use crate::{middleware::AuthContext, routes::resolve_session, AppState};

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/session", get(current_session))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionResponse {
    decision: &'static str,
    member: MemberView,
}

/// GET /api/v1/session
async fn current_session(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> TatameResult<Json<SessionResponse>> {
    let (ctx, member) = resolve_session(&state, &auth).await?;

    let decision = match ctx.decision() {
        AccessDecision::GrantStudent => "student",
        AccessDecision::RedirectAdmin => "admin",
        AccessDecision::Denied => "denied",
    };

    Ok(Json(SessionResponse {
        decision,
        member: member.into(),
    }))
}
