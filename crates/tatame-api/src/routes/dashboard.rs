//! Student dashboard routes — own record display and payment initiation.

use axum::{extract::State, routing::{get, post}, Extension, Json, Router};
use std::sync::Arc;

use tatame_common::error::{TatameError, TatameResult};
use tatame_common::models::member::MemberView;
use tatame_ledger::{AccessDecision, SessionContext};

use crate::{middleware::AuthContext, today, AppState};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/dashboard/payment", post(initiate_payment))
}

/// GET /api/v1/dashboard
///
/// The caller's own record, with the lazy expiry rule applied on read. An
/// admin never gets this view.
async fn dashboard(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> TatameResult<Json<MemberView>> {
    let member = state
        .ledger
        .load(&auth.identity.uid, today())
        .await?
        .ok_or_else(|| TatameError::NotFound {
            resource: "Member".into(),
        })?;

    let ctx = SessionContext::resolve(auth.identity.clone(), &member);
    if ctx.decision() != AccessDecision::GrantStudent {
        return Err(TatameError::Unauthorized);
    }

    Ok(Json(member.into()))
}

/// POST /api/v1/dashboard/payment
///
/// The member signals they have paid; the record moves to `awaiting` with
/// today's date and waits for an admin to confirm.
async fn initiate_payment(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> TatameResult<Json<MemberView>> {
    let (ctx, _) = crate::routes::resolve_session(&state, &auth).await?;
    if ctx.decision() != AccessDecision::GrantStudent {
        return Err(TatameError::Unauthorized);
    }

    let member = state
        .ledger
        .initiate_payment(ctx.uid(), today())
        .await?;

    Ok(Json(member.into()))
}
