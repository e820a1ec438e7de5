//! Authentication routes — register, login, password reset, logout.
//!
//! All of these proxy the hosted identity provider; no credential ever gets
//! checked or stored here. Registration additionally writes the member
//! document that the provider knows nothing about.

use axum::{extract::State, http::StatusCode, routing::post, Extension, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use tatame_common::{
    error::TatameResult,
    models::member::{
        LoginRequest, Member, MemberView, PasswordResetRequest, PaymentStatus, RegisterRequest,
        Role,
    },
    validation::validate_request,
};

use crate::{middleware::AuthContext, today, AppState};

/// Public auth router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/password-reset", post(password_reset))
}

/// Auth routes that require a bearer token.
pub fn protected_router() -> Router<Arc<AppState>> {
    Router::new().route("/auth/logout", post(logout))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    member: Option<MemberView>,
    id_token: String,
}

/// POST /api/v1/auth/register
///
/// Creates the identity account, then the member document. Everyone who
/// registers is a student; admins are provisioned directly in the store.
async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> TatameResult<(StatusCode, Json<AuthResponse>)> {
    validate_request(&body)?;

    let session = state.identity.sign_up(&body.email, &body.password).await?;

    let member = Member {
        uid: session.uid.clone(),
        full_name: body.full_name,
        nickname: body.nickname,
        email: body.email,
        belt: body.belt,
        birth_year: body.birth_year,
        birth_month: body.birth_month,
        birth_day: body.birth_day,
        role: Role::Student,
        payment_status: PaymentStatus::Unset,
        payment_date: None,
    };
    state.store.put(&member).await?;

    state
        .sessions
        .insert(
            session.id_token.clone(),
            tatame_store::Identity {
                uid: session.uid.clone(),
                email: session.email.clone(),
            },
        )
        .await;

    tracing::info!(uid = %session.uid, "new member registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            member: Some(member.into()),
            id_token: session.id_token,
        }),
    ))
}

/// POST /api/v1/auth/login
///
/// Proxies sign-in. The member view comes back alongside the token so the
/// client can route without a second round-trip; a missing document degrades
/// to `null` rather than failing the login.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> TatameResult<Json<AuthResponse>> {
    validate_request(&body)?;

    let session = state.identity.sign_in(&body.email, &body.password).await?;

    let member = match state.ledger.load(&session.uid, today()).await {
        Ok(member) => member,
        Err(e) => {
            tracing::error!(uid = %session.uid, "failed to load member record on login: {e}");
            None
        }
    };
    if member.is_none() {
        tracing::warn!(uid = %session.uid, "login without a member record");
    }

    state
        .sessions
        .insert(
            session.id_token.clone(),
            tatame_store::Identity {
                uid: session.uid.clone(),
                email: session.email.clone(),
            },
        )
        .await;

    tracing::info!(uid = %session.uid, "member logged in");

    Ok(Json(AuthResponse {
        member: member.map(MemberView::from),
        id_token: session.id_token,
    }))
}

/// POST /api/v1/auth/password-reset
async fn password_reset(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PasswordResetRequest>,
) -> TatameResult<StatusCode> {
    validate_request(&body)?;
    state.identity.send_password_reset(&body.email).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/auth/logout
///
/// Evicts the verified token from the session cache; the token stops
/// resolving at this service immediately.
async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> StatusCode {
    state.sessions.evict(&auth.token).await;
    tracing::info!(uid = %auth.identity.uid, "member signed out");
    StatusCode::NO_CONTENT
}
