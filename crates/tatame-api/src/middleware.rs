//! Middleware — bearer-token authentication against the identity provider.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use tatame_common::error::TatameError;
use tatame_store::Identity;

use crate::AppState;

/// Authentication context extracted from the Authorization header.
///
/// Carries the raw token alongside the verified identity so logout can evict
/// the matching cache entry.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub identity: Identity,
    pub token: String,
}

/// Extract the `Authorization: Bearer <token>` header and verify it with the
/// identity provider, consulting the session cache first.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, TatameError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(TatameError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(TatameError::Unauthorized)?;

    let identity = match state.sessions.get(token).await {
        Some(identity) => identity,
        None => {
            let identity = state.identity.verify(token).await?;
            state
                .sessions
                .insert(token.to_string(), identity.clone())
                .await;
            identity
        }
    };

    let auth_ctx = AuthContext {
        identity,
        token: token.to_string(),
    };

    // Insert auth context into request extensions for handlers to use
    request.extensions_mut().insert(auth_ctx);

    Ok(next.run(request).await)
}
