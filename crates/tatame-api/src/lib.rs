//! # tatame-api
//!
//! REST API layer for Tatame. Thin by design: authentication is proxied to
//! the hosted identity provider, persistence to the hosted record store, and
//! the payment policy lives in `tatame-ledger`. The routes wire those three
//! together and nothing more.

pub mod middleware;
pub mod routes;
pub mod session_cache;

use axum::Router;
use chrono::NaiveDate;
use std::sync::Arc;

use tatame_ledger::Ledger;
use tatame_store::{IdentityProvider, MemberStore};

use session_cache::SessionCache;

/// Shared application state available to all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// Hosted identity provider — sign-in, sign-up, token verification.
    pub identity: Arc<dyn IdentityProvider>,
    /// Hosted member record store.
    pub store: Arc<dyn MemberStore>,
    /// The payment ledger over that store.
    pub ledger: Ledger,
    /// TTL cache of verified bearer tokens; logout evicts from here.
    pub sessions: SessionCache,
}

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let state = Arc::new(state);

    let public = Router::new()
        .merge(routes::auth::router())
        .merge(routes::health::router());

    let protected = Router::new()
        .merge(routes::auth::protected_router())
        .merge(routes::session::router())
        .merge(routes::dashboard::router())
        .merge(routes::admin::router())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ));

    Router::new()
        .nest("/api/v1", public.merge(protected))
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(tower_http::compression::CompressionLayer::new())
        .with_state(state)
}

/// Calendar date of the call, day granularity. Payment dates follow the
/// academy's wall clock, as they did when the front desk stamped them.
pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
