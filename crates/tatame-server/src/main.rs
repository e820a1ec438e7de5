//! # Tatame Server
//!
//! The academy's membership API: registration and login proxied to the
//! hosted identity provider, member records in the hosted document store,
//! and the payment ledger in between.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tatame_api::{build_router, session_cache::SessionCache, AppState};
use tatame_ledger::Ledger;
use tatame_store::{HostedIdentity, HostedStore, IdentityProvider, MemberStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = tatame_common::config::init()?;

    // Initialize tracing (structured logging)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tatame=debug,tower_http=debug".into()),
        )
        .with_target(true)
        .init();

    tracing::info!("🥋 Starting Tatame v{}", env!("CARGO_PKG_VERSION"));

    let identity: Arc<dyn IdentityProvider> = Arc::new(HostedIdentity::new(&config.identity));
    let store: Arc<dyn MemberStore> = Arc::new(HostedStore::new(&config.store));
    tracing::info!(
        "📒 Record store: {} (collection '{}')",
        config.store.base_url,
        config.store.collection
    );

    let state = AppState {
        identity,
        store: store.clone(),
        ledger: Ledger::new(store),
        sessions: SessionCache::new(Duration::from_secs(config.session.verify_ttl_secs)),
    };

    let router = build_router(state);
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    tracing::info!("📡 REST API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
