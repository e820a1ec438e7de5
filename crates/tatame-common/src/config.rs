//! Application configuration loaded from environment variables and config files.
//!
//! Supports `.env` files for development and environment variables for production.
//! Config precedence: env vars > .env file > config.toml > defaults

use serde::Deserialize;
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Get the global application configuration.
///
/// # Panics
/// Panics if config has not been initialized via [`init`].
pub fn get() -> &'static AppConfig {
    CONFIG
        .get()
        .expect("Config not initialized. Call tatame_common::config::init() first.")
}

/// Initialize the global configuration from environment.
///
/// Should be called once at application startup, before any other code accesses config.
pub fn init() -> Result<&'static AppConfig, config::ConfigError> {
    // Load .env file if present (development)
    let _ = dotenvy::dotenv();

    let cfg = config::Config::builder()
        // Defaults
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("identity.timeout_secs", 10)?
        .set_default("store.collection", "data-users")?
        .set_default("store.timeout_secs", 10)?
        .set_default("session.verify_ttl_secs", 300)? // 5 min
        // Optional config file
        .add_source(config::File::with_name("config").required(false))
        // Environment variables (TATAME_SERVER__HOST, TATAME_IDENTITY__API_KEY, etc.)
        .add_source(
            config::Environment::with_prefix("TATAME")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = cfg.try_deserialize()?;
    Ok(CONFIG.get_or_init(|| app_config))
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub identity: IdentityConfig,
    pub store: StoreConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Hosted identity provider — authenticates members, issues bearer tokens.
#[derive(Debug, Deserialize, Clone)]
pub struct IdentityConfig {
    /// Base URL of the provider's REST endpoint.
    pub base_url: String,
    /// Project API key, sent as a query parameter on every call.
    pub api_key: String,
    /// Outbound request timeout.
    pub timeout_secs: u64,
}

/// Hosted document store holding one record per member.
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Base URL of the store's REST endpoint.
    pub base_url: String,
    /// Bearer key for store access.
    pub api_key: String,
    /// Collection holding member documents.
    pub collection: String,
    /// Outbound request timeout.
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// How long a verified bearer token is cached before re-verification.
    pub verify_ttl_secs: u64,
}
