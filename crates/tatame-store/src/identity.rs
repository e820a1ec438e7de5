//! Hosted identity provider client.
//!
//! All authentication is delegated: accounts, passwords, and tokens live at
//! the provider. This client only proxies the REST operations the app
//! consumes and maps the provider's error codes onto the local taxonomy.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use tatame_common::config::IdentityConfig;
use tatame_common::error::{TatameError, TatameResult};

/// Verified identity of a caller, as attested by the provider.
#[derive(Debug, Clone)]
pub struct Identity {
    pub uid: String,
    pub email: String,
}

/// Result of a sign-in or sign-up: identity plus the bearer token the client
/// presents on subsequent requests.
#[derive(Debug, Clone)]
pub struct Session {
    pub uid: String,
    pub email: String,
    pub id_token: String,
}

/// Operations consumed from the identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> TatameResult<Session>;
    async fn sign_in(&self, email: &str, password: &str) -> TatameResult<Session>;
    async fn send_password_reset(&self, email: &str) -> TatameResult<()>;
    /// Resolve a bearer token to the identity it belongs to.
    async fn verify(&self, id_token: &str) -> TatameResult<Identity>;
}

/// Async HTTP client for the hosted provider's `accounts:*` endpoints.
pub struct HostedIdentity {
    http: Client,
    base_url: String,
    api_key: String,
}

impl HostedIdentity {
    pub fn new(config: &IdentityConfig) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("Tatame/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build identity http client");

        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    /// `POST {base}/v1/accounts:{op}?key={api_key}`
    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        op: &str,
        body: &impl Serialize,
    ) -> TatameResult<T> {
        let url = format!("{}/v1/accounts:{}?key={}", self.base_url, op, self.api_key);
        let resp = self.http.post(&url).json(body).send().await?;

        if resp.status().is_success() {
            return Ok(resp.json::<T>().await?);
        }

        let code = resp
            .json::<ProviderFailure>()
            .await
            .map(|f| f.error.message)
            .unwrap_or_default();
        debug!(op, code, "identity provider rejected request");
        Err(map_provider_code(&code))
    }
}

#[async_trait]
impl IdentityProvider for HostedIdentity {
    async fn sign_up(&self, email: &str, password: &str) -> TatameResult<Session> {
        let payload: AuthPayload = self
            .post(
                "signUp",
                &json!({
                    "email": email,
                    "password": password,
                    "returnSecureToken": true,
                }),
            )
            .await?;
        Ok(payload.into_session(email))
    }

    async fn sign_in(&self, email: &str, password: &str) -> TatameResult<Session> {
        let payload: AuthPayload = self
            .post(
                "signInWithPassword",
                &json!({
                    "email": email,
                    "password": password,
                    "returnSecureToken": true,
                }),
            )
            .await?;
        Ok(payload.into_session(email))
    }

    async fn send_password_reset(&self, email: &str) -> TatameResult<()> {
        let _: serde_json::Value = self
            .post(
                "sendOobCode",
                &json!({
                    "requestType": "PASSWORD_RESET",
                    "email": email,
                }),
            )
            .await?;
        Ok(())
    }

    async fn verify(&self, id_token: &str) -> TatameResult<Identity> {
        let resp: LookupResponse = self.post("lookup", &json!({ "idToken": id_token })).await?;
        let user = resp.users.into_iter().next().ok_or(TatameError::Unauthorized)?;
        Ok(Identity {
            uid: user.local_id,
            email: user.email.unwrap_or_default(),
        })
    }
}

// ── Wire shapes ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthPayload {
    local_id: String,
    id_token: String,
    email: Option<String>,
}

impl AuthPayload {
    fn into_session(self, fallback_email: &str) -> Session {
        Session {
            uid: self.local_id,
            email: self.email.unwrap_or_else(|| fallback_email.to_string()),
            id_token: self.id_token,
        }
    }
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    email: Option<String>,
}

#[derive(Deserialize)]
struct ProviderFailure {
    error: ProviderFailureBody,
}

#[derive(Deserialize)]
struct ProviderFailureBody {
    #[serde(default)]
    message: String,
}

/// Map the provider's error vocabulary onto the local taxonomy.
fn map_provider_code(code: &str) -> TatameError {
    // Codes sometimes carry a trailing reason, e.g. "TOO_MANY_ATTEMPTS : ...".
    let code = code.split_whitespace().next().unwrap_or_default();
    match code {
        "EMAIL_NOT_FOUND" => TatameError::UserNotFound,
        "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => TatameError::InvalidCredentials,
        "INVALID_EMAIL" | "MISSING_EMAIL" => TatameError::InvalidEmail,
        "EMAIL_EXISTS" => TatameError::AlreadyExists {
            resource: "Account".into(),
        },
        "INVALID_ID_TOKEN" | "TOKEN_EXPIRED" | "USER_DISABLED" => TatameError::Unauthorized,
        other => TatameError::Provider { code: other.into() },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_provider_codes() {
        assert!(matches!(
            map_provider_code("EMAIL_NOT_FOUND"),
            TatameError::UserNotFound
        ));
        assert!(matches!(
            map_provider_code("INVALID_LOGIN_CREDENTIALS"),
            TatameError::InvalidCredentials
        ));
        assert!(matches!(
            map_provider_code("INVALID_EMAIL"),
            TatameError::InvalidEmail
        ));
        assert!(matches!(
            map_provider_code("TOKEN_EXPIRED"),
            TatameError::Unauthorized
        ));
    }

    #[test]
    fn unknown_codes_stay_opaque() {
        let err = map_provider_code("TOO_MANY_ATTEMPTS_TRY_LATER : wait a bit");
        match err {
            TatameError::Provider { code } => assert_eq!(code, "TOO_MANY_ATTEMPTS_TRY_LATER"),
            other => panic!("expected Provider, got {other:?}"),
        }
    }
}
