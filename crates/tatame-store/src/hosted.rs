//! Hosted record store client.
//!
//! The store is a plain document API: one collection, one document per
//! member, `ETag` revisions. Conditional PATCH with `If-Match` is the only
//! mutation discipline — a `412` means someone else moved the record first.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, ETAG, IF_MATCH};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::warn;

use tatame_common::config::StoreConfig;
use tatame_common::error::{TatameError, TatameResult};
use tatame_common::models::member::{Member, PaymentPatch};

use crate::{MemberStore, Revision, Stored};

/// Async HTTP client for the hosted document store.
pub struct HostedStore {
    http: Client,
    base_url: String,
    collection: String,
}

impl HostedStore {
    pub fn new(config: &StoreConfig) -> Self {
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {}", config.api_key);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&bearer).expect("store api key is not a valid header value"),
        );

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("Tatame/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .expect("failed to build store http client");

        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            collection: config.collection.clone(),
        }
    }

    fn doc_url(&self, uid: &str) -> String {
        format!("{}/v1/{}/{}", self.base_url, self.collection, uid)
    }

    fn collection_url(&self) -> String {
        format!("{}/v1/{}", self.base_url, self.collection)
    }
}

#[async_trait]
impl MemberStore for HostedStore {
    async fn get(&self, uid: &str) -> TatameResult<Option<Stored>> {
        let resp = self.http.get(self.doc_url(uid)).send().await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = resp.error_for_status()?;

        let revision = resp
            .headers()
            .get(ETAG)
            .and_then(|v| v.to_str().ok())
            .map(Revision::new)
            .ok_or_else(|| {
                TatameError::Internal(anyhow::anyhow!("store response missing ETag for {uid}"))
            })?;

        let member = resp.json::<Member>().await?;
        Ok(Some(Stored { member, revision }))
    }

    async fn put(&self, member: &Member) -> TatameResult<()> {
        self.http
            .put(self.doc_url(&member.uid))
            .json(member)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn update_payment(
        &self,
        uid: &str,
        expected: &Revision,
        patch: &PaymentPatch,
    ) -> TatameResult<Member> {
        let resp = self
            .http
            .patch(self.doc_url(uid))
            .header(IF_MATCH, expected.as_str())
            .json(patch)
            .send()
            .await?;

        match resp.status() {
            StatusCode::PRECONDITION_FAILED => {
                warn!(uid, "conditional payment update lost the race");
                Err(TatameError::ConcurrentModification)
            }
            StatusCode::NOT_FOUND => Err(TatameError::NotFound {
                resource: "Member".into(),
            }),
            _ => Ok(resp.error_for_status()?.json::<Member>().await?),
        }
    }

    async fn list_all(&self) -> TatameResult<Vec<Member>> {
        let resp = self
            .http
            .get(self.collection_url())
            .send()
            .await?
            .error_for_status()?;

        let listing = resp.json::<CollectionListing>().await?;
        Ok(listing.documents)
    }
}

#[derive(Deserialize)]
struct CollectionListing {
    #[serde(default)]
    documents: Vec<Member>,
}
