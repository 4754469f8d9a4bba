//! Off-chain metadata document fetching.
//!
//! Unique assets carry a `content_uri` pointing at a JSON document with
//! display fields. The fetch is best-effort: callers fall back to the
//! on-chain base fields when the document is unreachable or malformed.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Hosts serving generated placeholder images, not real metadata documents.
/// URIs pointing there are short-circuited without a network round-trip.
const PLACEHOLDER_HOSTS: &[&str] = &["placehold.co"];

/// The off-chain JSON document referenced by a unique asset's content URI.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataDocument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub attributes: Vec<MetadataAttribute>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetadataAttribute {
    pub trait_type: String,
    pub value: serde_json::Value,
}

/// Whether a URI points at a known placeholder-image host.
pub fn is_placeholder_uri(uri: &str) -> bool {
    PLACEHOLDER_HOSTS.iter().any(|host| uri.contains(host))
}

/// Fetches metadata documents by URI.
pub trait MetadataFetcher: Send + Sync {
    /// Fetch and parse the document at `uri`.
    ///
    /// Returns `Ok(None)` when the URI is a known placeholder with no
    /// document behind it. Network and parse failures are errors; the
    /// caller decides whether to fall back.
    fn fetch(
        &self,
        uri: &str,
    ) -> impl std::future::Future<Output = Result<Option<MetadataDocument>, ClientError>> + Send;
}

/// HTTP fetcher with a hard per-request deadline, so one slow metadata host
/// cannot hold up an asset lookup.
pub struct HttpMetadataFetcher {
    http: reqwest::Client,
    timeout: Duration,
}

impl HttpMetadataFetcher {
    pub fn new(timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(Self { http, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl MetadataFetcher for HttpMetadataFetcher {
    async fn fetch(&self, uri: &str) -> Result<Option<MetadataDocument>, ClientError> {
        if is_placeholder_uri(uri) {
            tracing::debug!(uri, "placeholder URI, skipping metadata fetch");
            return Ok(None);
        }
        let response = self.http.get(uri).send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout(e.to_string())
            } else {
                ClientError::Transport(e.to_string())
            }
        })?;
        if !response.status().is_success() {
            return Err(ClientError::Transport(format!(
                "metadata fetch returned {}",
                response.status()
            )));
        }
        let document = response
            .json::<MetadataDocument>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(Some(document))
    }
}
