//! oEmbed metadata fetcher
//!
//! Turns a request path into a canonical content URL and asks the upstream
//! oEmbed endpoint to describe it. Every failure here is terminal for the
//! request; nothing is retried.

use reqwest::Client;
use tracing::{debug, error};

use crate::errors::{AppResult, UpstreamDecodeError, UpstreamRequestError};
use crate::models::{ContentRecord, OembedDocument};

/// Client for the upstream oEmbed endpoint
#[derive(Debug, Clone)]
pub struct OembedClient {
    client: Client,
    endpoint: String,
    source_base_url: String,
}

impl OembedClient {
    pub fn new(client: Client, endpoint: impl Into<String>, source_base_url: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            source_base_url: source_base_url.into(),
        }
    }

    /// Canonical URL of the content a request path refers to
    pub fn canonical_url(&self, path: &str) -> String {
        format!("{}{}", self.source_base_url.trim_end_matches('/'), path)
    }

    /// Fetch and decode the oEmbed document for `canonical_url`
    pub async fn fetch(&self, canonical_url: &str) -> AppResult<ContentRecord> {
        let request = self
            .client
            .get(&self.endpoint)
            .query(&[("url", canonical_url)])
            .build()
            .map_err(|source| {
                error!("Failed to build oEmbed request for {}: {}", canonical_url, source);
                UpstreamRequestError::Build {
                    url: self.endpoint.clone(),
                    source,
                }
            })?;

        debug!("Fetching oEmbed metadata: {}", request.url());

        let response = self.client.execute(request).await.map_err(|source| {
            error!("oEmbed request for {} failed: {}", canonical_url, source);
            UpstreamRequestError::Transport {
                url: self.endpoint.clone(),
                source,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("oEmbed endpoint returned HTTP {} for {}", status, canonical_url);
            return Err(UpstreamRequestError::Status {
                url: self.endpoint.clone(),
                status: status.as_u16(),
            }
            .into());
        }

        let body = response.bytes().await.map_err(|e| {
            error!("Failed to read oEmbed body for {}: {}", canonical_url, e);
            UpstreamDecodeError::Body(e)
        })?;

        let document: OembedDocument = serde_json::from_slice(&body).map_err(|e| {
            error!("Failed to decode oEmbed body for {}: {}", canonical_url, e);
            UpstreamDecodeError::Schema(e)
        })?;

        Ok(document.into())
    }
}
