//! Embed preview service
//!
//! Composes the metadata fetcher, the video resolver and the renderer into the
//! per-request pipeline. Upstream calls run strictly one after another under a
//! single deadline.

use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, error};

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{ContentRecord, MediaKind};
use crate::preview::{PreviewRenderer, PreviewRequest};
use crate::sources::{OembedClient, ScrapePatterns, VideoSourceResolver};

/// Request-independent pieces of the preview pipeline
#[derive(Debug, Clone)]
pub struct EmbedService {
    oembed: OembedClient,
    resolver: VideoSourceResolver,
    renderer: PreviewRenderer,
    request_timeout: Duration,
}

impl EmbedService {
    pub fn new(
        oembed: OembedClient,
        resolver: VideoSourceResolver,
        renderer: PreviewRenderer,
        request_timeout: Duration,
    ) -> Self {
        Self {
            oembed,
            resolver,
            renderer,
            request_timeout,
        }
    }

    /// Build the shared HTTP client and scraping patterns from configuration
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(config.upstream.user_agent.as_str())
            .connect_timeout(config.upstream.connect_timeout)
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        let patterns = ScrapePatterns::new(&config.upstream.video_backend_url).map_err(|e| {
            AppError::configuration(format!(
                "Invalid video backend URL '{}': {e}",
                config.upstream.video_backend_url
            ))
        })?;

        Ok(Self::new(
            OembedClient::new(
                client.clone(),
                config.upstream.oembed_endpoint.clone(),
                config.upstream.source_base_url.clone(),
            ),
            VideoSourceResolver::new(client, Arc::new(patterns)),
            PreviewRenderer::new(config.site.clone()),
            config.web.request_timeout,
        ))
    }

    /// Produce the preview document for a content path
    pub async fn render_embed(&self, path: &str, user_agent: &str, stay: bool) -> AppResult<String> {
        let canonical_url = self.oembed.canonical_url(path);

        let record = timeout(self.request_timeout, self.load_record(&canonical_url))
            .await
            .map_err(|_| {
                error!(
                    "Preview for {} exceeded the {:?} deadline",
                    canonical_url, self.request_timeout
                );
                AppError::DeadlineExceeded(self.request_timeout)
            })??;

        let request = PreviewRequest {
            canonical_url,
            user_agent: user_agent.to_string(),
            stay,
        };

        self.renderer.render(&record, &request).inspect_err(|e| {
            error!("Failed to render preview for {}: {}", request.canonical_url, e);
        })
    }

    async fn load_record(&self, canonical_url: &str) -> AppResult<ContentRecord> {
        let mut record = self.oembed.fetch(canonical_url).await?;

        if record.is_video() && !self.resolver.try_resolve(&mut record).await {
            debug!("Rendering {} as an image", canonical_url);
            record.kind = MediaKind::Image;
        }

        Ok(record)
    }
}
