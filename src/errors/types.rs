//! Error type definitions for the preview proxy
//!
//! Errors are split by how far they are allowed to travel: request-terminal
//! errors live under [`AppError`] and end up as an HTTP response, while
//! [`ResolutionError`] never leaves the video resolver.

use std::time::Duration;

use thiserror::Error;

/// Top-level application error type
///
/// Every variant that reaches the web layer is terminal for the request.
#[derive(Error, Debug)]
pub enum AppError {
    /// Building, sending or getting a successful status from an upstream request failed
    #[error("Upstream request error: {0}")]
    UpstreamRequest(#[from] UpstreamRequestError),

    /// The upstream answered but the body could not be read or decoded
    #[error("Upstream decode error: {0}")]
    UpstreamDecode(#[from] UpstreamDecodeError),

    /// Template execution failed
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// The request deadline elapsed before the upstream calls completed
    #[error("Deadline exceeded after {0:?}")]
    DeadlineExceeded(Duration),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Failures talking to the metadata endpoint
#[derive(Error, Debug)]
pub enum UpstreamRequestError {
    /// The request could not be constructed (bad endpoint, bad query)
    #[error("Failed to build request for {url}: {source}")]
    Build {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Connection, TLS or protocol failure
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The upstream answered with a non-success status
    #[error("Upstream {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Failures turning an upstream response into a [`crate::models::ContentRecord`]
#[derive(Error, Debug)]
pub enum UpstreamDecodeError {
    /// Reading the response body failed midway
    #[error("Failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    /// Malformed JSON or a schema mismatch
    #[error("Failed to decode oEmbed document: {0}")]
    Schema(#[from] serde_json::Error),
}

/// Reasons a video source could not be resolved
///
/// These are logged and swallowed; the page falls back to image rendering.
#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error("no embedded player link in oEmbed html")]
    NoEmbedLink,

    #[error("player page request failed: {0}")]
    PlayerRequest(#[source] reqwest::Error),

    #[error("player page returned HTTP {status}")]
    PlayerStatus { status: u16 },

    #[error("player page has no gmon-sources attribute")]
    NoSourceManifest,

    #[error("source manifest is not valid JSON: {0}")]
    ManifestParse(#[from] serde_json::Error),

    #[error("source manifest has none of the preferred tiers")]
    NoPreferredTier,
}

impl AppError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
