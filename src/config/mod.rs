use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

pub mod defaults;
pub mod duration_serde;

use defaults::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Deadline covering every upstream call made for one preview request
    #[serde(default = "default_request_timeout", with = "duration_serde")]
    pub request_timeout: Duration,
}

/// Where metadata and player pages are fetched from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Prefix joined with the request path to form the canonical content URL
    #[serde(default = "default_source_base_url")]
    pub source_base_url: String,
    #[serde(default = "default_oembed_endpoint")]
    pub oembed_endpoint: String,
    /// Host serving the embedded film player (`<url>/embed/film...`)
    #[serde(default = "default_video_backend_url")]
    pub video_backend_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_connect_timeout", with = "duration_serde")]
    pub connect_timeout: Duration,
}

/// Presentation settings for rendered previews and the discovery document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_site_name")]
    pub site_name: String,
    /// Public address of this proxy, used in the oEmbed discovery link
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    #[serde(default = "default_project_url")]
    pub project_url: String,
    #[serde(default = "default_provider_name")]
    pub provider_name: String,
    /// User-agent substring identifying a chat client that renders pages itself
    #[serde(default = "default_preview_client_marker")]
    pub preview_client_marker: String,
    #[serde(default = "default_theme_color")]
    pub fallback_theme_color: String,
}

// Web defaults
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
}

// Upstream defaults
fn default_source_base_url() -> String {
    DEFAULT_SOURCE_BASE_URL.to_string()
}

fn default_oembed_endpoint() -> String {
    DEFAULT_OEMBED_ENDPOINT.to_string()
}

fn default_video_backend_url() -> String {
    DEFAULT_VIDEO_BACKEND_URL.to_string()
}

fn default_user_agent() -> String {
    format!("dxviantart/{}", env!("CARGO_PKG_VERSION"))
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)
}

// Site defaults
fn default_site_name() -> String {
    DEFAULT_SITE_NAME.to_string()
}

fn default_public_base_url() -> String {
    DEFAULT_PUBLIC_BASE_URL.to_string()
}

fn default_project_url() -> String {
    DEFAULT_PROJECT_URL.to_string()
}

fn default_provider_name() -> String {
    DEFAULT_PROVIDER_NAME.to_string()
}

fn default_preview_client_marker() -> String {
    DEFAULT_PREVIEW_CLIENT_MARKER.to_string()
}

fn default_theme_color() -> String {
    DEFAULT_THEME_COLOR.to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            source_base_url: default_source_base_url(),
            oembed_endpoint: default_oembed_endpoint(),
            video_backend_url: default_video_backend_url(),
            user_agent: default_user_agent(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: default_site_name(),
            public_base_url: default_public_base_url(),
            project_url: default_project_url(),
            provider_name: default_provider_name(),
            preview_client_marker: default_preview_client_marker(),
            fallback_theme_color: default_theme_color(),
        }
    }
}

impl Config {
    /// Read `config_file`, writing the defaults there first if it does not exist
    pub fn load_from_file(config_file: &str) -> Result<Self> {
        if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(config_file)?;
            Ok(toml::from_str(&contents)?)
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(config_file, contents)?;
            info!("Created default config file: {}", config_file);
            Ok(default_config)
        }
    }
}
