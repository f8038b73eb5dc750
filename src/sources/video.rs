//! Video source resolution
//!
//! The oEmbed document for a film only carries a player embed, so the playable
//! file is recovered in two hops: find the film player link in the embed
//! markup, then read the `gmon-sources` manifest inlined in the player page.
//! This depends on undocumented markup; every failure is reported as a plain
//! `false` from [`VideoSourceResolver::try_resolve`].

use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::errors::ResolutionError;
use crate::models::{ContentRecord, Dimension};

/// Manifest tiers that may be used, best first
pub const PREFERRED_TIERS: [&str; 3] = ["1080p", "720p", "360p"];

/// One rendition listed in a player's source manifest
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ManifestEntry {
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub width: i64,
    #[serde(default)]
    pub height: i64,
}

/// Tier label to rendition
pub type SourceManifest = HashMap<String, ManifestEntry>;

/// Compiled scraping patterns, built once at startup and shared read-only
#[derive(Debug)]
pub struct ScrapePatterns {
    embed_link: Regex,
    source_manifest: Regex,
}

impl ScrapePatterns {
    /// Build the patterns for a film player served from `video_backend_url`
    pub fn new(video_backend_url: &str) -> Result<Self, regex::Error> {
        let backend = regex::escape(video_backend_url.trim_end_matches('/'));

        Ok(Self {
            embed_link: Regex::new(&format!(r#"{backend}/embed/film[^"]*"#))?,
            source_manifest: Regex::new(r#"gmon-sources="([^"]*)"#)?,
        })
    }

    /// First film player link in an embed fragment
    pub fn find_embed_link<'a>(&self, embed_html: &'a str) -> Option<&'a str> {
        self.embed_link.find(embed_html).map(|m| m.as_str())
    }

    /// The inline source manifest of a player page, unescaped into plain JSON
    pub fn find_source_manifest(&self, page: &str) -> Option<String> {
        self.source_manifest
            .captures(page)
            .and_then(|caps| caps.get(1))
            .map(|m| unescape_manifest(m.as_str()))
    }
}

/// Undo the attribute escaping applied to the inline manifest
fn unescape_manifest(raw: &str) -> String {
    raw.replace("&quot;", "\"").replace("\\/", "/")
}

/// Parse an unescaped manifest
pub fn parse_manifest(json: &str) -> Result<SourceManifest, serde_json::Error> {
    serde_json::from_str(json)
}

/// Pick the first preferred tier present; tiers outside the list are never used
///
/// A tier with an empty `src` counts as missing, so a listed but unusable
/// rendition never yields a `<video>` without a source.
pub fn select_tier(manifest: &SourceManifest) -> Option<&ManifestEntry> {
    PREFERRED_TIERS
        .iter()
        .filter_map(|tier| manifest.get(*tier))
        .find(|entry| !entry.src.is_empty())
}

/// Resolves a direct video file for records classified as video
#[derive(Debug, Clone)]
pub struct VideoSourceResolver {
    client: Client,
    patterns: Arc<ScrapePatterns>,
}

impl VideoSourceResolver {
    pub fn new(client: Client, patterns: Arc<ScrapePatterns>) -> Self {
        Self { client, patterns }
    }

    /// Replace the record's asset with a direct video file
    ///
    /// Returns `true` when `asset_url`, `width` and `height` were overwritten.
    /// On `false` the record is untouched and must be rendered as an image.
    pub async fn try_resolve(&self, record: &mut ContentRecord) -> bool {
        match self.resolve(&record.embed_html).await {
            Ok(entry) => {
                debug!("Resolved video source {} ({}x{})", entry.src, entry.width, entry.height);
                record.asset_url = entry.src;
                record.width = Dimension::Integer(entry.width);
                record.height = Dimension::Integer(entry.height);
                true
            }
            Err(e) => {
                info!("Video source resolution failed, falling back to image: {}", e);
                false
            }
        }
    }

    async fn resolve(&self, embed_html: &str) -> Result<ManifestEntry, ResolutionError> {
        let player_url = self
            .patterns
            .find_embed_link(embed_html)
            .ok_or(ResolutionError::NoEmbedLink)?;

        debug!("Fetching film player page: {}", player_url);

        let response = self
            .client
            .get(player_url)
            .send()
            .await
            .map_err(ResolutionError::PlayerRequest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolutionError::PlayerStatus {
                status: status.as_u16(),
            });
        }

        let page = response.text().await.map_err(ResolutionError::PlayerRequest)?;

        let manifest_json = self
            .patterns
            .find_source_manifest(&page)
            .ok_or(ResolutionError::NoSourceManifest)?;

        let manifest = parse_manifest(&manifest_json)?;

        select_tier(&manifest)
            .cloned()
            .ok_or(ResolutionError::NoPreferredTier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> ScrapePatterns {
        ScrapePatterns::new("https://backend.deviantart.com").unwrap()
    }

    fn entry(src: &str, width: i64, height: i64) -> ManifestEntry {
        ManifestEntry {
            src: src.to_string(),
            width,
            height,
        }
    }

    #[test]
    fn test_find_embed_link_stops_at_quote() {
        let html = r#"<iframe class="film" src="https://backend.deviantart.com/embed/film/serve/123/456" width="640"></iframe>"#;

        assert_eq!(
            patterns().find_embed_link(html),
            Some("https://backend.deviantart.com/embed/film/serve/123/456")
        );
    }

    #[test]
    fn test_find_embed_link_takes_first_match() {
        let html = concat!(
            r#"<a href="https://backend.deviantart.com/embed/film/first">"#,
            r#"<a href="https://backend.deviantart.com/embed/film/second">"#
        );

        assert_eq!(
            patterns().find_embed_link(html),
            Some("https://backend.deviantart.com/embed/film/first")
        );
    }

    #[test]
    fn test_find_embed_link_requires_backend_host() {
        let html = r#"<iframe src="https://elsewhere.example/embed/film/serve/1"></iframe>"#;
        assert_eq!(patterns().find_embed_link(html), None);
        assert_eq!(patterns().find_embed_link(""), None);
    }

    #[test]
    fn test_backend_url_is_matched_literally() {
        let patterns = ScrapePatterns::new("http://127.0.0.1:8080/").unwrap();
        let html = r#"src="http://127.0.0.1:8080/embed/film/x" src="http://127a0a0a1:8080/embed/film/y""#;

        assert_eq!(patterns.find_embed_link(html), Some("http://127.0.0.1:8080/embed/film/x"));
        assert_eq!(
            patterns.find_embed_link(r#"src="http://127a0a0a1:8080/embed/film/y""#),
            None
        );
    }

    #[test]
    fn test_find_source_manifest_unescapes() {
        let page = r#"<div class="player" gmon-sources="{&quot;720p&quot;:{&quot;src&quot;:&quot;https:\/\/wixmp.example\/v\/720.mp4&quot;,&quot;width&quot;:1280,&quot;height&quot;:720}}" data-x="1"></div>"#;

        assert_eq!(
            patterns().find_source_manifest(page).as_deref(),
            Some(r#"{"720p":{"src":"https://wixmp.example/v/720.mp4","width":1280,"height":720}}"#)
        );
    }

    #[test]
    fn test_find_source_manifest_missing() {
        assert_eq!(patterns().find_source_manifest("<html></html>"), None);
    }

    #[test]
    fn test_select_tier_follows_preference_not_position() {
        let manifest = parse_manifest(
            r#"{"360p":{"src":"https://v/360.mp4","width":640,"height":360},
                "720p":{"src":"https://v/720.mp4","width":1280,"height":720}}"#,
        )
        .unwrap();

        assert_eq!(select_tier(&manifest), Some(&entry("https://v/720.mp4", 1280, 720)));
    }

    #[test]
    fn test_select_tier_prefers_1080p() {
        let manifest = parse_manifest(
            r#"{"720p":{"src":"https://v/720.mp4","width":1280,"height":720},
                "1080p":{"src":"https://v/1080.mp4","width":1920,"height":1080}}"#,
        )
        .unwrap();

        assert_eq!(select_tier(&manifest).map(|e| e.src.as_str()), Some("https://v/1080.mp4"));
    }

    #[test]
    fn test_select_tier_ignores_unlisted_tiers() {
        let manifest = parse_manifest(
            r#"{"4k":{"src":"https://v/4k.mp4","width":3840,"height":2160},
                "240p":{"src":"https://v/240.mp4","width":426,"height":240}}"#,
        )
        .unwrap();

        assert_eq!(select_tier(&manifest), None);
    }

    #[test]
    fn test_select_tier_skips_empty_sources() {
        let manifest = parse_manifest(
            r#"{"1080p":{"src":"","width":1920,"height":1080},
                "360p":{"src":"https://v/360.mp4","width":640,"height":360}}"#,
        )
        .unwrap();

        assert_eq!(select_tier(&manifest).map(|e| e.src.as_str()), Some("https://v/360.mp4"));
    }

    #[test]
    fn test_parse_manifest_rejects_garbage() {
        assert!(parse_manifest("{not json").is_err());
        assert!(parse_manifest(r#"{"720p":{"src":"x","width":"wide"}}"#).is_err());
    }

    #[tokio::test]
    async fn test_try_resolve_without_embed_link_leaves_record_untouched() {
        let resolver = VideoSourceResolver::new(Client::new(), Arc::new(patterns()));
        let mut record = ContentRecord {
            kind: crate::models::MediaKind::Video,
            title: "Clip".to_string(),
            author_name: "animator".to_string(),
            asset_url: "https://images.example/poster.jpg".to_string(),
            thumbnail_url: "https://images.example/thumb.jpg".to_string(),
            embed_html: "<div>no player here</div>".to_string(),
            width: Dimension::Integer(100),
            height: Dimension::Integer(50),
            stats: Default::default(),
        };
        let before = record.clone();

        assert!(!resolver.try_resolve(&mut record).await);
        assert_eq!(record, before);
    }
}
