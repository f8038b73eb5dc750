//! Preview page rendering
//!
//! A preview page is one HTML document whose shape is decided by three facts:
//! whether the caller is a chat client that renders pages itself, whether the
//! caller asked to stay on the page (`staypls=1`), and whether the record is
//! still a video after resolution. [`RenderMode::decide`] covers the first
//! two; the template only ever sees booleans and display strings.

use askama::Template;

use crate::config::SiteConfig;
use crate::errors::AppResult;
use crate::models::ContentRecord;
use crate::utils::{format_statistics, random_theme_color};

/// How the page treats the visitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Meta-refresh to the canonical page; preview tags are still present for
    /// crawlers that read the document before following the refresh
    Redirect,
    /// Embed the media directly, no refresh
    Direct,
}

impl RenderMode {
    pub fn decide(is_preview_client: bool, stay: bool) -> Self {
        if is_preview_client || stay {
            Self::Direct
        } else {
            Self::Redirect
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Redirect => "redirect",
            Self::Direct => "direct",
        }
    }
}

/// Whether `user_agent` contains the configured chat client `marker`
///
/// An empty marker matches nothing.
pub fn is_preview_client(marker: &str, user_agent: &str) -> bool {
    !marker.is_empty() && user_agent.contains(marker)
}

/// Per-request inputs the renderer needs besides the record
#[derive(Debug, Clone)]
pub struct PreviewRequest {
    pub canonical_url: String,
    pub user_agent: String,
    /// `staypls=1` was passed
    pub stay: bool,
}

/// Fully resolved template context
#[derive(Template)]
#[template(path = "preview.html")]
pub struct PreviewPage {
    pub theme_color: String,
    pub redirect: bool,
    pub is_video: bool,
    pub advertise_oembed: bool,
    pub canonical_url: String,
    pub title: String,
    pub author_name: String,
    pub asset_url: String,
    pub thumbnail_url: String,
    pub width: String,
    pub height: String,
    pub site_name: String,
    pub oembed_href: String,
}

/// Renders preview documents for a site configuration
#[derive(Debug, Clone)]
pub struct PreviewRenderer {
    site: SiteConfig,
}

impl PreviewRenderer {
    pub fn new(site: SiteConfig) -> Self {
        Self { site }
    }

    /// Whether a user agent belongs to a chat client that renders previews itself
    pub fn is_preview_client(&self, user_agent: &str) -> bool {
        is_preview_client(&self.site.preview_client_marker, user_agent)
    }

    /// Build the template context for a record
    pub fn page(&self, record: &ContentRecord, request: &PreviewRequest) -> PreviewPage {
        let is_preview_client = self.is_preview_client(&request.user_agent);
        let mode = RenderMode::decide(is_preview_client, request.stay);

        PreviewPage {
            theme_color: random_theme_color(&self.site.fallback_theme_color),
            redirect: mode == RenderMode::Redirect,
            is_video: record.is_video(),
            // Chat clients discover oEmbed on their own
            advertise_oembed: !is_preview_client,
            canonical_url: request.canonical_url.clone(),
            title: record.display_title(),
            author_name: record.author_name.clone(),
            asset_url: record.asset_url.clone(),
            thumbnail_url: record.thumbnail_url.clone(),
            width: record.width.to_string(),
            height: record.height.to_string(),
            site_name: self.site.site_name.clone(),
            oembed_href: self.oembed_href(record),
        }
    }

    /// Render the whole document into memory
    pub fn render(&self, record: &ContentRecord, request: &PreviewRequest) -> AppResult<String> {
        Ok(self.page(record, request).render()?)
    }

    fn oembed_href(&self, record: &ContentRecord) -> String {
        let stats = &record.stats;
        let display_text =
            format_statistics(stats.views, stats.favorites, stats.comments, stats.downloads);

        format!(
            "{}/ohembed?displayText={}&author={}",
            self.site.public_base_url.trim_end_matches('/'),
            urlencoding::encode(&display_text),
            urlencoding::encode(&record.author_name)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dimension, MediaKind, Statistics};

    const TELEGRAM_UA: &str = "TelegramBot (like TwitterBot)";
    const DISCORD_UA: &str = "Mozilla/5.0 (compatible; Discordbot/2.0; +https://discordapp.com)";

    fn renderer() -> PreviewRenderer {
        PreviewRenderer::new(SiteConfig::default())
    }

    fn image_record() -> ContentRecord {
        ContentRecord {
            kind: MediaKind::Image,
            title: "Sunset".to_string(),
            author_name: "painter".to_string(),
            asset_url: "https://images.example/sunset.jpg".to_string(),
            thumbnail_url: "https://images.example/sunset-thumb.jpg".to_string(),
            embed_html: String::new(),
            width: Dimension::Integer(1920),
            height: Dimension::Integer(1080),
            stats: Statistics {
                views: 12_340,
                favorites: 999,
                comments: 1_000,
                downloads: 0,
            },
        }
    }

    fn video_record() -> ContentRecord {
        ContentRecord {
            kind: MediaKind::Video,
            asset_url: "https://videos.example/clip-720.mp4".to_string(),
            width: Dimension::Integer(1280),
            height: Dimension::Integer(720),
            ..image_record()
        }
    }

    fn request(user_agent: &str, stay: bool) -> PreviewRequest {
        PreviewRequest {
            canonical_url: "https://deviantart.com/painter/art/Sunset-123".to_string(),
            user_agent: user_agent.to_string(),
            stay,
        }
    }

    #[test]
    fn test_render_mode_decision_table() {
        assert_eq!(RenderMode::decide(false, false), RenderMode::Redirect);
        assert_eq!(RenderMode::decide(true, false), RenderMode::Direct);
        assert_eq!(RenderMode::decide(false, true), RenderMode::Direct);
        assert_eq!(RenderMode::decide(true, true), RenderMode::Direct);
    }

    #[test]
    fn test_preview_client_detection() {
        let renderer = renderer();

        assert!(renderer.is_preview_client(TELEGRAM_UA));
        assert!(!renderer.is_preview_client(DISCORD_UA));
        assert!(!renderer.is_preview_client(""));
        assert!(!is_preview_client("", TELEGRAM_UA));
    }

    #[test]
    fn test_generic_client_gets_redirect_with_preview_tags() {
        let html = renderer().render(&image_record(), &request(DISCORD_UA, false)).unwrap();

        assert!(html.contains(
            r#"<meta http-equiv="refresh" content="0;url=https://deviantart.com/painter/art/Sunset-123"/>"#
        ));
        assert!(html.contains(r#"<meta property="og:image" content="https://images.example/sunset.jpg"/>"#));
        assert!(html.contains(r#"<meta property="og:title" content="Sunset by painter"/>"#));
        assert!(html.contains(r#"<meta property="twitter:card" content="summary_large_image"/>"#));
        assert!(html.contains("Redirecting, this should only take a second..."));
        assert!(!html.contains("<img"));
        assert!(!html.contains("<video"));
    }

    #[test]
    fn test_generic_client_gets_oembed_discovery_link() {
        let html = renderer().render(&image_record(), &request(DISCORD_UA, false)).unwrap();

        assert!(html.contains(r#"type="application/json+oembed" title="painter""#));
        assert!(html.contains("https://dxviantart.com/ohembed?displayText="));
        assert!(html.contains(&format!(
            "displayText={}",
            urlencoding::encode("👁️  12.3K  ❤️ 999  💬 1.0K  ⬇️ 0")
        )));
    }

    #[test]
    fn test_preview_client_gets_direct_image_without_discovery_link() {
        let html = renderer().render(&image_record(), &request(TELEGRAM_UA, false)).unwrap();

        assert!(!html.contains("http-equiv=\"refresh\""));
        assert!(!html.contains("application/json+oembed"));
        assert!(html.contains(r#"<img src="https://images.example/sunset.jpg">"#));
    }

    #[test]
    fn test_stay_forces_direct_but_keeps_discovery_link() {
        let html = renderer().render(&image_record(), &request(DISCORD_UA, true)).unwrap();

        assert!(!html.contains("http-equiv=\"refresh\""));
        assert!(html.contains("application/json+oembed"));
        assert!(html.contains(r#"<img src="https://images.example/sunset.jpg">"#));
    }

    #[test]
    fn test_video_record_renders_player_tags() {
        let html = renderer().render(&video_record(), &request(TELEGRAM_UA, false)).unwrap();

        assert!(html.contains(r#"<meta property="og:image" content="https://images.example/sunset-thumb.jpg"/>"#));
        assert!(html.contains(r#"<meta property="og:video" content="https://videos.example/clip-720.mp4"/>"#));
        assert!(html.contains(r#"<meta property="og:video:width" content="1280"/>"#));
        assert!(html.contains(r#"<meta property="twitter:card" content="player"/>"#));
        assert!(html.contains(r#"<meta property="twitter:image" content="0"/>"#));
        assert!(html.contains(r#"<source src="https://videos.example/clip-720.mp4" type="video/mp4">"#));
        assert!(html.contains(r#"poster="https://images.example/sunset-thumb.jpg""#));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_empty_asset_still_renders() {
        let record = ContentRecord {
            asset_url: String::new(),
            width: Dimension::default(),
            height: Dimension::default(),
            ..image_record()
        };

        let html = renderer().render(&record, &request(TELEGRAM_UA, false)).unwrap();

        assert!(html.contains(r#"<img src="">"#));
        assert!(html.contains(r#"<meta property="og:image:width" content=""/>"#));
    }

    #[test]
    fn test_values_are_html_escaped() {
        let record = ContentRecord {
            title: r#"<script>alert("x")</script>"#.to_string(),
            ..image_record()
        };

        let html = renderer().render(&record, &request(TELEGRAM_UA, false)).unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_theme_color_is_present() {
        let page = renderer().page(&image_record(), &request(DISCORD_UA, false));

        assert_eq!(page.theme_color.len(), 7);
        assert!(page.theme_color.starts_with('#'));
    }
}
