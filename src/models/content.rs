//! Content metadata as returned by the oEmbed endpoint
//!
//! [`OembedDocument`] mirrors the upstream JSON loosely; [`ContentRecord`] is the
//! per-request record the rest of the pipeline works with.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// What kind of media a record points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify the upstream `type` field; only the literal `"video"` is a video
    pub fn from_oembed_type(kind: &str) -> Self {
        if kind == "video" {
            Self::Video
        } else {
            Self::Image
        }
    }
}

/// A width or height as sent by the upstream
///
/// The endpoint has been observed to send plain integers, numeric strings and
/// structured objects for the same field, so decoding never fails on shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Integer(i64),
    Text(String),
    Unknown(serde_json::Value),
}

impl Default for Dimension {
    fn default() -> Self {
        Self::Unknown(serde_json::Value::Null)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::Unknown(serde_json::Value::Number(value)) => write!(f, "{value}"),
            Self::Unknown(_) => Ok(()),
        }
    }
}

/// Community counters shown in the discovery text
///
/// Signed so that a bogus negative counter does not fail the whole document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(default, deserialize_with = "null_as_default")]
    pub views: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub favorites: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub downloads: i64,
}

/// Raw oEmbed response body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OembedDocument {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub thumbnail_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub html: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub community: Community,
    #[serde(default)]
    pub width: Dimension,
    #[serde(default)]
    pub height: Dimension,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Community {
    #[serde(default, deserialize_with = "null_as_default")]
    pub statistics: CommunityStatistics,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommunityStatistics {
    #[serde(rename = "_attributes", default, deserialize_with = "null_as_default")]
    pub attributes: Statistics,
}

/// Per-request content record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentRecord {
    pub kind: MediaKind,
    pub title: String,
    pub author_name: String,
    /// Displayable or playable media; replaced when a video source is resolved
    pub asset_url: String,
    pub thumbnail_url: String,
    /// Player embed markup, scraped for the film player link
    pub embed_html: String,
    pub width: Dimension,
    pub height: Dimension,
    pub stats: Statistics,
}

impl ContentRecord {
    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }

    /// Title line used for every preview tag
    pub fn display_title(&self) -> String {
        format!("{} by {}", self.title, self.author_name)
    }
}

impl From<OembedDocument> for ContentRecord {
    fn from(document: OembedDocument) -> Self {
        Self {
            kind: MediaKind::from_oembed_type(&document.kind),
            title: document.title,
            author_name: document.author_name,
            asset_url: document.url,
            thumbnail_url: document.thumbnail_url,
            embed_html: document.html,
            width: document.width,
            height: document.height,
            stats: document.community.statistics.attributes,
        }
    }
}

/// Treat an explicit JSON `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
