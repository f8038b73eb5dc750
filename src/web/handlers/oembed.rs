//! oEmbed discovery handler
//!
//! Preview pages point chat clients here to pick up the statistics line and
//! the author link; both arrive as query parameters and are echoed back.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::web::AppState;

/// Shown when `displayText` is absent
pub const DEFAULT_DISPLAY_TEXT: &str = "DeviantArt";

/// Query parameters of the discovery endpoint
///
/// Read from raw pairs so that repeated or unknown keys never reject the
/// request; the first occurrence of a key wins.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DiscoveryParams {
    pub display_text: Option<String>,
    pub author: Option<String>,
}

impl DiscoveryParams {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();

        for (key, value) in pairs {
            match key.as_str() {
                "displayText" if params.display_text.is_none() => params.display_text = Some(value),
                "author" if params.author.is_none() => params.author = Some(value),
                _ => {}
            }
        }

        params
    }
}

/// `type: link` oEmbed document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryDocument {
    pub author_name: String,
    pub author_url: String,
    pub provider_name: String,
    pub provider_url: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub version: String,
}

pub async fn discovery_document(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Json<DiscoveryDocument> {
    let params = DiscoveryParams::from_pairs(pairs);
    let upstream = &state.config.upstream;
    let site = &state.config.site;

    let author = params.author.unwrap_or_default();

    Json(DiscoveryDocument {
        author_name: params
            .display_text
            .unwrap_or_else(|| DEFAULT_DISPLAY_TEXT.to_string()),
        author_url: format!("{}/{}", upstream.source_base_url.trim_end_matches('/'), author),
        provider_name: site.provider_name.clone(),
        provider_url: site.project_url.clone(),
        title: DEFAULT_DISPLAY_TEXT.to_string(),
        kind: "link".to_string(),
        version: "1.0".to_string(),
    })
}
