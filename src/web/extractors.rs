//! Request extractors

use axum::{
    extract::{FromRequestParts, Query},
    http::{header::USER_AGENT, request::Parts},
};
use serde::Deserialize;

/// Who is asking for a preview, and whether they asked to stay on the page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientContext {
    pub user_agent: String,
    /// `staypls=1` was present in the query string
    pub stay: bool,
}

#[derive(Debug, Default, Deserialize)]
struct StayParams {
    staypls: Option<String>,
}

impl<S> FromRequestParts<S> for ClientContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_agent = parts
            .headers
            .get(USER_AGENT)
            .and_then(|h| h.to_str().ok())
            .unwrap_or_default()
            .to_string();

        // A malformed query string is treated as no override
        let params = Query::<StayParams>::try_from_uri(&parts.uri)
            .map(|Query(params)| params)
            .unwrap_or_default();

        Ok(Self {
            user_agent,
            stay: params.staypls.as_deref() == Some("1"),
        })
    }
}
