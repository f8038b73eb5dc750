//! Preview handlers

use axum::{
    extract::State,
    http::{StatusCode, Uri, header::LOCATION},
    response::{Html, IntoResponse},
};

use crate::errors::AppResult;
use crate::web::{AppState, extractors::ClientContext};

/// Send visitors of the bare host to the project page with a `302 Found`
pub async fn project_redirect(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::FOUND,
        [(LOCATION, state.config.site.project_url.clone())],
    )
}

/// Render the preview document for the content at the request path
///
/// The full path (without query) is appended to the source base URL, so
/// percent-encoding in the path is forwarded as received.
pub async fn render_preview(
    State(state): State<AppState>,
    uri: Uri,
    client: ClientContext,
) -> AppResult<Html<String>> {
    let body = state
        .embed_service
        .render_embed(uri.path(), &client.user_agent, client.stay)
        .await?;

    Ok(Html(body))
}
