//! HTTP middleware

use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use crate::config::SiteConfig;
use crate::preview::{RenderMode, is_preview_client};
use crate::web::{AppState, extractors::ClientContext};

/// Response header echoing the id every log line of the request carries
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request logging middleware
///
/// Runs the request inside a `request` span so the pipeline's own log lines
/// share its id. The completion line records the render mode the client
/// signature selects, which is what decides the shape of a preview page.
pub async fn request_logging_middleware(
    State(state): State<AppState>,
    client: ClientContext,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4();
    let mode = render_mode_for(&state.config.site, &client);

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    );

    async move {
        debug!(
            user_agent = %client.user_agent,
            staypls = client.stay,
            "HTTP request started"
        );

        let mut response = next.run(request).await;
        let status = response.status();
        let duration_ms = start.elapsed().as_millis();

        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        if status.is_client_error() || status.is_server_error() {
            warn!(
                status = status.as_u16(),
                render_mode = mode.as_str(),
                duration_ms = duration_ms,
                "HTTP request completed with error"
            );
        } else {
            info!(
                status = status.as_u16(),
                render_mode = mode.as_str(),
                duration_ms = duration_ms,
                "HTTP request completed"
            );
        }

        response
    }
    .instrument(span)
    .await
}

fn render_mode_for(site: &SiteConfig, client: &ClientContext) -> RenderMode {
    RenderMode::decide(
        is_preview_client(&site.preview_client_marker, &client.user_agent),
        client.stay,
    )
}
