//! Fixed responders

use axum::{
    http::{StatusCode, header::CONTENT_TYPE},
    response::IntoResponse,
};

/// Crawlers are asked to stay away entirely
pub const ROBOTS_TXT: &str = "\nUser-Agent: *\nDisallow: /\n";

/// Serve robots.txt for any method
pub async fn serve_robots() -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/plain; charset=utf-8")], ROBOTS_TXT)
}

/// There is no favicon
pub async fn serve_favicon() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Favicon not found")
}
