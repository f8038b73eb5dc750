//! Error responses
//!
//! Request-terminal errors become short plain-text bodies; the detail stays in
//! the logs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::errors::AppError;

impl AppError {
    /// HTTP status this error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::DeadlineExceeded(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::UpstreamRequest(_)
            | AppError::UpstreamDecode(_)
            | AppError::Render(_)
            | AppError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            AppError::DeadlineExceeded(_) => "Upstream took too long to respond",
            AppError::UpstreamRequest(_) | AppError::UpstreamDecode(_) => {
                "Failed to fetch content metadata"
            }
            AppError::Render(_) => "Failed to render preview",
            AppError::Configuration { .. } => "Internal server error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code(), self.public_message()).into_response()
    }
}
