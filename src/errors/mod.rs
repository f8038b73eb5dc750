//! Centralized error handling for the preview proxy
//!
//! # Error Categories
//!
//! - **Upstream request errors**: building or sending the oEmbed request, or a
//!   non-success status
//! - **Upstream decode errors**: unreadable bodies and schema mismatches
//! - **Render errors**: template execution failures
//! - **Resolution errors**: video scraping failures, recovered locally
//!
//! # Usage
//!
//! ```rust
//! use dxviantart::errors::{AppError, AppResult};
//!
//! fn example_function() -> AppResult<String> {
//!     Err(AppError::configuration("missing upstream endpoint"))
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;
