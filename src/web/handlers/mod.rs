//! HTTP request handlers
//!
//! - [`embed`]: preview pages and the root redirect
//! - [`oembed`]: oEmbed discovery document
//! - [`static_assets`]: robots.txt and favicon
//! - [`health`]: liveness probe

pub mod embed;
pub mod health;
pub mod oembed;
pub mod static_assets;
