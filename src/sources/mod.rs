//! Upstream data sources
//!
//! - [`oembed`]: metadata fetcher for the oEmbed endpoint
//! - [`video`]: two-hop film player scrape for direct video files

pub mod oembed;
pub mod video;

pub use oembed::OembedClient;
pub use video::{ScrapePatterns, VideoSourceResolver};
