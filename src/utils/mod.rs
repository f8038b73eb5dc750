//! Utility modules for the preview proxy
//!
//! Small presentation helpers used by the renderer.

pub mod human_format;
pub mod theme;

pub use human_format::{format_count, format_statistics};
pub use theme::random_theme_color;
