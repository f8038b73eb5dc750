//! Data models shared across the fetch, resolve and render stages

pub mod content;

pub use content::{ContentRecord, Dimension, MediaKind, OembedDocument, Statistics};
