//! Service layer

pub mod embed_service;

pub use embed_service::EmbedService;
