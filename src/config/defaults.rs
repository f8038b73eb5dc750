/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Web server defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

// Upstream defaults
pub const DEFAULT_SOURCE_BASE_URL: &str = "https://deviantart.com";
pub const DEFAULT_OEMBED_ENDPOINT: &str = "https://backend.deviantart.com/oembed";
pub const DEFAULT_VIDEO_BACKEND_URL: &str = "https://backend.deviantart.com";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

// Site defaults
pub const DEFAULT_SITE_NAME: &str = "dxviantart.com";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "https://dxviantart.com";
pub const DEFAULT_PROJECT_URL: &str = "https://github.com/itsrcu/fixdeviantart";
pub const DEFAULT_PROVIDER_NAME: &str = "DxviantArt";
pub const DEFAULT_PREVIEW_CLIENT_MARKER: &str = "Telegram";
pub const DEFAULT_THEME_COLOR: &str = "#015196";
