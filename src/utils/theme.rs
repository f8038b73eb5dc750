//! Cosmetic theme colour for preview pages

use rand::{TryRngCore, rngs::OsRng};
use tracing::debug;

/// A random `#rrggbb` colour, or `fallback` when the OS entropy source fails
pub fn random_theme_color(fallback: &str) -> String {
    let mut bytes = [0u8; 3];

    match OsRng.try_fill_bytes(&mut bytes) {
        Ok(()) => format!("#{}", hex::encode(bytes)),
        Err(e) => {
            debug!("Entropy source unavailable, using fallback theme colour: {}", e);
            fallback.to_string()
        }
    }
}
