//! Human-readable formatting for community counters

const SCALES: &[(f64, &str)] = &[(1e3, "K"), (1e6, "M"), (1e9, "B"), (1e12, "T")];

/// Abbreviates a counter: `999` stays `999`, `1500` becomes `1.5K`, `2_000_000` becomes `2.0M`
///
/// Each suffix covers values below the next threshold, so `999_999` prints as
/// `1000.0K` rather than being promoted to `M`. Negative counts print as `0`.
pub fn format_count(count: i64) -> String {
    let value = count.max(0) as f64;

    if value < 1e3 {
        return format!("{value:.0}");
    }

    let (divisor, suffix) = SCALES
        .windows(2)
        .find(|pair| value < pair[1].0)
        .map(|pair| pair[0])
        .unwrap_or(SCALES[SCALES.len() - 1]);

    format!("{:.1}{}", value / divisor, suffix)
}

/// Emoji summary line carried by the oEmbed discovery link
pub fn format_statistics(views: i64, favorites: i64, comments: i64, downloads: i64) -> String {
    format!(
        "👁️  {}  ❤️ {}  💬 {}  ⬇️ {}",
        format_count(views),
        format_count(favorites),
        format_count(comments),
        format_count(downloads)
    )
}
