//! Text formatting helpers for cards.

use chrono::{DateTime, Utc};
use mockable::Clock;

const LINK_DISPLAY_LIMIT: usize = 40;
const EXCERPT_LIMIT: usize = 100;

/// Renders how long ago `at` was, relative to `now`.
///
/// Under a minute is `Just now`; then minutes, hours and days up to a week
/// (`5m ago`, `3h ago`, `2d ago`); anything older is a calendar date.
/// Future timestamps count as `Just now`.
#[must_use]
pub fn relative_time_at(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(at);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();
    if minutes < 1 {
        "Just now".to_owned()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        at.format("%-m/%-d/%Y").to_string()
    }
}

/// Renders how long ago `at` was, relative to the clock's current time.
#[must_use]
pub fn relative_time(at: DateTime<Utc>, clock: &impl Clock) -> String {
    relative_time_at(at, clock.utc())
}

/// Shortens a link to 40 characters followed by `...`.
#[must_use]
pub fn truncate_link(link: &str) -> String {
    shorten(link, LINK_DISPLAY_LIMIT)
}

/// Shortens task details to 100 characters followed by `...`.
#[must_use]
pub fn excerpt(details: &str) -> String {
    shorten(details, EXCERPT_LIMIT)
}

fn shorten(text: &str, limit: usize) -> String {
    if text.chars().count() > limit {
        let kept: String = text.chars().take(limit).collect();
        format!("{kept}...")
    } else {
        text.to_owned()
    }
}

/// Labels a journey length as `1 entry` or `N entries`.
///
/// Returns `None` when the count is absent or zero.
#[must_use]
pub fn entries_label(count: Option<u32>) -> Option<String> {
    match count {
        None | Some(0) => None,
        Some(1) => Some("1 entry".to_owned()),
        Some(n) => Some(format!("{n} entries")),
    }
}

/// Renders a byte size in kilobytes with one decimal, such as `12.5 KB`.
#[must_use]
pub fn attachment_size(bytes: u64) -> String {
    let tenths = bytes.saturating_mul(10).saturating_add(512).div_euclid(1024);
    format!("{}.{} KB", tenths.div_euclid(10), tenths.rem_euclid(10))
}
