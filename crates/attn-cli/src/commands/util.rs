//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use anyhow::Context;
use chrono::{DateTime, FixedOffset, NaiveDateTime, NaiveTime, TimeDelta};
use regex::Regex;

/// Pre-compiled regex for relative time parsing.
static RELATIVE_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s+(minute|hour|day|week)s?\s+ago$").expect("valid relative time regex")
});

/// Conservative bounds for relative time parsing (~100 years in minutes).
const MAX_RELATIVE_MINUTES: i64 = 100 * 365 * 24 * 60;

/// Local date-time layouts accepted for manual entries.
const LOCAL_LAYOUTS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parses when a manually entered event happened, as local wall-clock time.
///
/// Supports:
/// - RFC 3339: "2025-03-02T09:00:00Z" (converted to the configured offset)
/// - Local date and time: "2025-03-02 09:00" or "2025-03-02 09:00:30"
/// - Time only, today: "09:00" or "09:00:30"
/// - Relative: "30 minutes ago", "2 hours ago", "1 day ago", "1 week ago"
pub fn parse_when(s: &str, now: DateTime<FixedOffset>) -> anyhow::Result<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(now.offset()).naive_local());
    }

    if let Some(dt) = LOCAL_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(s, layout).ok())
    {
        return Ok(dt);
    }

    if let Some(time) = ["%H:%M:%S", "%H:%M"]
        .iter()
        .find_map(|layout| NaiveTime::parse_from_str(s, layout).ok())
    {
        return Ok(now.date_naive().and_time(time));
    }

    let Some(caps) = RELATIVE_TIME_RE.captures(s) else {
        anyhow::bail!(
            "Invalid time: {s}. Use RFC 3339, 'YYYY-MM-DD HH:MM', 'HH:MM' or relative (e.g., '2 hours ago')"
        );
    };

    let n: i64 = caps[1]
        .parse()
        .context("failed to parse number in relative time")?;

    let (max_for_unit, minutes_per_unit) = match &caps[2] {
        "minute" => (MAX_RELATIVE_MINUTES, 1),
        "hour" => (MAX_RELATIVE_MINUTES / 60, 60),
        "day" => (MAX_RELATIVE_MINUTES / (60 * 24), 60 * 24),
        "week" => (MAX_RELATIVE_MINUTES / (60 * 24 * 7), 60 * 24 * 7),
        unit => anyhow::bail!("Unknown time unit: {unit}"),
    };

    if n > max_for_unit {
        anyhow::bail!("Relative time value too large: {n} {}", &caps[2]);
    }

    Ok((now - TimeDelta::minutes(n * minutes_per_unit)).naive_local())
}
