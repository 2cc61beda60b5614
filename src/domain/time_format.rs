//! Relative and absolute labels for message timestamps.
//!
//! Buckets, checked in order against the distance from `now`:
//! - under a minute (or in the future): "Just now"
//! - under an hour: "N min ago" / "N mins ago"
//! - same calendar day: "09:05 AM"
//! - same calendar year: "Feb 14, 01:30 PM"
//! - anything older: "Dec 31, 2025"

use chrono::{DateTime, Datelike, Duration, Local, LocalResult, NaiveDateTime, TimeZone};

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 3_600_000;

/// Label shown when the server sends a timestamp we cannot parse.
pub const INVALID_TIMESTAMP_LABEL: &str = "Invalid Date";

const SERVER_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

pub fn format_time<Tz>(timestamp: &DateTime<Tz>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let diff_ms = now.timestamp_millis() - timestamp.timestamp_millis();

    if diff_ms < MINUTE_MS {
        return "Just now".to_owned();
    }

    if diff_ms < HOUR_MS {
        let mins = diff_ms / MINUTE_MS;
        let suffix = if mins > 1 { "s" } else { "" };
        return format!("{mins} min{suffix} ago");
    }

    if timestamp.date_naive() == now.date_naive() {
        return timestamp.format("%I:%M %p").to_string();
    }

    if timestamp.year() == now.year() {
        return timestamp.format("%b %-d, %I:%M %p").to_string();
    }

    timestamp.format("%b %-d, %Y").to_string()
}

/// Formats a raw `created_at` value against `now` in the local time zone.
pub fn format_created_at(raw: &str, now: &DateTime<Local>) -> String {
    match parse_timestamp(raw) {
        Some(timestamp) => format_time(&timestamp, now),
        None => INVALID_TIMESTAMP_LABEL.to_owned(),
    }
}

/// Parses RFC 3339 or the server's naive `YYYY-MM-DD HH:MM:SS` form.
///
/// Naive values are read as local wall-clock time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    parse_timestamp_in(raw, &Local)
}

pub fn parse_timestamp_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(tz));
    }

    let naive = SERVER_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())?;

    resolve_wall_clock(tz, naive)
}

/// Maps a wall-clock time onto `tz`. A repeated hour takes the earlier
/// instant; a skipped hour moves forward by the gap, as browsers do.
fn resolve_wall_clock<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&naive).earliest().or_else(|| {
        naive
            .checked_add_signed(Duration::hours(1))
            .and_then(|shifted| tz.from_local_datetime(&shifted).earliest())
    })
}

/// Converts an event clock value (unix millis) to local time.
pub fn local_from_millis(timestamp_ms: i64) -> DateTime<Local> {
    match Local.timestamp_millis_opt(timestamp_ms) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(dt, _) => dt,
        LocalResult::None => Local::now(),
    }
}
