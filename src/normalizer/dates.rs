//! Publication-date resolution.
//!
//! Feed entries carry dates in many shapes. [`resolve`] picks the first
//! usable representation and produces the canonical timestamp used for
//! ordering together with the string shown to readers.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};

use crate::domain::EntryDates;

/// Display layout, rendered in the timestamp's own offset (`Jan 2, 2006 15:04`).
pub const DISPLAY_FORMAT: &str = "%b %-d, %Y %H:%M";

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDate {
    pub time: Option<DateTime<FixedOffset>>,
    pub display: String,
}

enum Layout {
    /// Ends in a numeric offset such as `-0700`.
    Offset(&'static str),
    /// Followed by a zone abbreviation such as `GMT`.
    Abbreviated(&'static str),
    Rfc3339,
    /// No zone information; read as UTC.
    Naive(&'static str),
    /// A `Mon, ` prefix before the inner layout. The name must be a real
    /// weekday but is not checked against the date.
    Weekday(&'static Layout),
}

/// Tried in order, first match wins.
const LAYOUTS: &[Layout] = &[
    // RFC 1123 with numeric zone
    Layout::Weekday(&Layout::Offset("%d %b %Y %H:%M:%S %z")),
    // RFC 1123
    Layout::Weekday(&Layout::Abbreviated("%d %b %Y %H:%M:%S")),
    // RFC 822 with numeric zone
    Layout::Offset("%d %b %y %H:%M %z"),
    // RFC 822
    Layout::Abbreviated("%d %b %y %H:%M"),
    Layout::Rfc3339,
    // Single-digit days as seen in many RSS feeds
    Layout::Weekday(&Layout::Offset("%e %b %Y %H:%M:%S %z")),
    Layout::Weekday(&Layout::Abbreviated("%e %b %Y %H:%M:%S")),
    // ISO 8601 without the colon in the offset
    Layout::Offset("%Y-%m-%dT%H:%M:%S%z"),
    Layout::Naive("%Y-%m-%d %H:%M:%S"),
];

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Resolve an entry's dates.
///
/// Priority: parsed published, parsed updated, raw published, raw updated.
/// A raw string that matches no layout is displayed verbatim with no
/// timestamp; with nothing at all both parts are empty.
pub fn resolve(dates: &EntryDates) -> ResolvedDate {
    if let Some(time) = dates.published_parsed.or(dates.updated_parsed) {
        return ResolvedDate {
            time: Some(time),
            display: format_display(&time),
        };
    }

    let raw = dates
        .published
        .as_deref()
        .filter(|s| !s.is_empty())
        .or_else(|| dates.updated.as_deref().filter(|s| !s.is_empty()));

    match raw {
        Some(raw) => match parse_date(raw) {
            Some(time) => ResolvedDate {
                time: Some(time),
                display: format_display(&time),
            },
            None => ResolvedDate {
                time: None,
                display: raw.to_string(),
            },
        },
        None => ResolvedDate {
            time: None,
            display: String::new(),
        },
    }
}

pub fn format_display(time: &DateTime<FixedOffset>) -> String {
    time.format(DISPLAY_FORMAT).to_string()
}

/// Parse a raw date string against the known RSS/Atom layouts.
pub fn parse_date(value: &str) -> Option<DateTime<FixedOffset>> {
    LAYOUTS.iter().find_map(|layout| parse_layout(layout, value))
}

fn parse_layout(layout: &Layout, value: &str) -> Option<DateTime<FixedOffset>> {
    match layout {
        Layout::Offset(fmt) => DateTime::parse_from_str(value, fmt).ok(),
        Layout::Abbreviated(fmt) => parse_abbreviated(value, fmt),
        Layout::Rfc3339 => parse_rfc3339(value),
        Layout::Naive(fmt) => NaiveDateTime::parse_from_str(value, fmt)
            .ok()
            .map(|naive| naive.and_utc().fixed_offset()),
        Layout::Weekday(inner) => parse_layout(inner, strip_weekday(value)?),
    }
}

fn strip_weekday(value: &str) -> Option<&str> {
    let (day, rest) = value.split_once(", ")?;
    WEEKDAYS.contains(&day).then_some(rest)
}

/// chrono also takes a space or lowercase `t` between date and time; only `T` is RFC 3339.
fn parse_rfc3339(value: &str) -> Option<DateTime<FixedOffset>> {
    if value.as_bytes().get(10) != Some(&b'T') {
        return None;
    }
    DateTime::parse_from_rfc3339(value).ok()
}

fn parse_abbreviated(value: &str, fmt: &str) -> Option<DateTime<FixedOffset>> {
    let (head, zone) = value.rsplit_once(' ')?;
    if !is_zone_abbreviation(zone) {
        return None;
    }

    let naive = NaiveDateTime::parse_from_str(head, fmt).ok()?;
    FixedOffset::east_opt(zone_offset_secs(zone))?
        .from_local_datetime(&naive)
        .single()
}

/// Three uppercase letters, or four/five ending in `T` (`AEST`, `ACDT`).
fn is_zone_abbreviation(zone: &str) -> bool {
    if !zone.chars().all(|c| c.is_ascii_uppercase()) {
        return false;
    }
    match zone.len() {
        3 => true,
        4 | 5 => zone.ends_with('T'),
        _ => false,
    }
}

/// Unknown abbreviations are read as UTC.
fn zone_offset_secs(zone: &str) -> i32 {
    let hours = match zone {
        "EST" => -5,
        "EDT" => -4,
        "CST" => -6,
        "CDT" => -5,
        "MST" => -7,
        "MDT" => -6,
        "PST" => -8,
        "PDT" => -7,
        _ => 0,
    };
    hours * 3600
}
