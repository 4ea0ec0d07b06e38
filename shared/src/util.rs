//! Time helpers - business time zone conversion
//!
//! Stored close times are either RFC 3339 strings (with offset) or naive
//! local strings written by the register. Naive values are interpreted in
//! the business time zone.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Offset, Utc};
use chrono_tz::Tz;

/// Naive formats accepted for local timestamps (fraction optional)
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Which instant to pick when a local time is ambiguous (DST fold)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Earliest candidate, for the start of a window
    Start,
    /// Latest candidate, for the end of a window
    End,
}

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Local date + time of day → UTC instant (business time zone)
///
/// A local time inside a DST gap moves forward by the length of the gap
/// (00:00 on a spring-forward-at-midnight day becomes 01:00 new time).
/// Returns `None` only for an invalid time of day.
pub fn local_instant(
    date: NaiveDate,
    hour: u32,
    min: u32,
    sec: u32,
    milli: u32,
    tz: Tz,
    bound: Bound,
) -> Option<DateTime<Utc>> {
    let naive = date.and_hms_milli_opt(hour, min, sec, milli)?;
    Some(resolve_local(naive, tz, bound))
}

fn resolve_local(naive: NaiveDateTime, tz: Tz, bound: Bound) -> DateTime<Utc> {
    let local = naive.and_local_timezone(tz);
    let resolved = match bound {
        Bound::Start => local.earliest(),
        Bound::End => local.latest(),
    };
    resolved
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| skip_gap(naive, tz))
}

/// Read a nonexistent local time with the offset in force before the gap
fn skip_gap(naive: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    let before = (naive - Duration::days(1))
        .and_local_timezone(tz)
        .earliest()
        .map(|dt| dt.offset().fix().local_minus_utc());
    match before {
        Some(offset_secs) => (naive - Duration::seconds(i64::from(offset_secs))).and_utc(),
        None => {
            tracing::debug!(%naive, "No offset found before DST gap, reading as UTC");
            naive.and_utc()
        }
    }
}

/// Parse a stored timestamp into a UTC instant
///
/// Accepts RFC 3339 (`2024-01-05T10:00:00Z`, `...+01:00`), naive local
/// date-times (`2024-01-05T10:00`, `2024-01-05 10:00:00.250`) and bare
/// dates (local midnight). Anything else yields `None`.
pub fn parse_timestamp(raw: &str, tz: Tz) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(resolve_local(naive, tz, Bound::Start));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| local_instant(date, 0, 0, 0, 0, tz, Bound::Start))
}

/// Parse a calendar date string (YYYY-MM-DD)
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}
