//! Parsing raw field text.
//!
//! Prices are read from their leading decimal number. Instants accept the `datetime-local`
//! layout (`2024-01-01T09:00`), the display layout (`2024/01/01 09:00`) and
//! RFC 3339. Layouts without an offset are read in the form's zone.

use chrono::{DateTime, NaiveDateTime, TimeDelta, TimeZone};

const LOCAL_LAYOUTS: [&str; 6] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

pub fn is_blank(raw: &str) -> bool {
    raw.trim().is_empty()
}

/// Parse the longest numeric prefix of `raw`, so `"1000 BPC"` reads as 1000.
///
/// `None` when no prefix is a number or the number is not finite.
pub fn parse_price(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    (1..=raw.len())
        .rev()
        .filter(|&end| raw.is_char_boundary(end))
        .find_map(|end| raw[..end].parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// Parse an instant, reading offset-less text as wall-clock time in `zone`.
///
/// Ambiguous wall-clock times take the earlier instant. Times skipped by a
/// DST gap move forward by an hour.
pub fn parse_instant<Tz: TimeZone>(raw: &str, zone: &Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(fixed) = DateTime::parse_from_rfc3339(raw) {
        return Some(fixed.with_timezone(zone));
    }
    let naive = LOCAL_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(raw, layout).ok())?;
    zone.from_local_datetime(&naive)
        .earliest()
        .or_else(|| {
            let shifted = naive.checked_add_signed(TimeDelta::hours(1))?;
            zone.from_local_datetime(&shifted).earliest()
        })
}
