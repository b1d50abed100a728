//! Display formatting for instants and prices.

use std::fmt::Display;

use chrono::{DateTime, TimeZone, Utc};

/// `YYYY/MM/DD HH:MM`, minutes precision.
pub const DISPLAY_LAYOUT: &str = "%Y/%m/%d %H:%M";

/// Render `time` as wall-clock text in `zone`.
pub fn format_instant<Tz>(time: DateTime<Utc>, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    time.with_timezone(zone).format(DISPLAY_LAYOUT).to_string()
}

/// Round to a whole number (half away from zero) and append the unit.
pub fn format_price(price: f64, unit: &str) -> String {
    let rounded = price.round();
    // Avoid printing "-0".
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    if unit.is_empty() {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.0} {unit}")
    }
}
