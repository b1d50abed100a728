//! Window validation.
//!
//! Turns raw caller input into an [`AuctionWindow`]. Checks run in a fixed
//! order: missing or non-finite fields first, then price ordering, then the
//! price span.

use chrono::{DateTime, Days, LocalResult, TimeDelta, TimeZone, Utc};
use tracing::trace;

use crate::constants::AUCTION_WINDOW_DAYS;
use crate::error::{InputField, ValidationError};
use crate::types::AuctionWindow;

/// Validate raw window inputs and derive the end time.
///
/// `None` stands for a field that was absent or did not parse. The end time is
/// five calendar days after `start_time` in its own zone, so a window that
/// spans a DST change is 119 or 121 hours long.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use pricefall_core::validation::validate_window;
///
/// let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let window = validate_window(Some(start), Some(1000.0), Some(0.0)).unwrap();
/// assert_eq!(window.end_time(), Utc.with_ymd_and_hms(2024, 1, 6, 0, 0, 0).unwrap());
/// ```
pub fn validate_window<Tz: TimeZone>(
    start_time: Option<DateTime<Tz>>,
    start_price: Option<f64>,
    end_price: Option<f64>,
) -> Result<AuctionWindow, ValidationError> {
    let start_time = start_time.ok_or(ValidationError::MissingOrNaN(InputField::StartTime))?;
    let start_price = require_finite(start_price, InputField::StartPrice)?;
    let end_price = require_finite(end_price, InputField::EndPrice)?;

    if start_price < end_price {
        return Err(ValidationError::InvertedPrices {
            start_price,
            end_price,
        });
    }
    // Each price may be finite while their difference is not.
    if !(start_price - end_price).is_finite() {
        return Err(ValidationError::SpanOverflow {
            start_price,
            end_price,
        });
    }

    let end_time =
        window_end(&start_time).ok_or(ValidationError::MissingOrNaN(InputField::StartTime))?;
    let window = AuctionWindow::from_parts(
        start_time.with_timezone(&Utc),
        end_time,
        start_price,
        end_price,
    );
    trace!(
        start = %window.start_time(),
        end = %window.end_time(),
        rate = window.decay_rate(),
        "validated auction window"
    );
    Ok(window)
}

/// Five calendar days after `start`, following the local day-length rules.
///
/// A local end time that falls in a DST gap resolves by elapsed time; an
/// ambiguous one takes the earlier instant. `None` on calendar overflow.
pub fn window_end<Tz: TimeZone>(start: &DateTime<Tz>) -> Option<DateTime<Utc>> {
    let local_end = start
        .naive_local()
        .checked_add_days(Days::new(AUCTION_WINDOW_DAYS))?;
    match start.timezone().from_local_datetime(&local_end) {
        LocalResult::Single(end) => Some(end.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => start
            .with_timezone(&Utc)
            .checked_add_signed(TimeDelta::days(AUCTION_WINDOW_DAYS as i64)),
    }
}

/// Reject absent, NaN and infinite values.
pub fn require_finite(value: Option<f64>, field: InputField) -> Result<f64, ValidationError> {
    match value {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(ValidationError::MissingOrNaN(field)),
    }
}
