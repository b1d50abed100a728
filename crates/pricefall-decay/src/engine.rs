//! Decay model implementing the [`PriceModel`] trait.
//!
//! All arithmetic is `f64` on millisecond-resolution instants. Results are
//! raw; rounding for display is left to callers.

use chrono::{DateTime, TimeDelta, Utc};
use pricefall_core::constants::MILLIS_PER_HOUR;
use pricefall_core::error::{InputField, PriceError};
use pricefall_core::traits::PriceModel;
use pricefall_core::types::{AuctionWindow, PriceOutcome, PricePoint, TimeOutcome};
use pricefall_core::validation::require_finite;
use tracing::debug;

/// The production price model: linear decay between the window bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearDecayModel;

impl LinearDecayModel {
    /// Create a new LinearDecayModel.
    pub fn new() -> Self {
        Self
    }
}

/// Price on the decay line at `time`, which must lie inside the window.
fn interpolate(window: &AuctionWindow, time: DateTime<Utc>) -> f64 {
    if window.is_flat() || time == window.start_time() {
        return window.start_price();
    }
    // Exact floor at the boundary; rate * duration need not round-trip.
    if time == window.end_time() {
        return window.end_price();
    }
    let price = window.start_price() - window.decay_rate() * window.hours_elapsed(time);
    price.max(window.end_price())
}

/// `base + hours`, truncated to whole milliseconds. `None` if unrepresentable.
fn offset_by_hours(base: DateTime<Utc>, hours: f64) -> Option<DateTime<Utc>> {
    let millis = (hours * MILLIS_PER_HOUR).trunc();
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return None;
    }
    let delta = TimeDelta::try_milliseconds(millis as i64)?;
    base.checked_add_signed(delta)
}

impl PriceModel for LinearDecayModel {
    fn price_at(
        &self,
        window: &AuctionWindow,
        query: DateTime<Utc>,
    ) -> Result<PriceOutcome, PriceError> {
        if query < window.start_time() {
            return Err(PriceError::OutOfRangeBefore {
                query,
                start: window.start_time(),
            });
        }

        if query > window.end_time() {
            return Ok(PriceOutcome::ClampedToEnd(PricePoint {
                time: query,
                price: window.end_price(),
            }));
        }

        Ok(PriceOutcome::InRange(PricePoint {
            time: query,
            price: interpolate(window, query),
        }))
    }

    fn time_for_price(
        &self,
        window: &AuctionWindow,
        current_price: f64,
        target_price: f64,
        reference_now: DateTime<Utc>,
        evaluation_now: DateTime<Utc>,
    ) -> Result<TimeOutcome, PriceError> {
        let current = require_finite(Some(current_price), InputField::CurrentPrice)?;
        let target = require_finite(Some(target_price), InputField::TargetPrice)?;

        // Price only falls, so a current price below the target has crossed it.
        if current < target {
            return Ok(TimeOutcome::AlreadyReached);
        }

        if current > window.start_price() {
            return Err(PriceError::InvalidCurrentPrice {
                current,
                ceiling: window.start_price(),
            });
        }

        if current == target {
            return Ok(TimeOutcome::AlreadyAtTarget);
        }

        if window.is_flat() {
            return Ok(TimeOutcome::NeverReached);
        }

        let hours_to_target = (current - target) / window.decay_rate();
        let Some(candidate) = offset_by_hours(reference_now, hours_to_target) else {
            debug!(hours_to_target, "target time overflows the calendar");
            return Ok(TimeOutcome::NeverReachedWithinWindow);
        };
        debug!(hours_to_target, %candidate, "extrapolated target time");

        if candidate > window.end_time() {
            Ok(TimeOutcome::NeverReachedWithinWindow)
        } else if candidate < evaluation_now {
            Ok(TimeOutcome::AlreadyReached)
        } else {
            Ok(TimeOutcome::Reached(candidate))
        }
    }
}
