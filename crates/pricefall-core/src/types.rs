//! Value types for auction pricing.
//!
//! Every type here is constructed fresh per calculation and never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::MILLIS_PER_HOUR;

/// A validated five-day auction window.
///
/// Only [`crate::validation::validate_window`] builds one, so
/// `start_price >= end_price` and both prices are finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AuctionWindow {
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    start_price: f64,
    end_price: f64,
}

impl AuctionWindow {
    pub(crate) fn from_parts(
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        start_price: f64,
        end_price: f64,
    ) -> Self {
        Self {
            start_time,
            end_time,
            start_price,
            end_price,
        }
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Start time plus five calendar days in the zone the window was validated in.
    pub fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    pub fn start_price(&self) -> f64 {
        self.start_price
    }

    pub fn end_price(&self) -> f64 {
        self.end_price
    }

    /// Window length in milliseconds.
    pub fn duration_millis(&self) -> i64 {
        (self.end_time - self.start_time).num_milliseconds()
    }

    /// Window length in hours. 120 except across a DST transition.
    pub fn duration_hours(&self) -> f64 {
        self.duration_millis() as f64 / MILLIS_PER_HOUR
    }

    /// Price drop per hour.
    pub fn decay_rate(&self) -> f64 {
        (self.start_price - self.end_price) / self.duration_hours()
    }

    /// True when the price never moves (`start_price == end_price`).
    pub fn is_flat(&self) -> bool {
        self.decay_rate() == 0.0
    }

    /// Whether `time` lies within `[start_time, end_time]`.
    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        time >= self.start_time && time <= self.end_time
    }

    /// Hours from the window start to `time`, negative before the start.
    ///
    /// Computed from the millisecond difference, so fractional hours are kept.
    pub fn hours_elapsed(&self, time: DateTime<Utc>) -> f64 {
        (time - self.start_time).num_milliseconds() as f64 / MILLIS_PER_HOUR
    }
}

/// A sampled `(time, price)` pair on the decay line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub time: DateTime<Utc>,
    pub price: f64,
}

/// Result of asking for the price at an instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PriceOutcome {
    /// The instant lies inside the window.
    InRange(PricePoint),
    /// The instant is past the end; the price is held at the floor.
    ClampedToEnd(PricePoint),
}

impl PriceOutcome {
    pub fn point(&self) -> PricePoint {
        match self {
            Self::InRange(p) | Self::ClampedToEnd(p) => *p,
        }
    }

    pub fn price(&self) -> f64 {
        self.point().price
    }

    pub fn is_clamped(&self) -> bool {
        matches!(self, Self::ClampedToEnd(_))
    }
}

/// Result of asking when a target price will be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "time", rename_all = "snake_case")]
pub enum TimeOutcome {
    /// The price is already at or below the target.
    AlreadyReached,
    /// Flat window and the current price equals the target.
    AlreadyAtTarget,
    /// Flat window and the target differs from the current price.
    NeverReached,
    /// The target would only be reached after the window closes.
    NeverReachedWithinWindow,
    /// The target is reached at this instant.
    Reached(DateTime<Utc>),
}

impl TimeOutcome {
    pub fn reached_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Reached(t) => Some(*t),
            _ => None,
        }
    }
}
