//! Shared test helpers for integration tests.

use chrono::{
    DateTime, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc,
};
use pricefall_core::types::AuctionWindow;
use pricefall_core::validation::validate_window;

/// UTC instant in January 2024.
pub fn jan(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
}

/// Window starting 2024-01-01T00:00Z.
pub fn window(start_price: f64, end_price: f64) -> AuctionWindow {
    validate_window(Some(jan(1, 0)), Some(start_price), Some(end_price)).unwrap()
}

fn naive(month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

/// A US-Eastern-like zone with 2024 rules only.
///
/// UTC-5, switching to UTC-4 from 2024-03-10 02:00 local until
/// 2024-11-03 02:00 local (01:00 standard time).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToyEastern;

impl ToyEastern {
    pub fn standard() -> FixedOffset {
        FixedOffset::west_opt(5 * 3600).unwrap()
    }

    pub fn daylight() -> FixedOffset {
        FixedOffset::west_opt(4 * 3600).unwrap()
    }

    pub fn at(month: u32, day: u32, hour: u32, minute: u32) -> DateTime<ToyEastern> {
        let local = naive(month, day, hour) + chrono::TimeDelta::minutes(minute as i64);
        ToyEastern.from_local_datetime(&local).earliest().unwrap()
    }
}

impl TimeZone for ToyEastern {
    type Offset = FixedOffset;

    fn from_offset(_offset: &FixedOffset) -> Self {
        ToyEastern
    }

    fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
        self.offset_from_local_datetime(&local.and_hms_opt(0, 0, 0).unwrap())
    }

    fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
        let spring_gap = naive(3, 10, 2)..naive(3, 10, 3);
        let fall_overlap = naive(11, 3, 1)..naive(11, 3, 2);
        if spring_gap.contains(local) {
            LocalResult::None
        } else if fall_overlap.contains(local) {
            LocalResult::Ambiguous(Self::daylight(), Self::standard())
        } else if (naive(3, 10, 3)..naive(11, 3, 1)).contains(local) {
            LocalResult::Single(Self::daylight())
        } else {
            LocalResult::Single(Self::standard())
        }
    }

    fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
        self.offset_from_utc_datetime(&utc.and_hms_opt(0, 0, 0).unwrap())
    }

    fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
        if (naive(3, 10, 7)..naive(11, 3, 6)).contains(utc) {
            Self::daylight()
        } else {
            Self::standard()
        }
    }
}
