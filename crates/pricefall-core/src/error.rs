//! Error types for Pricefall.
//!
//! Only conditions that stop a computation live here. Regimes such as
//! "already reached" or "clamped to end" are outcomes, see [`crate::types`].
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input field a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    StartTime,
    StartPrice,
    EndPrice,
    CurrentPrice,
    TargetPrice,
    QueryTime,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::StartTime => "start time",
            Self::StartPrice => "start price",
            Self::EndPrice => "end price",
            Self::CurrentPrice => "current price",
            Self::TargetPrice => "target price",
            Self::QueryTime => "query time",
        };
        f.write_str(name)
    }
}

impl InputField {
    pub const ALL: [InputField; 6] = [
        Self::StartTime,
        Self::StartPrice,
        Self::EndPrice,
        Self::CurrentPrice,
        Self::TargetPrice,
        Self::QueryTime,
    ];

    /// Fields that describe the window itself.
    pub fn is_window_field(&self) -> bool {
        matches!(self, Self::StartTime | Self::StartPrice | Self::EndPrice)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for InputField {
    type Err = UnknownField;

    /// Accepts snake_case and kebab-case names plus the short aliases
    /// `start`, `current`, `target` and `at`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "start_time" | "start" | "startdate" => Ok(Self::StartTime),
            "start_price" | "startprice" => Ok(Self::StartPrice),
            "end_price" | "endprice" => Ok(Self::EndPrice),
            "current_price" | "current" | "currentpricetime" => Ok(Self::CurrentPrice),
            "target_price" | "target" | "targetpricetime" => Ok(Self::TargetPrice),
            "query_time" | "at" | "predictdatetime" => Ok(Self::QueryTime),
            _ => Err(UnknownField(s.trim().to_string())),
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ValidationError {
    #[error("missing or not a number: {0}")] MissingOrNaN(InputField),
    #[error("start price {start_price} is below end price {end_price}")] InvertedPrices { start_price: f64, end_price: f64 },
    #[error("price span from {start_price} to {end_price} is not representable")] SpanOverflow { start_price: f64, end_price: f64 },
}

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PriceError {
    #[error("query time {query} is before window start {start}")] OutOfRangeBefore { query: DateTime<Utc>, start: DateTime<Utc> },
    #[error("current price {current} exceeds start price {ceiling}")] InvalidCurrentPrice { current: f64, ceiling: f64 },
    #[error(transparent)] Validation(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_message_names_field() {
        let err = ValidationError::MissingOrNaN(InputField::EndPrice);
        assert_eq!(err.to_string(), "missing or not a number: end price");
    }

    #[test]
    fn validation_converts_into_price_error() {
        let err: PriceError = ValidationError::MissingOrNaN(InputField::TargetPrice).into();
        assert!(matches!(
            err,
            PriceError::Validation(ValidationError::MissingOrNaN(InputField::TargetPrice))
        ));
        assert_eq!(err.to_string(), "missing or not a number: target price");
    }

    #[test]
    fn span_overflow_names_both_prices() {
        let err = ValidationError::SpanOverflow {
            start_price: 1.0e308,
            end_price: -1.0e308,
        };
        let text = err.to_string();
        assert!(text.starts_with("price span from 1000"));
        assert!(text.contains(" to -1000"));
        assert!(text.ends_with("is not representable"));
    }

    #[test]
    fn parse_field_names() {
        assert_eq!("start".parse::<InputField>().unwrap(), InputField::StartTime);
        assert_eq!("end-price".parse::<InputField>().unwrap(), InputField::EndPrice);
        assert_eq!("targetPriceTime".parse::<InputField>().unwrap(), InputField::TargetPrice);
        assert_eq!(" at ".parse::<InputField>().unwrap(), InputField::QueryTime);
        assert_eq!(
            "volume".parse::<InputField>().unwrap_err(),
            UnknownField("volume".to_string())
        );
    }

    #[test]
    fn window_fields() {
        let window: Vec<_> = InputField::ALL
            .into_iter()
            .filter(InputField::is_window_field)
            .collect();
        assert_eq!(
            window,
            [InputField::StartTime, InputField::StartPrice, InputField::EndPrice]
        );
    }

    #[test]
    fn input_field_serializes_snake_case() {
        let json = serde_json::to_string(&InputField::CurrentPrice).unwrap();
        assert_eq!(json, "\"current_price\"");
    }
}
