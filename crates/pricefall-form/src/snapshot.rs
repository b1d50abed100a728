//! Raw form state and change events.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use pricefall_core::error::{InputField, UnknownField};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One output area of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    /// End time and the instant a target price is reached.
    Time,
    /// Price at a queried instant.
    Price,
}

impl Panel {
    /// Fields the panel reads, in the order they are checked.
    pub fn fields(&self) -> &'static [InputField] {
        match self {
            Self::Time => &[
                InputField::StartTime,
                InputField::StartPrice,
                InputField::EndPrice,
                InputField::CurrentPrice,
                InputField::TargetPrice,
            ],
            Self::Price => &[
                InputField::StartTime,
                InputField::StartPrice,
                InputField::EndPrice,
                InputField::QueryTime,
            ],
        }
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Time => f.write_str("time"),
            Self::Price => f.write_str("price"),
        }
    }
}

/// Panels that need re-evaluation after a change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Recompute {
    pub time: bool,
    pub price: bool,
}

impl Recompute {
    pub const ALL: Recompute = Recompute {
        time: true,
        price: true,
    };

    pub const NONE: Recompute = Recompute {
        time: false,
        price: false,
    };

    pub fn for_field(field: InputField) -> Self {
        if field.is_window_field() {
            return Self::ALL;
        }
        match field {
            InputField::CurrentPrice | InputField::TargetPrice => Self {
                time: true,
                price: false,
            },
            _ => Self {
                time: false,
                price: true,
            },
        }
    }

    pub fn panels(&self) -> impl Iterator<Item = Panel> {
        [(self.time, Panel::Time), (self.price, Panel::Price)]
            .into_iter()
            .filter_map(|(dirty, panel)| dirty.then_some(panel))
    }

    pub fn is_empty(&self) -> bool {
        !self.time && !self.price
    }
}

/// A single field edit: `field=value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: InputField,
    pub value: String,
}

impl FieldChange {
    pub fn new(field: InputField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChangeParseError {
    #[error("expected field=value, got {0:?}")] MissingSeparator(String),
    #[error(transparent)] UnknownField(#[from] UnknownField),
}

impl FromStr for FieldChange {
    type Err = ChangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = s
            .split_once('=')
            .ok_or_else(|| ChangeParseError::MissingSeparator(s.to_string()))?;
        Ok(Self::new(name.parse()?, value.trim()))
    }
}

/// Latest raw text of every field. Absent fields read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    fields: HashMap<InputField, String>,
}

impl FormSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: InputField) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: InputField, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    /// Apply a change. Unchanged values trigger no recompute.
    pub fn apply(&mut self, change: FieldChange) -> Recompute {
        if self.get(change.field) == change.value {
            return Recompute::NONE;
        }
        let dirty = Recompute::for_field(change.field);
        self.fields.insert(change.field, change.value);
        dirty
    }

    /// Builder-style setter for tests and one-shot commands.
    pub fn with(mut self, field: InputField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_fields_recompute_everything() {
        for field in [InputField::StartTime, InputField::StartPrice, InputField::EndPrice] {
            assert_eq!(Recompute::for_field(field), Recompute::ALL);
        }
    }

    #[test]
    fn panel_specific_fields() {
        let r = Recompute::for_field(InputField::TargetPrice);
        assert_eq!(r.panels().collect::<Vec<_>>(), [Panel::Time]);
        let r = Recompute::for_field(InputField::QueryTime);
        assert_eq!(r.panels().collect::<Vec<_>>(), [Panel::Price]);
    }

    #[test]
    fn apply_updates_and_reports() {
        let mut snap = FormSnapshot::new();
        let dirty = snap.apply(FieldChange::new(InputField::StartPrice, "1000"));
        assert_eq!(dirty, Recompute::ALL);
        assert_eq!(snap.get(InputField::StartPrice), "1000");
        assert_eq!(snap.get(InputField::EndPrice), "");
    }

    #[test]
    fn unchanged_value_is_noop() {
        let mut snap = FormSnapshot::new().with(InputField::CurrentPrice, "500");
        let dirty = snap.apply(FieldChange::new(InputField::CurrentPrice, "500"));
        assert!(dirty.is_empty());
    }

    #[test]
    fn parse_change_lines() {
        let change: FieldChange = "start_price = 1000".parse().unwrap();
        assert_eq!(change, FieldChange::new(InputField::StartPrice, "1000"));

        let change: FieldChange = "at=2024-01-01T12:00".parse().unwrap();
        assert_eq!(change.field, InputField::QueryTime);
        assert_eq!(change.value, "2024-01-01T12:00");

        assert!(matches!(
            "start_price".parse::<FieldChange>(),
            Err(ChangeParseError::MissingSeparator(_))
        ));
        assert!(matches!(
            "volume=3".parse::<FieldChange>(),
            Err(ChangeParseError::UnknownField(_))
        ));
    }

    #[test]
    fn panel_field_order() {
        assert_eq!(Panel::Price.fields().last(), Some(&InputField::QueryTime));
        assert_eq!(Panel::Time.fields().len(), 5);
    }
}
