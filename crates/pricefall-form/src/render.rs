//! Turning panel reports into display text.

use std::fmt::{self, Display};

use chrono::{TimeZone, Utc};
use pricefall_core::constants::DEFAULT_PRICE_UNIT;
use pricefall_core::error::{InputField, PriceError, ValidationError};
use pricefall_core::types::{PriceOutcome, TimeOutcome};
use serde::Serialize;

use crate::error::FormError;
use crate::form::{PanelReport, PriceReport, TimeReport};
use crate::format::{format_instant, format_price};
use crate::messages::{Locale, MessageCatalog};
use crate::snapshot::Panel;

/// Display text for one panel. Empty slots are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPanel {
    pub panel: Panel,
    pub message: Option<String>,
    pub end_time: Option<String>,
    pub value: Option<String>,
}

impl RenderedPanel {
    fn empty(panel: Panel) -> Self {
        Self {
            panel,
            message: None,
            end_time: None,
            value: None,
        }
    }
}

impl Display for RenderedPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.panel)?;
        if let Some(end_time) = &self.end_time {
            writeln!(f, "  end:     {end_time}")?;
        }
        if let Some(value) = &self.value {
            writeln!(f, "  result:  {value}")?;
        }
        if let Some(message) = &self.message {
            writeln!(f, "  message: {message}")?;
        }
        Ok(())
    }
}

/// Maps reports to strings with a catalog, a price unit and a display zone.
#[derive(Clone)]
pub struct Presenter<Tz> {
    catalog: &'static dyn MessageCatalog,
    unit: String,
    zone: Tz,
}

impl<Tz> Presenter<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    pub fn new(locale: Locale, unit: impl Into<String>, zone: Tz) -> Self {
        Self::with_catalog(locale.catalog(), unit, zone)
    }

    pub fn with_catalog(
        catalog: &'static dyn MessageCatalog,
        unit: impl Into<String>,
        zone: Tz,
    ) -> Self {
        Self {
            catalog,
            unit: unit.into(),
            zone,
        }
    }

    /// Japanese wording, `BPC` unit.
    pub fn default_in(zone: Tz) -> Self {
        Self::new(Locale::Ja, DEFAULT_PRICE_UNIT, zone)
    }

    pub fn render(&self, report: &PanelReport) -> RenderedPanel {
        match report {
            PanelReport::Time(r) => self.render_time(r),
            PanelReport::Price(r) => self.render_price(r),
        }
    }

    pub fn render_time(&self, report: &TimeReport) -> RenderedPanel {
        let mut out = RenderedPanel::empty(Panel::Time);
        out.end_time = report.end_time.map(|t| format_instant(t, &self.zone));

        match &report.outcome {
            Ok(TimeOutcome::Reached(t)) => out.value = Some(format_instant(*t, &self.zone)),
            Ok(TimeOutcome::AlreadyReached) => {
                out.value = Some(self.catalog.already_reached().to_string());
                if report.below_target {
                    out.message = Some(self.catalog.current_below_target().to_string());
                }
            }
            Ok(TimeOutcome::AlreadyAtTarget) => {
                out.value = Some(self.catalog.already_at_target().to_string())
            }
            Ok(TimeOutcome::NeverReached) => {
                out.message = Some(self.catalog.never_reached().to_string())
            }
            Ok(TimeOutcome::NeverReachedWithinWindow) => {
                out.value = Some(self.catalog.never_reached_within_window().to_string())
            }
            Err(err) => out.message = Some(self.error_message(Panel::Time, err).to_string()),
        }
        out
    }

    pub fn render_price(&self, report: &PriceReport) -> RenderedPanel {
        let mut out = RenderedPanel::empty(Panel::Price);

        match &report.outcome {
            Ok(PriceOutcome::InRange(point)) => {
                out.value = Some(format_price(point.price, &self.unit));
            }
            Ok(PriceOutcome::ClampedToEnd(point)) => {
                out.message = Some(self.catalog.query_after_end().to_string());
                out.value = Some(format_price(point.price, &self.unit));
            }
            Err(err) => out.message = Some(self.error_message(Panel::Price, err).to_string()),
        }
        out
    }

    fn error_message(&self, panel: Panel, err: &FormError) -> &'static str {
        match err {
            FormError::Empty(_) => self.catalog.missing_fields(panel),
            FormError::InvalidInstant(_) => self.catalog.invalid_instant(panel),
            FormError::Price(PriceError::Validation(ValidationError::MissingOrNaN(field))) => {
                match field {
                    InputField::StartTime | InputField::QueryTime => {
                        self.catalog.invalid_instant(panel)
                    }
                    _ => self.catalog.missing_fields(panel),
                }
            }
            FormError::Price(PriceError::Validation(ValidationError::InvertedPrices { .. })) => {
                self.catalog.inverted_prices()
            }
            FormError::Price(PriceError::Validation(ValidationError::SpanOverflow { .. })) => {
                self.catalog.price_span_too_large()
            }
            FormError::Price(PriceError::InvalidCurrentPrice { .. }) => {
                self.catalog.invalid_current_price()
            }
            FormError::Price(PriceError::OutOfRangeBefore { .. }) => {
                self.catalog.query_before_start()
            }
        }
    }
}

impl Presenter<Utc> {
    /// Presenter that shows instants in UTC.
    pub fn utc(locale: Locale, unit: impl Into<String>) -> Self {
        Self::new(locale, unit, Utc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use pricefall_core::types::PricePoint;

    use crate::messages::{English, Japanese};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
    }

    fn presenter() -> Presenter<Utc> {
        Presenter::utc(Locale::En, "BPC")
    }

    #[test]
    fn reached_time_rendered() {
        let report = TimeReport {
            end_time: Some(at(6, 0)),
            outcome: Ok(TimeOutcome::Reached(at(4, 6))),
            below_target: false,
        };
        let out = presenter().render_time(&report);
        assert_eq!(out.end_time.as_deref(), Some("2024/01/06 00:00"));
        assert_eq!(out.value.as_deref(), Some("2024/01/04 06:00"));
        assert_eq!(out.message, None);
    }

    #[test]
    fn never_reached_is_a_message() {
        let report = TimeReport {
            end_time: Some(at(6, 0)),
            outcome: Ok(TimeOutcome::NeverReached),
            below_target: false,
        };
        let out = presenter().render_time(&report);
        assert!(out.value.is_none());
        assert_eq!(out.message.as_deref(), Some(English.never_reached()));
    }

    #[test]
    fn clamped_price_has_notice_and_value() {
        let report = PriceReport {
            end_time: Some(at(6, 0)),
            outcome: Ok(PriceOutcome::ClampedToEnd(PricePoint {
                time: at(9, 0),
                price: 250.0,
            })),
        };
        let out = presenter().render_price(&report);
        assert_eq!(out.value.as_deref(), Some("250 BPC"));
        assert_eq!(out.message.as_deref(), Some(English.query_after_end()));
    }

    #[test]
    fn errors_map_to_catalog() {
        let p = Presenter::utc(Locale::Ja, "BPC");
        let report = PriceReport {
            end_time: None,
            outcome: Err(FormError::Empty(InputField::QueryTime)),
        };
        assert_eq!(
            p.render_price(&report).message.as_deref(),
            Some(Japanese.missing_fields(Panel::Price))
        );

        let report = TimeReport {
            end_time: None,
            outcome: Err(ValidationError::InvertedPrices {
                start_price: 1.0,
                end_price: 2.0,
            }
            .into()),
            below_target: false,
        };
        assert_eq!(
            p.render_time(&report).message.as_deref(),
            Some(Japanese.inverted_prices())
        );
    }

    #[test]
    fn below_target_adds_notice() {
        let report = TimeReport {
            end_time: Some(at(6, 0)),
            outcome: Ok(TimeOutcome::AlreadyReached),
            below_target: true,
        };
        let out = Presenter::utc(Locale::Ja, "BPC").render_time(&report);
        assert_eq!(out.value.as_deref(), Some("既に到達済み"));
        assert_eq!(
            out.message.as_deref(),
            Some("現在の価格が目標価格より低い場合、既に目標価格に到達しています。")
        );
    }

    #[test]
    fn span_overflow_has_its_own_message() {
        let report = PriceReport {
            end_time: None,
            outcome: Err(ValidationError::SpanOverflow {
                start_price: 1.0e308,
                end_price: -1.0e308,
            }
            .into()),
        };
        assert_eq!(
            presenter().render_price(&report).message.as_deref(),
            Some(English.price_span_too_large())
        );
    }

    #[test]
    fn display_lists_filled_slots() {
        let report = TimeReport {
            end_time: Some(at(6, 0)),
            outcome: Ok(TimeOutcome::AlreadyReached),
            below_target: false,
        };
        let text = presenter().render_time(&report).to_string();
        assert!(text.starts_with("[time]"));
        assert!(text.contains("end:     2024/01/06 00:00"));
        assert!(text.contains("result:  Already reached"));
        assert!(!text.contains("message"));
    }

    #[test]
    fn json_shape() {
        let report = TimeReport {
            end_time: None,
            outcome: Ok(TimeOutcome::AlreadyAtTarget),
            below_target: false,
        };
        let json = serde_json::to_value(presenter().render_time(&report)).unwrap();
        assert_eq!(json["panel"], "time");
        assert_eq!(json["value"], "Same as the current price");
        assert!(json["end_time"].is_null());
    }
}
