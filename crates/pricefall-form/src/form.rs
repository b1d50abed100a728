//! Form evaluation: snapshot in, structured reports out.

use chrono::{DateTime, TimeZone, Utc};
use pricefall_core::error::{InputField, ValidationError};
use pricefall_core::traits::PriceModel;
use pricefall_core::types::{AuctionWindow, PriceOutcome, TimeOutcome};
use pricefall_core::validation::validate_window;
use pricefall_decay::LinearDecayModel;
use tracing::debug;

use crate::error::FormError;
use crate::parse::{is_blank, parse_instant, parse_price};
use crate::snapshot::{FieldChange, FormSnapshot, Panel, Recompute};

/// Output of the time panel.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeReport {
    /// Set as soon as the window validates, even if a later check fails.
    pub end_time: Option<DateTime<Utc>>,
    pub outcome: Result<TimeOutcome, FormError>,
    /// `AlreadyReached` because the current price is already below the target.
    pub below_target: bool,
}

/// Output of the price panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceReport {
    pub end_time: Option<DateTime<Utc>>,
    pub outcome: Result<PriceOutcome, FormError>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelReport {
    Time(TimeReport),
    Price(PriceReport),
}

/// A form bound to a price model and the zone its wall-clock text is read in.
#[derive(Debug, Clone)]
pub struct Form<M, Tz: TimeZone> {
    model: M,
    zone: Tz,
    snapshot: FormSnapshot,
}

impl<Tz: TimeZone> Form<LinearDecayModel, Tz> {
    /// An empty form over the linear decay model.
    pub fn linear(zone: Tz) -> Self {
        Self::new(LinearDecayModel::new(), zone)
    }
}

impl<M: PriceModel, Tz: TimeZone> Form<M, Tz> {
    pub fn new(model: M, zone: Tz) -> Self {
        Self::with_snapshot(model, zone, FormSnapshot::new())
    }

    pub fn with_snapshot(model: M, zone: Tz, snapshot: FormSnapshot) -> Self {
        Self {
            model,
            zone,
            snapshot,
        }
    }

    pub fn snapshot(&self) -> &FormSnapshot {
        &self.snapshot
    }

    pub fn zone(&self) -> &Tz {
        &self.zone
    }

    /// Record a field edit and return the panels it invalidates.
    pub fn apply(&mut self, change: FieldChange) -> Recompute {
        let field = change.field;
        let dirty = self.snapshot.apply(change);
        debug!(%field, time = dirty.time, price = dirty.price, "field changed");
        dirty
    }

    /// Evaluate one panel. `now` serves as both reference and evaluation time.
    pub fn evaluate(&self, panel: Panel, now: DateTime<Utc>) -> PanelReport {
        match panel {
            Panel::Time => PanelReport::Time(self.evaluate_time(now, now)),
            Panel::Price => PanelReport::Price(self.evaluate_price()),
        }
    }

    /// When will the target price be reached?
    ///
    /// `reference_now` is the base of the extrapolation, `evaluation_now` the
    /// instant against which "already past" is judged.
    pub fn evaluate_time(
        &self,
        reference_now: DateTime<Utc>,
        evaluation_now: DateTime<Utc>,
    ) -> TimeReport {
        let window = match self.window(Panel::Time) {
            Ok(window) => window,
            Err(err) => {
                return TimeReport {
                    end_time: None,
                    outcome: Err(err),
                    below_target: false,
                };
            }
        };

        let outcome = self.time_outcome(&window, reference_now, evaluation_now);
        let below_target = matches!(outcome, Ok(TimeOutcome::AlreadyReached))
            && matches!(
                (self.price(InputField::CurrentPrice), self.price(InputField::TargetPrice)),
                (Ok(current), Ok(target)) if current < target
            );
        debug!(?outcome, below_target, "time panel evaluated");

        TimeReport {
            end_time: Some(window.end_time()),
            outcome,
            below_target,
        }
    }

    /// What will the price be at the queried instant?
    pub fn evaluate_price(&self) -> PriceReport {
        let result = self.window(Panel::Price).and_then(|window| {
            let query = self.instant(InputField::QueryTime)?;
            let outcome = self
                .model
                .price_at(&window, query.with_timezone(&Utc))?;
            Ok((window, outcome))
        });
        debug!(?result, "price panel evaluated");

        match result {
            Ok((window, outcome)) => PriceReport {
                end_time: Some(window.end_time()),
                outcome: Ok(outcome),
            },
            Err(err) => PriceReport {
                end_time: None,
                outcome: Err(err),
            },
        }
    }

    fn time_outcome(
        &self,
        window: &AuctionWindow,
        reference_now: DateTime<Utc>,
        evaluation_now: DateTime<Utc>,
    ) -> Result<TimeOutcome, FormError> {
        let current = self.price(InputField::CurrentPrice)?;
        let target = self.price(InputField::TargetPrice)?;
        Ok(self
            .model
            .time_for_price(window, current, target, reference_now, evaluation_now)?)
    }

    /// Check order: every field filled, price ordering, then date parsing.
    fn window(&self, panel: Panel) -> Result<AuctionWindow, FormError> {
        self.check_filled(panel)?;

        let start_price = self.price(InputField::StartPrice)?;
        let end_price = self.price(InputField::EndPrice)?;
        if start_price < end_price {
            return Err(ValidationError::InvertedPrices {
                start_price,
                end_price,
            }
            .into());
        }

        let start = self.instant(InputField::StartTime)?;
        Ok(validate_window(Some(start), Some(start_price), Some(end_price))?)
    }

    fn check_filled(&self, panel: Panel) -> Result<(), FormError> {
        for &field in panel.fields() {
            let raw = self.snapshot.get(field);
            let filled = match field {
                InputField::StartTime | InputField::QueryTime => !is_blank(raw),
                _ => parse_price(raw).is_some(),
            };
            if !filled {
                return Err(FormError::Empty(field));
            }
        }
        Ok(())
    }

    fn price(&self, field: InputField) -> Result<f64, FormError> {
        parse_price(self.snapshot.get(field)).ok_or(FormError::Empty(field))
    }

    fn instant(&self, field: InputField) -> Result<DateTime<Tz>, FormError> {
        parse_instant(self.snapshot.get(field), &self.zone).ok_or(FormError::InvalidInstant(field))
    }
}
