//! Trait interfaces for Pricefall.
//!
//! - [`PriceModel`]: time/price conversion over an auction window
//!   (pricefall-decay implements)

use chrono::{DateTime, Utc};

use crate::error::PriceError;
use crate::types::{AuctionWindow, PriceOutcome, TimeOutcome};

/// Pure conversion between time and price inside an [`AuctionWindow`].
///
/// Implementations hold no state and never read the clock; every "now" is a
/// parameter.
pub trait PriceModel: Send + Sync {
    /// Price at `query`.
    ///
    /// Fails with [`PriceError::OutOfRangeBefore`] before the window start.
    /// After the end the price is held at `end_price` and reported as
    /// [`PriceOutcome::ClampedToEnd`].
    fn price_at(
        &self,
        window: &AuctionWindow,
        query: DateTime<Utc>,
    ) -> Result<PriceOutcome, PriceError>;

    /// When `target_price` will be reached, extrapolating from `current_price`.
    ///
    /// `current_price` is taken as given, not derived from `reference_now`.
    /// The wait is measured from `reference_now`; `evaluation_now` is only
    /// used to decide whether the predicted instant already lies in the past.
    fn time_for_price(
        &self,
        window: &AuctionWindow,
        current_price: f64,
        target_price: f64,
        reference_now: DateTime<Utc>,
        evaluation_now: DateTime<Utc>,
    ) -> Result<TimeOutcome, PriceError>;

    /// Price at the present instant `now`.
    fn current_price(
        &self,
        window: &AuctionWindow,
        now: DateTime<Utc>,
    ) -> Result<PriceOutcome, PriceError> {
        self.price_at(window, now)
    }

    /// [`PriceModel::time_for_price`] with a single notion of "now".
    fn time_for_price_now(
        &self,
        window: &AuctionWindow,
        current_price: f64,
        target_price: f64,
        now: DateTime<Utc>,
    ) -> Result<TimeOutcome, PriceError> {
        self.time_for_price(window, current_price, target_price, now, now)
    }
}
