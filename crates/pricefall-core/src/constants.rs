//! Auction constants. Prices are plain `f64` in the auction's unit.

/// Length of every auction window in calendar days.
///
/// # Examples
///
/// ```
/// use pricefall_core::constants::AUCTION_WINDOW_DAYS;
/// assert_eq!(AUCTION_WINDOW_DAYS, 5);
/// ```
pub const AUCTION_WINDOW_DAYS: u64 = 5;

/// Milliseconds per hour, the unit all elapsed-time arithmetic is done in.
pub const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Unit label shown after formatted prices.
pub const DEFAULT_PRICE_UNIT: &str = "BPC";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_per_hour() {
        assert_eq!(MILLIS_PER_HOUR, 60.0 * 60.0 * 1000.0);
    }
}
