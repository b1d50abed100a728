//! Worked examples on a 1000 -> 0 window starting 2024-01-01T00:00Z.

use pricefall_core::error::{PriceError, ValidationError};
use pricefall_core::traits::PriceModel;
use pricefall_core::types::TimeOutcome;
use pricefall_core::validation::validate_window;
use pricefall_decay::LinearDecayModel;
use pricefall_tests::helpers::*;

#[test]
fn window_end_and_rate() {
    let w = window(1000.0, 0.0);
    assert_eq!(w.end_time(), jan(6, 0));
    assert!((w.decay_rate() - 8.333_333_333).abs() < 1e-6);
}

#[test]
fn price_after_half_a_day() {
    let w = window(1000.0, 0.0);
    let price = LinearDecayModel.price_at(&w, jan(1, 12)).unwrap().price();
    assert!((price - 900.0).abs() < 1e-9);
}

#[test]
fn target_reached_thirty_hours_later() {
    let w = window(1000.0, 0.0);
    let out = LinearDecayModel
        .time_for_price(&w, 500.0, 250.0, jan(3, 0), jan(3, 0))
        .unwrap();
    assert_eq!(out, TimeOutcome::Reached(jan(4, 6)));
}

#[test]
fn target_past_window_end() {
    let w = window(1000.0, 0.0);
    let near_end = jan(5, 22);
    let out = LinearDecayModel
        .time_for_price(&w, 10.0, 5.0, near_end, near_end)
        .unwrap();
    assert_eq!(out, TimeOutcome::NeverReachedWithinWindow);
}

#[test]
fn inverted_window() {
    let err = validate_window(Some(jan(1, 0)), Some(100.0), Some(200.0)).unwrap_err();
    assert!(matches!(err, ValidationError::InvertedPrices { .. }));
}

#[test]
fn after_end_clamps_to_floor() {
    let w = window(1000.0, 120.0);
    for day in [6, 7, 31] {
        let out = LinearDecayModel.price_at(&w, jan(day, 1)).unwrap();
        assert!(out.is_clamped());
        assert_eq!(out.price(), 120.0);
    }
}

#[test]
fn before_start_is_rejected() {
    let w = window(1000.0, 0.0);
    let query = jan(1, 0) - chrono::TimeDelta::seconds(1);
    assert!(matches!(
        LinearDecayModel.price_at(&w, query),
        Err(PriceError::OutOfRangeBefore { .. })
    ));
}

#[test]
fn current_price_now() {
    let w = window(1200.0, 0.0);
    let out = LinearDecayModel.current_price(&w, jan(2, 0)).unwrap();
    assert_eq!(out.price(), 960.0);
}
