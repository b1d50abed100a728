//! Property tests across random windows and instants.

use chrono::TimeDelta;
use pricefall_core::traits::PriceModel;
use pricefall_core::types::TimeOutcome;
use pricefall_decay::LinearDecayModel;
use pricefall_tests::helpers::*;
use proptest::prelude::*;

const HOUR_MS: i64 = 3_600_000;

proptest! {
    #[test]
    fn time_and_price_are_inverse(
        end in 0.0f64..1.0e6,
        gap in 1.0f64..1.0e6,
        elapsed_ms in 0i64..=(100 * HOUR_MS),
        frac in 0.01f64..0.99,
    ) {
        let w = window(end + gap, end);
        let t = w.start_time() + TimeDelta::milliseconds(elapsed_ms);
        let p = LinearDecayModel.price_at(&w, t).unwrap().price();
        let target = end + frac * (p - end);

        let out = LinearDecayModel.time_for_price(&w, p, target, t, t).unwrap();
        let reached = out.reached_at();
        prop_assert!(reached.is_some(), "expected Reached, got {:?}", out);
        let reached = reached.unwrap();
        prop_assert!(reached >= t);

        let back = LinearDecayModel.price_at(&w, reached).unwrap().price();
        let tolerance = 2.0 * w.decay_rate() / HOUR_MS as f64 + 1e-6;
        prop_assert!(
            (back - target).abs() <= tolerance,
            "target {} recomputed as {} (tol {})", target, back, tolerance
        );
    }

    #[test]
    fn same_price_is_already_at_target(
        end in 0.0f64..1.0e6,
        gap in 0.0f64..1.0e6,
        elapsed_ms in 0i64..=(120 * HOUR_MS),
    ) {
        let w = window(end + gap, end);
        let t = w.start_time() + TimeDelta::milliseconds(elapsed_ms);
        let p = LinearDecayModel.price_at(&w, t).unwrap().price();
        prop_assert_eq!(
            LinearDecayModel.time_for_price_now(&w, p, p, t).unwrap(),
            TimeOutcome::AlreadyAtTarget
        );
    }

    #[test]
    fn flat_windows(price in 0.0f64..1.0e6, below in 0.001f64..1.0e3, elapsed_ms in 0i64..=(120 * HOUR_MS)) {
        let w = window(price, price);
        let t = w.start_time() + TimeDelta::milliseconds(elapsed_ms);
        prop_assert_eq!(LinearDecayModel.price_at(&w, t).unwrap().price(), price);
        prop_assert_eq!(
            LinearDecayModel.time_for_price_now(&w, price, price, t).unwrap(),
            TimeOutcome::AlreadyAtTarget
        );
        prop_assert_eq!(
            LinearDecayModel.time_for_price_now(&w, price, price - below, t).unwrap(),
            TimeOutcome::NeverReached
        );
    }

    #[test]
    fn below_target_always_already_reached(
        current in -1.0e6f64..1.0e6,
        delta in 0.001f64..1.0e6,
        hours in 0i64..200,
    ) {
        let w = window(1000.0, 0.0);
        let now = w.start_time() + TimeDelta::hours(hours);
        prop_assert_eq!(
            LinearDecayModel.time_for_price_now(&w, current, current + delta, now).unwrap(),
            TimeOutcome::AlreadyReached
        );
    }

    #[test]
    fn identical_inputs_identical_outputs(
        current in 0.0f64..1000.0,
        target in 0.0f64..1000.0,
        hours in 0i64..120,
    ) {
        let w = window(1000.0, 0.0);
        let now = w.start_time() + TimeDelta::hours(hours);
        prop_assert_eq!(
            LinearDecayModel.time_for_price_now(&w, current, target, now),
            LinearDecayModel.time_for_price_now(&w, current, target, now)
        );
    }
}
