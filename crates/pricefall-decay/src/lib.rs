//! # pricefall-decay: linear price decay model.
//!
//! The price falls in a straight line from the start price to the end price
//! over the auction window:
//! - **Interpolation**: `price(t) = start_price - rate * hours_elapsed(t)`,
//!   held at `end_price` once the window closes.
//! - **Extrapolation**: the wait until a target price is
//!   `(current - target) / rate` hours from a reference instant.
//! - **Flat windows** (`start_price == end_price`) are a separate regime with
//!   a zero rate, never a division by zero.

pub mod engine;

pub use engine::LinearDecayModel;
