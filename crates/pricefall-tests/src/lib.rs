//! Integration test suite for Pricefall.
//!
//! Exercises the model, validation and form layers together, including
//! windows that cross daylight-saving transitions.

pub mod helpers;
