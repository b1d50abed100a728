//! # pricefall-core
//! Foundation types and traits for linear-decay auction pricing.

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;
pub mod validation;
