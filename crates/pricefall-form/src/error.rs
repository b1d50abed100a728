//! Errors raised while turning form text into model input.
use pricefall_core::error::{InputField, PriceError, ValidationError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("required field is empty or not a number: {0}")] Empty(InputField),
    #[error("not a valid date and time: {0}")] InvalidInstant(InputField),
    #[error(transparent)] Price(#[from] PriceError),
}

impl From<ValidationError> for FormError {
    fn from(err: ValidationError) -> Self {
        Self::Price(PriceError::Validation(err))
    }
}
