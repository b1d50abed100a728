//! # pricefall-form
//! The boundary between a price form and the pure decay model.
//!
//! A [`Form`] owns the latest raw field text. Each [`FieldChange`] updates one
//! field and reports which panels must be recomputed; evaluating a panel parses
//! the snapshot, calls the [`PriceModel`](pricefall_core::traits::PriceModel)
//! and returns a structured report. [`Presenter`] turns reports into display
//! strings through a [`MessageCatalog`].

pub mod error;
pub mod form;
pub mod format;
pub mod messages;
pub mod parse;
pub mod render;
pub mod snapshot;

pub use error::FormError;
pub use form::{Form, PanelReport, PriceReport, TimeReport};
pub use messages::{English, Japanese, Locale, MessageCatalog};
pub use render::{Presenter, RenderedPanel};
pub use snapshot::{FieldChange, FormSnapshot, Panel, Recompute};
