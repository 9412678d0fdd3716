//! Card record data model.
//!
//! # Quick Start
//!
//! For convenient imports, use the prelude:
//!
//! ```
//! use cardquery_model::prelude::*;
//! ```
//!
//! This re-exports [`Card`], [`CardDetails`], [`Prices`] and [`ManaColor`].
//! The query engine only ever reads these records; nothing in this crate
//! mutates a card after construction.

pub mod models;
pub mod prelude;

pub use models::{Card, CardDetails, ManaColor, Prices, DEFAULT_FINISH, DEFAULT_STATUS};
