//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```
//! use cardquery_model::prelude::*;
//!
//! let card = Card::from_details(CardDetails::named("Llanowar Elves"));
//! assert_eq!(card.name(), "Llanowar Elves");
//! ```

pub use crate::models::{Card, CardDetails, ManaColor, Prices, DEFAULT_FINISH, DEFAULT_STATUS};
