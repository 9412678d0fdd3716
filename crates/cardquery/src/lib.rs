//! Card attribute filter query engine.
//!
//! This crate compiles short search queries such as
//! `cmc<3 c:wu t:creature -o:"draw a card"` into reusable predicates over
//! [`Card`](cardquery_model::Card) records and applies them to in-memory card
//! lists.
//!
//! - [`filter`] holds the query language: lexer, parser, field table,
//!   operator families, compiler and evaluator.
//! - [`catalog`] loads card lists from JSON files for callers that keep their
//!   catalog on disk.
//!
//! # Example
//!
//! ```
//! use cardquery::filter::{filter_cards, make_filter};
//! use cardquery_model::{Card, CardDetails};
//!
//! let mut bolt = CardDetails::named("Lightning Bolt");
//! bolt.color_identity = vec!["R".to_string()];
//! let cards = vec![Card::from_details(bolt)];
//!
//! let filter = make_filter("c:r").unwrap();
//! assert_eq!(filter_cards(&cards, filter.as_ref()).len(), 1);
//! ```

pub mod catalog;
pub mod filter;

pub use catalog::{CatalogError, CatalogStore};
pub use filter::{make_filter, CardFilter, FilterError, FilterResult};
