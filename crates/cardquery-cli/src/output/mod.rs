//! Output formatting utilities for the cq CLI.
//!
//! This module provides functions for formatting data as tables or JSON.
//! It is organized into submodules by what is printed:
//!
//! - [`cards`] - Search results
//! - [`explain`] - Parse trees
//! - [`fields`] - The field table
//! - [`helpers`] - Common formatting utilities (truncation, costs, colors)

mod cards;
mod explain;
mod fields;
pub mod helpers;

pub use cards::{format_cards_json, format_cards_table, SearchPage};
pub use explain::{format_explain_json, format_explain_text};
pub use fields::{format_fields_json, format_fields_table};
