//! Card data types.
//!
//! [`Card`] is a card as it sits in a cube or deck list: a handful of
//! per-copy overrides (status, finish, tags, color override) wrapped around the
//! shared, hydrated [`CardDetails`] printing record.

mod card;
mod common;

pub use card::*;
pub use common::*;
