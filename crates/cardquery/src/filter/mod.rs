//! Filter query parser, compiler and evaluator for card searches.
//!
//! A query is a sequence of `field<op>value` conditions and bare words,
//! combined with juxtaposition, `and`, `or`, `-` and parentheses. The query
//! compiles once into a [`CardFilter`], which is then applied to any number
//! of cards.
//!
//! # Supported Syntax
//!
//! ## Conditions
//! - `t:creature` - Field, operator and value, without spaces
//! - `o:"draw a card"` - Quoted values may contain spaces
//! - `elves` - A bare word searches card names
//!
//! ## Operators
//! - `:` - The field's default match (contains, includes, at least)
//! - `=` - Exact match
//! - `!=`, `<>` - Not equal
//! - `<`, `<=`, `>`, `>=` - Orderings, for numeric and ordered fields
//!
//! ## Fields (selection)
//! - `n`, `o`, `t`, `a` - Name, oracle text, type line, artist
//! - `cmc`, `pow`, `tou`, `loy` - Numbers; the value may name another
//!   numeric field (`pow>tou`)
//! - `c`, `ci` - Color identity as a set (`c:wu`, `c=azorius`, `c>=2`)
//! - `m`, `cw` - Mana cost and castability (`m:{2}{w}`, `cw:2ww`)
//! - `r` - Rarity, ordered common < uncommon < rare < mythic < special
//! - `is` - Categories such as `is:gold` or `is:dfc`
//!
//! ## Boolean Operators
//! - juxtaposition or `and` - AND
//! - `or` - OR
//! - `-` - NOT
//! - `()` - Grouping
//!
//! # Example
//!
//! ```
//! use cardquery::filter::{make_filter, FilterEvaluator};
//! use cardquery_model::{Card, CardDetails};
//!
//! let filter = make_filter("t:creature cmc<=2").unwrap();
//!
//! let mut bear = CardDetails::named("Grizzly Bears");
//! bear.type_line = "Creature - Bear".to_string();
//! bear.cmc = 2.0;
//! let cards = vec![Card::from_details(bear)];
//!
//! let evaluator = FilterEvaluator::new(filter.as_ref());
//! assert_eq!(evaluator.count_matches(&cards), 1);
//! ```

mod ast;
mod categories;
mod compiler;
mod error;
mod evaluator;
mod fields;
mod lexer;
mod mana;
mod operations;
mod parser;
mod query;
mod values;

pub use ast::{Condition, Connective, Group, Node, Operator, Value};
pub use categories::Category;
pub use compiler::{compile, CardPredicate};
pub use error::{FilterError, FilterResult};
pub use evaluator::{count_matches, filter_cards, filter_cards_details, FilterEvaluator};
pub use fields::{FieldId, ValueKind};
pub use lexer::{Lexer, PositionedToken, QueryToken};
pub use mana::{can_cast_with, can_cast_with_infinite, parse_cost, parse_pool};
pub use parser::FilterParser;
pub use query::{make_filter, make_filter_with, CardFilter, DefaultGrammar, QueryGrammar};
pub use values::{FINISHES, STATUSES};


#[cfg(test)]
mod evaluator_tests;
