//! The filter facade: query text in, compiled [`CardFilter`] out.

use std::fmt;
use std::sync::Arc;

use cardquery_model::Card;
use tracing::debug;

use super::ast::Node;
use super::compiler::{compile, CardPredicate};
use super::error::{FilterError, FilterResult};
use super::fields::FieldId;
use super::parser::FilterParser;

/// A grammar that turns query text into parse trees.
///
/// A grammar may find zero, one or several readings of the text. The facade
/// accepts only exactly one.
pub trait QueryGrammar {
    /// Returns every reading of the text, or the parse error.
    fn parse_all(&self, text: &str) -> FilterResult<Vec<Node>>;
}

/// The built-in grammar, backed by [`FilterParser`]. It never returns more
/// than one reading.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultGrammar;

impl QueryGrammar for DefaultGrammar {
    fn parse_all(&self, text: &str) -> FilterResult<Vec<Node>> {
        FilterParser::parse(text).map(|node| vec![node])
    }
}

/// A compiled card filter.
///
/// Holds the predicate together with the fields the query referenced and the
/// exact query text. Cloning is cheap and a filter can be shared across
/// threads.
#[derive(Clone)]
pub struct CardFilter {
    predicate: CardPredicate,
    fields_used: Vec<FieldId>,
    text: String,
    query: Node,
}

impl CardFilter {
    /// Returns true if the card matches.
    pub fn matches(&self, card: &Card) -> bool {
        (self.predicate)(card)
    }

    /// Every field referenced anywhere in the query, without duplicates.
    pub fn fields_used(&self) -> &[FieldId] {
        &self.fields_used
    }

    /// The query text exactly as given.
    pub fn stringify(&self) -> &str {
        &self.text
    }

    /// The parse tree the filter was compiled from.
    pub fn query(&self) -> &Node {
        &self.query
    }

    /// Returns an owned predicate closure for APIs that want one.
    pub fn predicate(&self) -> impl Fn(&Card) -> bool + Send + Sync + 'static {
        let predicate = Arc::clone(&self.predicate);
        move |card: &Card| predicate(card)
    }
}

impl fmt::Debug for CardFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardFilter")
            .field("text", &self.text)
            .field("fields_used", &self.fields_used)
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for CardFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Compiles query text with the built-in grammar.
///
/// Blank text yields `Ok(None)`, the empty filter: callers treat it as
/// matching every card.
///
/// # Example
///
/// ```
/// use cardquery::filter::make_filter;
///
/// let filter = make_filter("cmc<3 t:creature").unwrap().unwrap();
/// assert_eq!(filter.stringify(), "cmc<3 t:creature");
/// assert!(make_filter("   ").unwrap().is_none());
/// ```
///
/// # Errors
///
/// Returns the parse error for malformed text, and a configuration error if
/// a condition reaches an operator family that cannot compile it.
pub fn make_filter(text: &str) -> FilterResult<Option<CardFilter>> {
    make_filter_with(&DefaultGrammar, text)
}

/// Compiles query text with the given grammar.
///
/// # Errors
///
/// Returns `FilterError::NoParse` when the grammar finds no reading and
/// `FilterError::AmbiguousParse` when it finds several.
pub fn make_filter_with<G>(grammar: &G, text: &str) -> FilterResult<Option<CardFilter>>
where
    G: QueryGrammar + ?Sized,
{
    if text.trim().is_empty() {
        return Ok(None);
    }

    let mut readings = grammar.parse_all(text).inspect_err(|err| {
        debug!(query = text, error = %err, "Failed to parse filter");
    })?;

    let query = match readings.len() {
        0 => return Err(FilterError::NoParse),
        1 => readings.remove(0),
        count => {
            debug!(query = text, count, "Filter is ambiguous");
            return Err(FilterError::AmbiguousParse { count });
        }
    };

    let predicate = compile(&query)?;
    let fields_used = query.fields_used();
    debug!(
        query = text,
        fields = ?fields_used.iter().map(|f| f.name()).collect::<Vec<_>>(),
        "Compiled filter"
    );

    Ok(Some(CardFilter {
        predicate,
        fields_used,
        text: text.to_string(),
        query,
    }))
}
