//! Filter evaluation over card lists.
//!
//! # Example
//!
//! ```
//! use cardquery::filter::{make_filter, FilterEvaluator};
//! use cardquery_model::{Card, CardDetails};
//!
//! let mut elves = CardDetails::named("Llanowar Elves");
//! elves.cmc = 1.0;
//! let mut wrath = CardDetails::named("Wrath of God");
//! wrath.cmc = 4.0;
//! let cards = vec![Card::from_details(elves), Card::from_details(wrath)];
//!
//! let filter = make_filter("cmc<3").unwrap();
//! let evaluator = FilterEvaluator::new(filter.as_ref());
//! let matches = evaluator.filter_cards(&cards);
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].name(), "Llanowar Elves");
//! ```

use cardquery_model::Card;
use tracing::trace;

use super::query::CardFilter;

/// Evaluates a compiled filter, or the empty filter, against cards.
#[derive(Debug, Clone, Copy)]
pub struct FilterEvaluator<'a> {
    filter: Option<&'a CardFilter>,
}

impl<'a> FilterEvaluator<'a> {
    /// Creates a new evaluator. `None` is the empty filter.
    pub fn new(filter: Option<&'a CardFilter>) -> Self {
        Self { filter }
    }

    /// Returns true if the card matches. Every card matches the empty filter.
    pub fn matches(&self, card: &Card) -> bool {
        self.filter.map_or(true, |filter| filter.matches(card))
    }

    /// Returns the matching cards in input order.
    pub fn filter_cards<'c>(&self, cards: &'c [Card]) -> Vec<&'c Card> {
        filter_cards(cards, self.filter)
    }

    /// Counts the matching cards.
    pub fn count_matches(&self, cards: &[Card]) -> usize {
        count_matches(cards, self.filter)
    }
}

/// Returns the cards matching the filter, preserving order and duplicates.
///
/// With no filter every card is returned.
pub fn filter_cards<'c>(cards: &'c [Card], filter: Option<&CardFilter>) -> Vec<&'c Card> {
    let Some(filter) = filter else {
        return cards.iter().collect();
    };

    let matched: Vec<&Card> = cards.iter().filter(|card| filter.matches(card)).collect();
    trace!(
        query = filter.stringify(),
        candidates = cards.len(),
        matched = matched.len(),
        "Evaluated filter"
    );
    matched
}

/// Alias of [`filter_cards`] for callers that work on hydrated details.
pub fn filter_cards_details<'c>(cards: &'c [Card], filter: Option<&CardFilter>) -> Vec<&'c Card> {
    filter_cards(cards, filter)
}

/// Counts the cards matching the filter without collecting them.
pub fn count_matches(cards: &[Card], filter: Option<&CardFilter>) -> usize {
    match filter {
        None => cards.len(),
        Some(filter) => cards.iter().filter(|card| filter.matches(card)).count(),
    }
}
