//! Card output formatting.

use cardquery_model::Card;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::helpers::{format_colors, format_cost, format_price, paint_by_identity, truncate_str};

/// JSON output structure for the search command.
#[derive(Serialize)]
pub struct SearchOutput<'a> {
    pub query: &'a str,
    pub fields_used: Vec<&'static str>,
    pub total: usize,
    pub shown: usize,
    pub cards: Vec<CardOutput<'a>>,
}

/// JSON output structure for a single card.
#[derive(Serialize)]
pub struct CardOutput<'a> {
    pub card_id: &'a str,
    pub name: &'a str,
    pub mana_cost: String,
    pub cmc: f64,
    pub type_line: &'a str,
    pub color_identity: &'a [String],
    pub rarity: &'a str,
    pub set: &'a str,
    pub status: &'a str,
    pub finish: &'a str,
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "is_empty")]
    pub tags: &'a [String],
}

fn is_empty(values: &&[String]) -> bool {
    values.is_empty()
}

impl<'a> From<&'a Card> for CardOutput<'a> {
    fn from(card: &'a Card) -> Self {
        Self {
            card_id: card.card_id(),
            name: card.name(),
            mana_cost: format_cost(card.cost()),
            cmc: card.cmc(),
            type_line: card.type_line(),
            color_identity: card.color_identity(),
            rarity: card.rarity(),
            set: card.set_code(),
            status: card.status(),
            finish: card.finish(),
            price: card.price(),
            tags: card.tags(),
        }
    }
}

/// The page of search results being printed.
pub struct SearchPage<'a> {
    /// The query as typed; empty for an unfiltered listing.
    pub query: &'a str,
    /// Fields the query referenced.
    pub fields_used: Vec<&'static str>,
    /// Number of cards that matched before the limit.
    pub total: usize,
    /// The cards to print.
    pub cards: &'a [&'a Card],
}

/// Formats a page of search results as JSON.
pub fn format_cards_json(page: &SearchPage<'_>) -> Result<String, serde_json::Error> {
    let output = SearchOutput {
        query: page.query,
        fields_used: page.fields_used.clone(),
        total: page.total,
        shown: page.cards.len(),
        cards: page.cards.iter().map(|card| CardOutput::from(*card)).collect(),
    };

    serde_json::to_string_pretty(&output)
}

/// Formats a page of search results as a table.
pub fn format_cards_table(page: &SearchPage<'_>, use_colors: bool) -> String {
    if page.cards.is_empty() {
        return "No cards found.\n".to_string();
    }

    let mut output = String::new();

    let header = format!(
        "{:<30} {:<14} {:<5} {:<28} {:<8} {:<5} {}",
        "Name", "Cost", "Id", "Type", "Rarity", "Set", "Price"
    );
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for card in page.cards {
        let name = paint_by_identity(card.name(), 30, card.color_identity(), use_colors);
        let cost = truncate_str(&format_cost(card.cost()), 14);
        let identity = format_colors(card.color_identity());
        let type_line = truncate_str(card.type_line(), 28);
        let set = card.set_code().to_uppercase();

        let line = format!(
            "{} {:<14} {:<5} {:<28} {:<8} {:<5} {}",
            name,
            cost,
            identity,
            type_line,
            card.rarity(),
            set,
            format_price(card.price())
        );
        output.push_str(line.trim_end());
        output.push('\n');
    }

    if page.total > page.cards.len() {
        let more = format!(
            "... {} more (use --limit or --all to show them)",
            page.total - page.cards.len()
        );
        if use_colors {
            output.push_str(&format!("{}\n", more.dimmed()));
        } else {
            output.push_str(&more);
            output.push('\n');
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardquery_model::CardDetails;

    fn bolt() -> Card {
        let mut details = CardDetails::named("Lightning Bolt");
        details.scryfall_id = "bolt".to_string();
        details.type_line = "Instant".to_string();
        details.rarity = "common".to_string();
        details.set = "lea".to_string();
        details.cmc = 1.0;
        details.parsed_cost = vec!["r".to_string()];
        details.color_identity = vec!["R".to_string()];
        Card::from_details(details)
    }

    #[test]
    fn test_cards_table_empty() {
        let page = SearchPage {
            query: "t:dragon",
            fields_used: vec!["type"],
            total: 0,
            cards: &[],
        };
        assert_eq!(format_cards_table(&page, false), "No cards found.\n");
    }

    #[test]
    fn test_cards_table_row() {
        let card = bolt();
        let cards = [&card];
        let page = SearchPage {
            query: "c:r",
            fields_used: vec!["color"],
            total: 1,
            cards: &cards,
        };
        let table = format_cards_table(&page, false);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Name"));
        assert!(lines[1].starts_with("Lightning Bolt"));
        assert!(lines[1].contains("{R}"));
        assert!(lines[1].contains("Instant"));
        assert!(lines[1].contains("LEA"));
    }

    #[test]
    fn test_cards_table_mentions_hidden_rows() {
        let card = bolt();
        let cards = [&card];
        let page = SearchPage {
            query: "",
            fields_used: vec![],
            total: 3,
            cards: &cards,
        };
        let table = format_cards_table(&page, false);
        assert!(table.contains("2 more"));
    }

    #[test]
    fn test_cards_json() {
        let card = bolt();
        let cards = [&card];
        let page = SearchPage {
            query: "c:r",
            fields_used: vec!["color"],
            total: 1,
            cards: &cards,
        };
        let json: serde_json::Value =
            serde_json::from_str(&format_cards_json(&page).unwrap()).unwrap();
        assert_eq!(json["query"], "c:r");
        assert_eq!(json["fields_used"][0], "color");
        assert_eq!(json["total"], 1);
        assert_eq!(json["shown"], 1);
        assert_eq!(json["cards"][0]["name"], "Lightning Bolt");
        assert_eq!(json["cards"][0]["mana_cost"], "{R}");
        assert_eq!(json["cards"][0]["set"], "lea");
        assert!(json["cards"][0].get("tags").is_none());
    }
}
