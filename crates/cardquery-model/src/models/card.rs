//! Card and printing models.
//!
//! The accessors on [`Card`] resolve per-copy overrides against the shared
//! printing record, so the query engine never needs to know which of the two
//! a value came from.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::{number_or_string, string_or_seq, string_or_seq_required, Prices};

/// Status given to a card that has no explicit ownership status.
pub const DEFAULT_STATUS: &str = "Not Owned";

/// Finish given to a card that has no explicit finish.
pub const DEFAULT_FINISH: &str = "Non-foil";

/// Characters that separate words when counting oracle text words.
const WORD_SEPARATORS: &[char] = &['*', '/', '&', ':', ';', '.', ',', '?', '='];

/// A card entry in a cube, deck or search result.
///
/// Every field other than `details` is an optional per-copy override. Use the
/// accessor methods rather than the raw fields when reading attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// The printing identifier this entry points at.
    #[serde(rename = "cardID", default)]
    pub card_id: String,

    /// Ownership status (`"Owned"`, `"Not Owned"`, `"Proxied"`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Finish of this copy (`"Non-foil"`, `"Foil"`, `"Etched"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish: Option<String>,

    /// Mana value override.
    #[serde(
        default,
        deserialize_with = "number_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub cmc: Option<f64>,

    /// Type line override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_line: Option<String>,

    /// Color identity override (cube owners can recolor a card).
    #[serde(
        default,
        deserialize_with = "string_or_seq",
        skip_serializing_if = "Option::is_none"
    )]
    pub colors: Option<Vec<String>>,

    /// Rarity override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<String>,

    /// User-assigned tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// The hydrated printing record, if the card could be resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<CardDetails>,
}

/// A hydrated printing record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardDetails {
    #[serde(default)]
    pub scryfall_id: String,

    #[serde(default)]
    pub oracle_id: String,

    /// The printed name. Required: this is what distinguishes a printing
    /// record from a card entry when reading mixed catalogs.
    pub name: String,

    #[serde(default)]
    pub set: String,

    #[serde(default)]
    pub set_name: String,

    #[serde(default)]
    pub collector_number: String,

    /// Release date in `YYYY-MM-DD` format.
    #[serde(default)]
    pub released_at: String,

    #[serde(default)]
    pub promo: bool,

    #[serde(default)]
    pub reprint: bool,

    #[serde(default)]
    pub digital: bool,

    #[serde(default)]
    pub full_art: bool,

    #[serde(default, rename = "isToken")]
    pub is_token: bool,

    #[serde(default)]
    pub artist: String,

    #[serde(default)]
    pub rarity: String,

    /// Format name to legality (`"legal"`, `"banned"`, `"restricted"`, `"not_legal"`).
    #[serde(default)]
    pub legalities: BTreeMap<String, String>,

    #[serde(default)]
    pub oracle_text: String,

    #[serde(default)]
    pub cmc: f64,

    #[serde(default, rename = "type")]
    pub type_line: String,

    #[serde(default, deserialize_with = "string_or_seq_required")]
    pub colors: Vec<String>,

    #[serde(default, deserialize_with = "string_or_seq_required")]
    pub color_identity: Vec<String>,

    /// Cost symbols, lowercase, hybrid halves joined with `-`
    /// (`["2", "w-u", "w-p", "x"]`).
    #[serde(default)]
    pub parsed_cost: Vec<String>,

    #[serde(default)]
    pub layout: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toughness: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loyalty: Option<String>,

    #[serde(default)]
    pub prices: Prices,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elo: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,

    #[serde(default, rename = "cubeCount")]
    pub cube_count: u64,

    #[serde(default, rename = "pickCount")]
    pub pick_count: u64,

    #[serde(default)]
    pub finishes: Vec<String>,

    #[serde(default)]
    pub border_color: String,

    #[serde(default)]
    pub language: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_types: Option<Vec<String>>,

    #[serde(default)]
    pub keywords: Vec<String>,
}

impl CardDetails {
    /// Creates an otherwise empty printing record with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Card {
    /// Wraps a printing record in a card entry with default per-copy values.
    pub fn from_details(details: CardDetails) -> Self {
        Self {
            card_id: details.scryfall_id.clone(),
            status: Some(DEFAULT_STATUS.to_string()),
            finish: Some(DEFAULT_FINISH.to_string()),
            details: Some(details),
            ..Self::default()
        }
    }

    /// Returns the printing record, if hydrated.
    pub fn details(&self) -> Option<&CardDetails> {
        self.details.as_ref()
    }

    /// Returns the printing identifier.
    pub fn card_id(&self) -> &str {
        if !self.card_id.is_empty() {
            return &self.card_id;
        }
        self.details().map_or("", |d| d.scryfall_id.as_str())
    }

    pub fn name(&self) -> &str {
        self.details().map_or("", |d| d.name.as_str())
    }

    pub fn oracle_text(&self) -> &str {
        self.details().map_or("", |d| d.oracle_text.as_str())
    }

    pub fn oracle_id(&self) -> &str {
        self.details().map_or("", |d| d.oracle_id.as_str())
    }

    pub fn type_line(&self) -> &str {
        self.type_line
            .as_deref()
            .unwrap_or_else(|| self.details().map_or("", |d| d.type_line.as_str()))
    }

    pub fn rarity(&self) -> &str {
        self.rarity
            .as_deref()
            .unwrap_or_else(|| self.details().map_or("", |d| d.rarity.as_str()))
    }

    /// Returns the mana value, preferring a non-zero override.
    pub fn cmc(&self) -> f64 {
        match self.cmc {
            Some(cmc) if cmc != 0.0 => cmc,
            _ => self.details().map_or(0.0, |d| d.cmc),
        }
    }

    /// Returns the color identity used for cube sorting and `c:` searches:
    /// the per-copy override when set, otherwise the printing's identity.
    pub fn color_identity(&self) -> &[String] {
        if let Some(colors) = &self.colors {
            return colors;
        }
        self.printed_color_identity()
    }

    /// Returns the printing's own color identity, ignoring overrides.
    pub fn printed_color_identity(&self) -> &[String] {
        self.details()
            .map(|d| d.color_identity.as_slice())
            .unwrap_or_default()
    }

    /// Returns the printing's casting colors.
    pub fn colors(&self) -> &[String] {
        self.details()
            .map(|d| d.colors.as_slice())
            .unwrap_or_default()
    }

    /// Returns the parsed cost symbols.
    pub fn cost(&self) -> &[String] {
        self.details()
            .map(|d| d.parsed_cost.as_slice())
            .unwrap_or_default()
    }

    pub fn set_code(&self) -> &str {
        self.details().map_or("", |d| d.set.as_str())
    }

    pub fn artist(&self) -> &str {
        self.details().map_or("", |d| d.artist.as_str())
    }

    pub fn layout(&self) -> &str {
        self.details().map_or("", |d| d.layout.as_str())
    }

    pub fn status(&self) -> &str {
        self.status.as_deref().unwrap_or(DEFAULT_STATUS)
    }

    pub fn finish(&self) -> &str {
        self.finish.as_deref().unwrap_or(DEFAULT_FINISH)
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Parses the release date. Returns `None` when missing or malformed.
    pub fn released(&self) -> Option<NaiveDate> {
        let released = self.details()?.released_at.as_str();
        NaiveDate::parse_from_str(released, "%Y-%m-%d").ok()
    }

    /// Returns power as a number. A missing value counts as zero; a
    /// non-numeric value such as `*` yields `None`.
    pub fn power(&self) -> Option<f64> {
        parse_stat(self.details().and_then(|d| d.power.as_deref()))
    }

    /// See [`Card::power`].
    pub fn toughness(&self) -> Option<f64> {
        parse_stat(self.details().and_then(|d| d.toughness.as_deref()))
    }

    /// See [`Card::power`].
    pub fn loyalty(&self) -> Option<f64> {
        parse_stat(self.details().and_then(|d| d.loyalty.as_deref())).map(f64::trunc)
    }

    /// Returns the price matching this copy's finish, falling back to the
    /// other finishes when it has never been sold in its own.
    pub fn price(&self) -> Option<f64> {
        let prices = &self.details()?.prices;
        let order = match self.finish() {
            "Foil" => [prices.usd_foil, prices.usd, prices.usd_etched],
            "Etched" => [prices.usd_etched, prices.usd_foil, prices.usd],
            _ => [prices.usd, prices.usd_foil, prices.usd_etched],
        };
        order.into_iter().flatten().next()
    }

    pub fn price_foil(&self) -> Option<f64> {
        self.details()?.prices.usd_foil
    }

    pub fn price_eur(&self) -> Option<f64> {
        self.details()?.prices.eur
    }

    pub fn price_tix(&self) -> Option<f64> {
        self.details()?.prices.tix
    }

    pub fn elo(&self) -> Option<f64> {
        self.details()?.elo
    }

    pub fn popularity(&self) -> Option<f64> {
        self.details()?.popularity
    }

    pub fn cube_count(&self) -> u64 {
        self.details().map_or(0, |d| d.cube_count)
    }

    pub fn pick_count(&self) -> u64 {
        self.details().map_or(0, |d| d.pick_count)
    }

    /// Formats in which this printing is legal.
    pub fn legal_in(&self) -> Vec<&str> {
        self.formats_with("legal")
    }

    pub fn banned_in(&self) -> Vec<&str> {
        self.formats_with("banned")
    }

    pub fn restricted_in(&self) -> Vec<&str> {
        self.formats_with("restricted")
    }

    fn formats_with(&self, legality: &str) -> Vec<&str> {
        let Some(details) = self.details() else {
            return vec![];
        };
        details
            .legalities
            .iter()
            .filter(|(_, status)| status.as_str() == legality)
            .map(|(format, _)| format.as_str())
            .collect()
    }

    /// Counts the cost symbols that include the given color letter.
    ///
    /// For adventure cards only the main half counts: symbols up to and
    /// including the `split` marker are skipped.
    pub fn devotion(&self, color: char) -> usize {
        let color = color.to_ascii_lowercase();
        let mut cost = self.cost();
        if self.layout() == "adventure" {
            if let Some(split) = cost.iter().position(|symbol| symbol == "split") {
                cost = &cost[split + 1..];
            }
        }
        cost.iter().filter(|symbol| symbol.contains(color)).count()
    }

    /// Counts the words in the oracle text.
    pub fn word_count(&self) -> usize {
        self.oracle_text()
            .split(|c: char| c.is_whitespace() || WORD_SEPARATORS.contains(&c))
            .filter(|word| !word.is_empty())
            .count()
    }
}

fn parse_stat(value: Option<&str>) -> Option<f64> {
    match value {
        None => Some(0.0),
        Some(text) => text.trim().parse::<f64>().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> CardDetails {
        CardDetails {
            scryfall_id: "abc".to_string(),
            name: "Giant Growth".to_string(),
            type_line: "Instant".to_string(),
            rarity: "common".to_string(),
            cmc: 1.0,
            colors: vec!["G".to_string()],
            color_identity: vec!["G".to_string()],
            parsed_cost: vec!["g".to_string()],
            oracle_text: "Target creature gets +3/+3 until end of turn.".to_string(),
            ..CardDetails::default()
        }
    }

    #[test]
    fn test_from_details_defaults() {
        let card = Card::from_details(details());
        assert_eq!(card.card_id(), "abc");
        assert_eq!(card.status(), DEFAULT_STATUS);
        assert_eq!(card.finish(), DEFAULT_FINISH);
        assert_eq!(card.name(), "Giant Growth");
        assert_eq!(card.cmc(), 1.0);
    }

    #[test]
    fn test_overrides_take_priority() {
        let mut card = Card::from_details(details());
        card.type_line = Some("Tribal Instant".to_string());
        card.colors = Some(vec!["G".to_string(), "U".to_string()]);
        card.cmc = Some(2.0);

        assert_eq!(card.type_line(), "Tribal Instant");
        assert_eq!(card.color_identity(), ["G", "U"]);
        assert_eq!(card.printed_color_identity(), ["G"]);
        assert_eq!(card.cmc(), 2.0);
    }

    #[test]
    fn test_zero_cmc_override_falls_back() {
        let mut card = Card::from_details(details());
        card.cmc = Some(0.0);
        assert_eq!(card.cmc(), 1.0);
    }

    #[test]
    fn test_card_without_details() {
        let card = Card::default();
        assert_eq!(card.name(), "");
        assert_eq!(card.cmc(), 0.0);
        assert!(card.color_identity().is_empty());
        assert_eq!(card.price(), None);
        assert!(card.legal_in().is_empty());
    }

    #[test]
    fn test_power_parsing() {
        let mut d = details();
        d.power = Some("3".to_string());
        d.toughness = Some("*".to_string());
        let card = Card::from_details(d);
        assert_eq!(card.power(), Some(3.0));
        assert_eq!(card.toughness(), None);
        assert_eq!(card.loyalty(), Some(0.0));
    }

    #[test]
    fn test_price_follows_finish() {
        let mut d = details();
        d.prices = Prices {
            usd: Some(1.0),
            usd_foil: Some(5.0),
            ..Prices::default()
        };
        let mut card = Card::from_details(d);
        assert_eq!(card.price(), Some(1.0));

        card.finish = Some("Foil".to_string());
        assert_eq!(card.price(), Some(5.0));

        card.finish = Some("Etched".to_string());
        assert_eq!(card.price(), Some(5.0));
    }

    #[test]
    fn test_legalities() {
        let mut d = details();
        d.legalities.insert("Modern".to_string(), "legal".to_string());
        d.legalities.insert("Vintage".to_string(), "restricted".to_string());
        d.legalities.insert("Legacy".to_string(), "banned".to_string());
        let card = Card::from_details(d);
        assert_eq!(card.legal_in(), vec!["Modern"]);
        assert_eq!(card.restricted_in(), vec!["Vintage"]);
        assert_eq!(card.banned_in(), vec!["Legacy"]);
    }

    #[test]
    fn test_devotion_counts_hybrid_symbols() {
        let mut d = details();
        d.parsed_cost = vec!["g".into(), "g-w".into(), "2".into(), "w".into()];
        let card = Card::from_details(d);
        assert_eq!(card.devotion('g'), 2);
        assert_eq!(card.devotion('W'), 2);
        assert_eq!(card.devotion('u'), 0);
    }

    #[test]
    fn test_devotion_adventure_skips_adventure_half() {
        let mut d = details();
        d.layout = "adventure".to_string();
        d.parsed_cost = vec!["g".into(), "split".into(), "1".into(), "g".into(), "g".into()];
        let card = Card::from_details(d);
        assert_eq!(card.devotion('g'), 2);
    }

    #[test]
    fn test_word_count() {
        let card = Card::from_details(details());
        // "+3/+3" counts as two words
        assert_eq!(card.word_count(), 9);
    }

    #[test]
    fn test_released_date() {
        let mut d = details();
        d.released_at = "2019-10-04".to_string();
        let card = Card::from_details(d);
        assert_eq!(card.released(), NaiveDate::from_ymd_opt(2019, 10, 4));

        let card = Card::from_details(details());
        assert_eq!(card.released(), None);
    }
}
