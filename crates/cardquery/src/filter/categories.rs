//! Category keywords for `is:` conditions.

use std::fmt;

use cardquery_model::{Card, CardDetails};

/// A card category that can be tested with `is:`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Gold,
    Hybrid,
    Twobrid,
    Phyrexian,
    Promo,
    Reprint,
    FirstPrint,
    Digital,
    Dfc,
    Mdfc,
    Meld,
    Transform,
    Flip,
    Split,
    Leveler,
    Spell,
    Permanent,
    Historic,
    Vanilla,
    Modal,
    CreatureLand,
    Foil,
    NonFoil,
    Etched,
    FullArt,
    Commander,
}

const KEYWORDS: &[(&str, Category)] = &[
    ("gold", Category::Gold),
    ("hybrid", Category::Hybrid),
    ("twobrid", Category::Twobrid),
    ("phyrexian", Category::Phyrexian),
    ("promo", Category::Promo),
    ("reprint", Category::Reprint),
    ("firstprint", Category::FirstPrint),
    ("firstprinting", Category::FirstPrint),
    ("digital", Category::Digital),
    ("dfc", Category::Dfc),
    ("mdfc", Category::Mdfc),
    ("meld", Category::Meld),
    ("transform", Category::Transform),
    ("tdfc", Category::Transform),
    ("flip", Category::Flip),
    ("split", Category::Split),
    ("leveler", Category::Leveler),
    ("spell", Category::Spell),
    ("permanent", Category::Permanent),
    ("historic", Category::Historic),
    ("vanilla", Category::Vanilla),
    ("modal", Category::Modal),
    ("creatureland", Category::CreatureLand),
    ("manland", Category::CreatureLand),
    ("foil", Category::Foil),
    ("nonfoil", Category::NonFoil),
    ("etched", Category::Etched),
    ("fullart", Category::FullArt),
    ("commander", Category::Commander),
];

const DOUBLE_FACED_LAYOUTS: &[&str] = &[
    "transform",
    "modal_dfc",
    "meld",
    "double_faced_token",
    "double_sided",
];

const SPECIAL_ZONE_TYPES: &[&str] = &[
    "plane",
    "phenomenon",
    "vanguard",
    "scheme",
    "conspiracy",
    "contraption",
];

impl Category {
    /// Parses a category keyword, ignoring case.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let lower = keyword.to_ascii_lowercase();
        KEYWORDS
            .iter()
            .find(|(word, _)| *word == lower)
            .map(|(_, category)| *category)
    }

    /// Every accepted keyword, including synonyms.
    pub fn keywords() -> impl Iterator<Item = &'static str> {
        KEYWORDS.iter().map(|(word, _)| *word)
    }

    /// The primary keyword for this category.
    pub fn keyword(self) -> &'static str {
        KEYWORDS
            .iter()
            .find(|(_, category)| *category == self)
            .map_or("", |(word, _)| *word)
    }

    /// Returns true if the card belongs to the category. Cards without a
    /// printing record belong to no category.
    pub fn detect(self, card: &Card) -> bool {
        let Some(details) = card.details() else {
            return false;
        };
        let cost = &details.parsed_cost;
        let type_line = details.type_line.as_str();
        match self {
            Category::Gold => details.colors.len() > 1 && cost.iter().all(|s| !s.contains('-')),
            Category::Hybrid => {
                details.colors.len() > 1
                    && cost.iter().any(|s| s.contains('-') && !s.contains("-p"))
            }
            Category::Twobrid => cost.iter().any(|s| s.contains('-') && s.contains('2')),
            Category::Phyrexian => cost.iter().any(|s| s.contains("-p")),
            Category::Promo => details.promo,
            Category::Reprint => details.reprint,
            Category::FirstPrint => !details.reprint,
            Category::Digital => details.digital,
            Category::Dfc => DOUBLE_FACED_LAYOUTS.contains(&details.layout.as_str()),
            Category::Mdfc => details.layout == "modal_dfc",
            Category::Meld => details.layout == "meld",
            Category::Transform => details.layout == "transform",
            Category::Flip => details.layout == "flip",
            Category::Split => details.layout == "split",
            Category::Leveler => details.layout == "leveler",
            Category::Spell => !type_line.contains("Land") && !is_special_zone(type_line),
            Category::Permanent => {
                !type_line.contains("Instant")
                    && !type_line.contains("Sorcery")
                    && !is_special_zone(type_line)
            }
            Category::Historic => {
                type_line.contains("Legendary")
                    || type_line.contains("Artifact")
                    || type_line.contains("Saga")
            }
            Category::Vanilla => details.oracle_text.is_empty(),
            Category::Modal => details.oracle_text.contains('•'),
            Category::CreatureLand => is_creature_land(details),
            Category::Foil => finish_is(card, details, "Foil", "foil"),
            Category::NonFoil => finish_is(card, details, "Non-foil", "nonfoil"),
            Category::Etched => finish_is(card, details, "Etched", "etched"),
            Category::FullArt => details.full_art,
            Category::Commander => {
                details.legalities.get("Commander").map(String::as_str) == Some("legal")
                    && ((type_line.contains("Legendary") && type_line.contains("Creature"))
                        || details.oracle_text.contains("can be your commander"))
            }
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

fn is_special_zone(type_line: &str) -> bool {
    type_line
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| SPECIAL_ZONE_TYPES.contains(&word.to_lowercase().as_str()))
}

/// A land whose oracle text says it becomes a creature.
fn is_creature_land(details: &CardDetails) -> bool {
    if !details.type_line.contains("Land") {
        return false;
    }
    let text = details.oracle_text.as_str();
    ["becomes a ", "become a "].iter().any(|phrase| {
        text.match_indices(phrase)
            .any(|(at, _)| text[at + phrase.len()..].contains("creature"))
    })
}

/// A per-copy finish wins over the finishes the printing was sold in.
fn finish_is(card: &Card, details: &CardDetails, finish: &str, printed: &str) -> bool {
    match &card.finish {
        Some(own) => own == finish,
        None => details.finishes.iter().any(|f| f == printed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(f: impl FnOnce(&mut CardDetails)) -> Card {
        let mut details = CardDetails::named("Test Card");
        f(&mut details);
        Card::from_details(details)
    }

    #[test]
    fn test_keywords_and_synonyms() {
        assert_eq!(Category::from_keyword("GOLD"), Some(Category::Gold));
        assert_eq!(Category::from_keyword("manland"), Some(Category::CreatureLand));
        assert_eq!(Category::from_keyword("tdfc"), Some(Category::Transform));
        assert_eq!(Category::from_keyword("shiny"), None);
        assert_eq!(Category::Transform.keyword(), "transform");
    }

    #[test]
    fn test_gold_and_hybrid() {
        let gold = card(|d| {
            d.colors = vec!["W".into(), "U".into()];
            d.parsed_cost = vec!["w".into(), "u".into()];
        });
        let hybrid = card(|d| {
            d.colors = vec!["W".into(), "U".into()];
            d.parsed_cost = vec!["w-u".into()];
        });
        assert!(Category::Gold.detect(&gold));
        assert!(!Category::Hybrid.detect(&gold));
        assert!(Category::Hybrid.detect(&hybrid));
        assert!(!Category::Gold.detect(&hybrid));
    }

    #[test]
    fn test_phyrexian_is_not_hybrid() {
        let c = card(|d| {
            d.colors = vec!["B".into(), "G".into()];
            d.parsed_cost = vec!["b-p".into(), "g".into()];
        });
        assert!(Category::Phyrexian.detect(&c));
        assert!(!Category::Hybrid.detect(&c));
    }

    #[test]
    fn test_spell_and_permanent() {
        let bolt = card(|d| d.type_line = "Instant".into());
        let forest = card(|d| d.type_line = "Basic Land — Forest".into());
        let plane = card(|d| d.type_line = "Plane — Dominaria".into());
        assert!(Category::Spell.detect(&bolt));
        assert!(!Category::Permanent.detect(&bolt));
        assert!(!Category::Spell.detect(&forest));
        assert!(Category::Permanent.detect(&forest));
        assert!(!Category::Spell.detect(&plane));
    }

    #[test]
    fn test_creature_land() {
        let land = card(|d| {
            d.type_line = "Land".into();
            d.oracle_text = "{1}{G}: This land becomes a 3/3 Elemental creature.".into();
        });
        assert!(Category::CreatureLand.detect(&land));
    }

    #[test]
    fn test_finish_prefers_copy() {
        let mut c = card(|d| d.finishes = vec!["nonfoil".into()]);
        assert!(Category::NonFoil.detect(&c));
        c.finish = Some("Foil".into());
        assert!(Category::Foil.detect(&c));
        assert!(!Category::NonFoil.detect(&c));
        c.finish = None;
        assert!(!Category::Foil.detect(&c));
    }

    #[test]
    fn test_card_without_details_has_no_category() {
        assert!(!Category::FirstPrint.detect(&Card::default()));
    }
}
