//! Tests for filter compilation and evaluation against cards.

use std::collections::BTreeMap;

use cardquery_model::{Card, CardDetails, Prices};

use super::*;

// ==================== Test Helpers ====================

fn make_details(name: &str) -> CardDetails {
    CardDetails {
        scryfall_id: format!("{}-id", name.to_lowercase().replace(' ', "-")),
        oracle_id: format!("{}-oracle", name.to_lowercase().replace(' ', "-")),
        name: name.to_string(),
        set: "dom".to_string(),
        rarity: "common".to_string(),
        layout: "normal".to_string(),
        released_at: "2018-04-27".to_string(),
        ..CardDetails::default()
    }
}

fn make_card(name: &str, f: impl FnOnce(&mut CardDetails)) -> Card {
    let mut details = make_details(name);
    f(&mut details);
    Card::from_details(details)
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn filter(query: &str) -> CardFilter {
    make_filter(query)
        .unwrap_or_else(|err| panic!("failed to compile {query:?}: {err}"))
        .unwrap_or_else(|| panic!("{query:?} compiled to the empty filter"))
}

fn names<'a>(cards: &[&'a Card]) -> Vec<&'a str> {
    cards.iter().map(|card| card.name()).collect()
}

fn matching<'a>(query: &str, cards: &'a [Card]) -> Vec<&'a str> {
    let compiled = filter(query);
    names(&filter_cards(cards, Some(&compiled)))
}

fn sample_cards() -> Vec<Card> {
    vec![
        make_card("Llanowar Elves", |d| {
            d.cmc = 1.0;
            d.type_line = "Creature - Elf Druid".to_string();
            d.oracle_text = "{T}: Add {G}.".to_string();
            d.colors = strings(&["G"]);
            d.color_identity = strings(&["G"]);
            d.parsed_cost = strings(&["g"]);
            d.power = Some("1".to_string());
            d.toughness = Some("1".to_string());
        }),
        make_card("Wrath of God", |d| {
            d.cmc = 4.0;
            d.type_line = "Sorcery".to_string();
            d.rarity = "rare".to_string();
            d.oracle_text = "Destroy all creatures. They can't be regenerated.".to_string();
            d.colors = strings(&["W"]);
            d.color_identity = strings(&["W"]);
            d.parsed_cost = strings(&["2", "w", "w"]);
        }),
        make_card("Plains", |d| {
            d.type_line = "Basic Land - Plains".to_string();
            d.color_identity = strings(&["W"]);
        }),
        make_card("Sphinx of the Steel Wind", |d| {
            d.cmc = 8.0;
            d.type_line = "Artifact Creature - Sphinx".to_string();
            d.rarity = "mythic".to_string();
            d.colors = strings(&["W", "U", "B"]);
            d.color_identity = strings(&["W", "U", "B"]);
            d.parsed_cost = strings(&["5", "w", "u", "b"]);
            d.power = Some("6".to_string());
            d.toughness = Some("6".to_string());
        }),
        make_card("Counterspell", |d| {
            d.cmc = 2.0;
            d.type_line = "Instant".to_string();
            d.rarity = "uncommon".to_string();
            d.oracle_text = "Counter target spell.".to_string();
            d.colors = strings(&["U"]);
            d.color_identity = strings(&["U"]);
            d.parsed_cost = strings(&["u", "u"]);
        }),
    ]
}

// ==================== Facade Tests ====================

#[test]
fn test_blank_query_is_empty_filter() {
    assert!(make_filter("").unwrap().is_none());
    assert!(make_filter(" \t ").unwrap().is_none());
}

#[test]
fn test_empty_filter_matches_everything() {
    let cards = sample_cards();
    let result = filter_cards_details(&cards, None);
    assert_eq!(result.len(), cards.len());
    for (kept, original) in result.iter().zip(&cards) {
        assert_eq!(*kept, original);
    }
    assert_eq!(count_matches(&cards, None), cards.len());
}

#[test]
fn test_stringify_returns_exact_text() {
    for query in ["cmc<3", "  t:elf   OR t:goblin ", "-(c:wu r>=rare)"] {
        assert_eq!(filter(query).stringify(), query);
        assert_eq!(filter(query).to_string(), query);
    }
}

#[test]
fn test_parse_error_is_returned() {
    assert!(matches!(
        make_filter("tpye:elf"),
        Err(FilterError::UnknownField { .. })
    ));
    assert!(matches!(
        make_filter("(t:elf"),
        Err(FilterError::UnclosedParenthesis)
    ));
}

#[test]
fn test_fields_used_is_union_without_duplicates() {
    let compiled = filter("t:elf cmc<3 (t:warrior or c:g) pow>tou");
    assert_eq!(
        compiled.fields_used(),
        &[
            FieldId::Type,
            FieldId::Cmc,
            FieldId::Color,
            FieldId::Power,
            FieldId::Toughness
        ]
    );
    assert_eq!(filter("elves").fields_used(), &[FieldId::Name]);
}

#[test]
fn test_compiled_filter_is_shareable() {
    fn assert_send_sync<T: Send + Sync + Clone>(_: &T) {}
    let compiled = filter("cmc<3");
    assert_send_sync(&compiled);

    let cards = sample_cards();
    let predicate = compiled.predicate();
    let handle = std::thread::spawn(move || {
        let card = make_card("Ornithopter", |d| d.cmc = 0.0);
        predicate(&card)
    });
    assert!(handle.join().unwrap());
    assert_eq!(compiled.clone().matches(&cards[0]), compiled.matches(&cards[0]));
}

struct FixedGrammar(usize);

impl QueryGrammar for FixedGrammar {
    fn parse_all(&self, text: &str) -> FilterResult<Vec<Node>> {
        let node = FilterParser::parse(text)?;
        Ok(vec![node; self.0])
    }
}

#[test]
fn test_grammar_with_no_reading() {
    assert_eq!(
        make_filter_with(&FixedGrammar(0), "t:elf").unwrap_err(),
        FilterError::NoParse
    );
}

#[test]
fn test_grammar_with_several_readings() {
    assert_eq!(
        make_filter_with(&FixedGrammar(3), "t:elf").unwrap_err(),
        FilterError::AmbiguousParse { count: 3 }
    );
}

#[test]
fn test_grammar_with_one_reading() {
    let compiled = make_filter_with(&FixedGrammar(1), "t:elf").unwrap().unwrap();
    assert_eq!(compiled.stringify(), "t:elf");
}

// ==================== Scenario Tests ====================

#[test]
fn test_cmc_less_than() {
    let cards = sample_cards();
    assert_eq!(
        matching("cmc<3", &cards),
        vec!["Llanowar Elves", "Plains", "Counterspell"]
    );
}

#[test]
fn test_color_superset() {
    let cards = sample_cards();
    assert_eq!(matching("c:wu", &cards), vec!["Sphinx of the Steel Wind"]);
}

#[test]
fn test_color_exact_and_subset() {
    let cards = sample_cards();
    assert_eq!(matching("c=w", &cards), vec!["Wrath of God", "Plains"]);
    assert_eq!(
        matching("c<=esper", &cards),
        vec!["Wrath of God", "Plains", "Sphinx of the Steel Wind", "Counterspell"]
    );
    assert_eq!(
        matching("c<esper", &cards),
        vec!["Wrath of God", "Plains", "Counterspell"]
    );
}

#[test]
fn test_colorless_matches_only_colorless() {
    let cards = vec![
        make_card("Ornithopter", |_| {}),
        make_card("Memnite", |d| d.color_identity = strings(&["W"])),
    ];
    assert_eq!(matching("c:c", &cards), vec!["Ornithopter"]);
}

#[test]
fn test_color_count() {
    let cards = sample_cards();
    assert_eq!(matching("c>=2", &cards), vec!["Sphinx of the Steel Wind"]);
    assert_eq!(matching("c=1", &cards).len(), 4);
}

#[test]
fn test_color_override_and_printed_identity() {
    let mut recolored = make_card("Birds of Paradise", |d| d.color_identity = strings(&["G"]));
    recolored.colors = Some(strings(&["W"]));
    let cards = vec![recolored];
    assert_eq!(matching("c:w", &cards), vec!["Birds of Paradise"]);
    assert!(matching("ci:w", &cards).is_empty());
    assert_eq!(matching("ci:g", &cards), vec!["Birds of Paradise"]);
}

#[test]
fn test_negated_type() {
    let cards = sample_cards();
    let result = matching("-t:land", &cards);
    assert_eq!(result.len(), 4);
    assert!(!result.contains(&"Plains"));
    assert_eq!(matching("-t:LAND", &cards), result);
}

#[test]
fn test_rarity_exact_and_ordering() {
    let cards = sample_cards();
    assert_eq!(matching("r:mythic", &cards), vec!["Sphinx of the Steel Wind"]);
    assert_eq!(matching("r=m", &cards), vec!["Sphinx of the Steel Wind"]);
    assert_eq!(
        matching("r>=rare", &cards),
        vec!["Wrath of God", "Sphinx of the Steel Wind"]
    );
    assert_eq!(matching("r>u", &cards), matching("r>=rare", &cards));
    assert_eq!(
        matching("r<uncommon", &cards),
        vec!["Llanowar Elves", "Plains"]
    );
}

#[test]
fn test_name_search() {
    let cards = sample_cards();
    assert_eq!(matching("elves", &cards), vec!["Llanowar Elves"]);
    assert_eq!(matching("\"OF GOD\"", &cards), vec!["Wrath of God"]);
    assert_eq!(matching("n!=plains", &cards).len(), 4);
}

#[test]
fn test_oracle_search_and_exclude() {
    let cards = sample_cards();
    assert_eq!(matching("o:creatures", &cards), vec!["Wrath of God"]);
    assert_eq!(matching("o!=counter", &cards).len(), 4);
    assert_eq!(
        matching("o<>\"counter target spell.\"", &cards).len(),
        4
    );
}

#[test]
fn test_oracle_self_reference() {
    let cards = vec![
        make_card("Serra Angel", |d| {
            d.oracle_text = "Flying, vigilance".to_string();
        }),
        make_card("Sengir Vampire", |d| {
            d.oracle_text = "Whenever a creature dealt damage by Sengir Vampire this turn dies, put a +1/+1 counter on Sengir Vampire.".to_string();
        }),
        make_card("Isamaru, Hound of Konda", |d| {
            d.type_line = "Legendary Creature - Dog".to_string();
            d.oracle_text = "Whenever Isamaru attacks, it gets +1/+0.".to_string();
        }),
        make_card("Force of Will", |d| {
            d.oracle_text = "You may pay 1 life and exile a blue card rather than pay this spell's mana cost.".to_string();
        }),
    ];
    assert_eq!(
        matching("o:~", &cards),
        vec!["Sengir Vampire", "Isamaru, Hound of Konda", "Force of Will"]
    );
    assert_eq!(matching("o!=~", &cards), vec!["Serra Angel"]);
}

#[test]
fn test_power_versus_toughness() {
    let cards = vec![
        make_card("Goblin Piker", |d| {
            d.power = Some("2".to_string());
            d.toughness = Some("1".to_string());
        }),
        make_card("Wall of Stone", |d| {
            d.power = Some("0".to_string());
            d.toughness = Some("8".to_string());
        }),
        make_card("Tarmogoyf", |d| {
            d.power = Some("*".to_string());
            d.toughness = Some("1+*".to_string());
        }),
    ];
    assert_eq!(matching("pow>tou", &cards), vec!["Goblin Piker"]);
    assert_eq!(matching("pow<tou", &cards), vec!["Wall of Stone"]);
    assert_eq!(
        matching("pow!=tou", &cards),
        vec!["Goblin Piker", "Wall of Stone", "Tarmogoyf"]
    );
}

#[test]
fn test_half_integer_stats() {
    let cards = vec![make_card("Little Girl", |d| {
        d.power = Some("0.5".to_string());
        d.toughness = Some("0.5".to_string());
        d.cmc = 0.5;
    })];
    assert_eq!(matching("pow=0.5", &cards), vec!["Little Girl"]);
    assert_eq!(matching("cmc<1", &cards), vec!["Little Girl"]);
}

#[test]
fn test_missing_price_matches_only_inequality() {
    let cards = vec![
        make_card("Cheap", |d| {
            d.prices = Prices {
                usd: Some(0.25),
                ..Prices::default()
            };
        }),
        make_card("Unpriced", |_| {}),
    ];
    assert_eq!(matching("p<1", &cards), vec!["Cheap"]);
    assert!(matching("p>1", &cards).is_empty());
    assert_eq!(matching("p!=1", &cards), vec!["Cheap", "Unpriced"]);
    assert_eq!(matching("usd=$0.25", &cards), vec!["Cheap"]);
}

#[test]
fn test_foil_price_follows_finish() {
    let mut card = make_card("Shiny", |d| {
        d.prices = Prices {
            usd: Some(1.0),
            usd_foil: Some(10.0),
            ..Prices::default()
        };
    });
    card.finish = Some("Foil".to_string());
    let cards = vec![card];
    assert_eq!(matching("p>=10", &cards), vec!["Shiny"]);
    assert_eq!(matching("pf=10", &cards), vec!["Shiny"]);
}

#[test]
fn test_legality_and_vintage_restricted() {
    let mut legalities = BTreeMap::new();
    legalities.insert("vintage".to_string(), "restricted".to_string());
    legalities.insert("legacy".to_string(), "banned".to_string());
    let lotus = make_card("Black Lotus", |d| d.legalities = legalities.clone());

    let mut legalities = BTreeMap::new();
    legalities.insert("vintage".to_string(), "legal".to_string());
    legalities.insert("legacy".to_string(), "legal".to_string());
    let bolt = make_card("Lightning Bolt", |d| d.legalities = legalities);

    let cards = vec![lotus, bolt];
    assert_eq!(
        matching("legal:vintage", &cards),
        vec!["Black Lotus", "Lightning Bolt"]
    );
    assert_eq!(matching("legal:Legacy", &cards), vec!["Lightning Bolt"]);
    assert_eq!(matching("banned:legacy", &cards), vec!["Black Lotus"]);
    assert_eq!(matching("restricted:vintage", &cards), vec!["Black Lotus"]);
    assert_eq!(matching("leg!=legacy", &cards), vec!["Black Lotus"]);
}

#[test]
fn test_tags_are_case_insensitive() {
    let mut tagged = make_card("Ramp Spell", |_| {});
    tagged.tags = strings(&["Ramp", "Green"]);
    let cards = vec![tagged, make_card("Nothing", |_| {})];
    assert_eq!(matching("tag:ramp", &cards), vec!["Ramp Spell"]);
    assert_eq!(matching("tag!=ramp", &cards), vec!["Nothing"]);
}

#[test]
fn test_set_status_and_finish() {
    let mut owned = make_card("Owned Card", |d| d.set = "M21".to_string());
    owned.status = Some("Owned".to_string());
    owned.finish = Some("Foil".to_string());
    let cards = vec![owned, make_card("Other Card", |_| {})];
    assert_eq!(matching("s:m21", &cards), vec!["Owned Card"]);
    assert_eq!(matching("set!=m21", &cards), vec!["Other Card"]);
    assert_eq!(matching("status:owned", &cards), vec!["Owned Card"]);
    assert_eq!(matching("stat=\"not owned\"", &cards), vec!["Other Card"]);
    assert_eq!(matching("fin:foil", &cards), vec!["Owned Card"]);
    assert_eq!(matching("is:foil", &cards), vec!["Owned Card"]);
}

#[test]
fn test_mana_cost_search() {
    let cards = vec![
        make_card("Wrath of God", |d| d.parsed_cost = strings(&["2", "w", "w"])),
        make_card("Kitchen Finks", |d| {
            d.parsed_cost = strings(&["1", "g-w", "g-w"]);
        }),
        make_card("Counterspell", |d| d.parsed_cost = strings(&["u", "u"])),
    ];
    assert_eq!(matching("m:w", &cards), vec!["Wrath of God"]);
    assert_eq!(matching("m={2}{w}{w}", &cards), vec!["Wrath of God"]);
    assert_eq!(matching("m=2ww", &cards), vec!["Wrath of God"]);
    assert_eq!(matching("m:{w/g}", &cards), vec!["Kitchen Finks"]);
    assert_eq!(
        matching("m!=uu", &cards),
        vec!["Wrath of God", "Kitchen Finks"]
    );
}

#[test]
fn test_castability_exact_and_unlimited() {
    let cards = vec![
        make_card("Wrath of God", |d| d.parsed_cost = strings(&["2", "w", "w"])),
        make_card("Blaze", |d| d.parsed_cost = strings(&["x", "r"])),
    ];
    assert_eq!(matching("cw=2ww", &cards), vec!["Wrath of God"]);
    assert_eq!(matching("cw=1ww", &cards), vec!["Wrath of God"]);
    assert_eq!(matching("cw!=5r", &cards), vec!["Blaze"]);
    assert_eq!(matching("cw:ww", &cards), vec!["Wrath of God"]);
    assert_eq!(matching("cw<=r", &cards), vec!["Blaze"]);
    assert!(matching("cw:u", &cards).is_empty());
    assert_eq!(matching("cw>u", &cards), vec!["Wrath of God", "Blaze"]);
}

#[test]
fn test_devotion_and_words() {
    let cards = sample_cards();
    assert_eq!(matching("dw>=2", &cards), vec!["Wrath of God"]);
    assert_eq!(matching("du=2", &cards), vec!["Counterspell"]);
    assert_eq!(
        matching("words=3", &cards),
        vec!["Llanowar Elves", "Counterspell"]
    );
}

#[test]
fn test_released_date() {
    let cards = vec![
        make_card("Old", |d| d.released_at = "1993-08-05".to_string()),
        make_card("New", |d| d.released_at = "2022-02-18".to_string()),
        make_card("Unknown", |d| d.released_at = String::new()),
    ];
    assert_eq!(matching("date<2000", &cards), vec!["Old"]);
    assert_eq!(matching("released>=2022-01-01", &cards), vec!["New"]);
    assert_eq!(matching("date!=1993-08-05", &cards), vec!["New", "Unknown"]);
}

#[test]
fn test_categories() {
    let cards = vec![
        make_card("Boros Charm", |d| {
            d.colors = strings(&["R", "W"]);
            d.parsed_cost = strings(&["r", "w"]);
            d.oracle_text = "Choose one -\n• Deal 4 damage.\n• Protect.".to_string();
        }),
        make_card("Kitchen Finks", |d| {
            d.colors = strings(&["G", "W"]);
            d.parsed_cost = strings(&["1", "g-w", "g-w"]);
        }),
        make_card("Delver of Secrets", |d| {
            d.layout = "transform".to_string();
            d.reprint = true;
        }),
    ];
    assert_eq!(matching("is:gold", &cards), vec!["Boros Charm"]);
    assert_eq!(matching("is:hybrid", &cards), vec!["Kitchen Finks"]);
    assert_eq!(matching("is:modal", &cards), vec!["Boros Charm"]);
    assert_eq!(matching("is:dfc", &cards), vec!["Delver of Secrets"]);
    assert_eq!(matching("is:tdfc", &cards), vec!["Delver of Secrets"]);
    assert_eq!(
        matching("is:firstprint", &cards),
        vec!["Boros Charm", "Kitchen Finks"]
    );
    assert_eq!(matching("-is:reprint", &cards), matching("is:firstprint", &cards));
}

#[test]
fn test_card_without_details() {
    let bare = Card {
        card_id: "missing".to_string(),
        ..Card::default()
    };
    let cards = vec![bare];
    assert!(matching("is:gold", &cards).is_empty());
    assert!(matching("t:creature", &cards).is_empty());
    assert_eq!(matching("cardid:missing", &cards), vec![""]);
}

// ==================== Boolean Composition Tests ====================

#[test]
fn test_and_or_precedence_on_cards() {
    let cards = sample_cards();
    // (t:creature AND c:g) OR t:instant
    assert_eq!(
        matching("t:creature c:g or t:instant", &cards),
        vec!["Llanowar Elves", "Counterspell"]
    );
    // t:creature AND (c:g OR t:instant)
    assert_eq!(
        matching("t:creature (c:g or t:instant)", &cards),
        vec!["Llanowar Elves"]
    );
}

#[test]
fn test_double_negation_is_identity() {
    let cards = sample_cards();
    for query in ["t:creature", "cmc>=2", "c:w", "r>=rare", "o:counter"] {
        let plain = matching(query, &cards);
        assert_eq!(matching(&format!("-(-{query})"), &cards), plain, "{query}");
        assert_eq!(matching(&format!("--{query}"), &cards), plain, "{query}");
    }
}

#[test]
fn test_negated_group() {
    let cards = sample_cards();
    assert_eq!(
        matching("-(t:creature or t:land)", &cards),
        vec!["Wrath of God", "Counterspell"]
    );
}

#[test]
fn test_evaluator_wrapper() {
    let cards = sample_cards();
    let compiled = filter("t:creature");
    let evaluator = FilterEvaluator::new(Some(&compiled));
    assert_eq!(
        names(&evaluator.filter_cards(&cards)),
        vec!["Llanowar Elves", "Sphinx of the Steel Wind"]
    );
    assert_eq!(evaluator.count_matches(&cards), 2);
    assert!(evaluator.matches(&cards[0]));
    assert!(!evaluator.matches(&cards[1]));

    let everything = FilterEvaluator::new(None);
    assert_eq!(everything.count_matches(&cards), cards.len());
}

#[test]
fn test_duplicates_are_preserved() {
    let cards = sample_cards();
    let doubled: Vec<Card> = cards.iter().chain(cards.iter()).cloned().collect();
    assert_eq!(matching("t:instant", &doubled), vec!["Counterspell", "Counterspell"]);
}
