//! Property checks for the filter engine over small exhaustive domains.

use cardquery::filter::{
    can_cast_with, can_cast_with_infinite, filter_cards, make_filter, parse_cost, FilterParser,
};
use cardquery_model::{Card, CardDetails};

fn pool(symbols: &[&str]) -> Vec<String> {
    symbols.iter().map(|s| s.to_string()).collect()
}

/// Every ordering of the items, including repeats of equal items.
fn permutations(items: &[String]) -> Vec<Vec<String>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut result = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let first = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, first.clone());
            result.push(tail);
        }
    }
    result
}

/// Every subset of the five colors, in WUBRG order.
fn color_subsets() -> Vec<Vec<&'static str>> {
    let colors = ["W", "U", "B", "R", "G"];
    (0u32..32)
        .map(|mask| {
            colors
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, c)| *c)
                .collect()
        })
        .collect()
}

fn card_with_identity(identity: &[&str]) -> Card {
    let mut details = CardDetails::named(identity.concat());
    details.color_identity = identity.iter().map(|c| c.to_string()).collect();
    Card::from_details(details)
}

fn query_colors(colors: &[&str]) -> String {
    if colors.is_empty() {
        "c".to_string()
    } else {
        colors.concat().to_lowercase()
    }
}

fn is_subset(a: &[&str], b: &[&str]) -> bool {
    a.iter().all(|x| b.contains(x))
}

// ============================================================================
// Castability
// ============================================================================

#[test]
fn test_castability_is_order_independent() {
    let costs = [
        "{2}{w}{w}",
        "{1}{w/u}{u}",
        "{2/g}{g}",
        "{b/p}{1}",
        "{x}{r}{r}",
        "{x/2}{x/w}",
        "{w}{u}{b}",
    ];
    let pools = [
        pool(&["2", "w", "w"]),
        pool(&["1", "w", "w"]),
        pool(&["u", "w", "u"]),
        pool(&["g", "1", "1", "g"]),
        pool(&["b", "b"]),
        pool(&["r", "r", "w", "u"]),
        pool(&["w", "u", "b", "1"]),
    ];

    for cost_text in costs {
        let cost = parse_cost(cost_text).expect("cost should parse");
        for symbols in &pools {
            let exact = can_cast_with(symbols, &cost);
            let infinite = can_cast_with_infinite(symbols, &cost);
            for shuffled in permutations(symbols) {
                assert_eq!(
                    can_cast_with(&shuffled, &cost),
                    exact,
                    "exact castability of {cost_text} changed for {shuffled:?}"
                );
                assert_eq!(
                    can_cast_with_infinite(&shuffled, &cost),
                    infinite,
                    "unlimited castability of {cost_text} changed for {shuffled:?}"
                );
            }
        }
    }
}

#[test]
fn test_castability_examples() {
    let cost = parse_cost("{1}{w}{w}").unwrap();
    assert!(can_cast_with(&pool(&["2", "w", "w"]), &cost));
    // Fixed requirements never block exact castability.
    assert!(can_cast_with(&pool(&["1", "w", "w"]), &cost));
    assert!(can_cast_with_infinite(&pool(&["w", "w"]), &cost));
    assert!(!can_cast_with_infinite(&pool(&["u", "u"]), &cost));
}

#[test]
fn test_castability_without_requirements_is_trivial() {
    let generic = parse_cost("{3}").unwrap();
    assert!(can_cast_with(&[], &generic));
    assert!(can_cast_with(&pool(&["1"]), &generic));
    assert!(can_cast_with_infinite(&[], &generic));

    let mixed = parse_cost("{w/u}{2/r}{b/p}").unwrap();
    assert!(can_cast_with(&[], &mixed));
    assert!(can_cast_with_infinite(&pool(&["u", "b"]), &mixed));
    assert!(!can_cast_with_infinite(&pool(&["u"]), &mixed));
}

#[test]
fn test_variable_cost_needs_discharge() {
    let cost = parse_cost("{x}{x}{g}").unwrap();
    assert!(!can_cast_with(&pool(&["g"]), &cost));
    assert!(!can_cast_with(&pool(&["9", "g", "g"]), &cost));
    assert!(can_cast_with_infinite(&pool(&["g"]), &cost));
}

// ============================================================================
// Set family
// ============================================================================

#[test]
fn test_color_set_laws() {
    let subsets = color_subsets();
    let cards: Vec<Card> = subsets.iter().map(|s| card_with_identity(s)).collect();

    for query in &subsets {
        let text = query_colors(query);
        let superset = make_filter(&format!("c>={text}")).unwrap().unwrap();
        let equal = make_filter(&format!("c={text}")).unwrap().unwrap();
        let proper = make_filter(&format!("c<{text}")).unwrap().unwrap();
        let at_most = make_filter(&format!("c<={text}")).unwrap().unwrap();

        for (field, card) in subsets.iter().zip(&cards) {
            let contains = is_subset(query, field);
            let within = is_subset(field, query);
            assert_eq!(superset.matches(card), contains, "{field:?} >= {query:?}");
            assert_eq!(equal.matches(card), contains && within, "{field:?} = {query:?}");
            assert_eq!(
                proper.matches(card),
                within && !contains,
                "{field:?} < {query:?}"
            );
            assert_eq!(at_most.matches(card), within, "{field:?} <= {query:?}");
        }
    }
}

#[test]
fn test_colon_matches_superset() {
    let cards = vec![
        card_with_identity(&["W", "U", "B"]),
        card_with_identity(&["W"]),
    ];
    let filter = make_filter("c:wu").unwrap();
    let matched = filter_cards(&cards, filter.as_ref());
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].name(), "WUB");
}

// ============================================================================
// Rarity
// ============================================================================

#[test]
fn test_rarity_order() {
    let rarities = ["common", "uncommon", "rare", "mythic"];
    let cards: Vec<Card> = rarities
        .iter()
        .map(|rarity| {
            let mut details = CardDetails::named(*rarity);
            details.rarity = rarity.to_string();
            Card::from_details(details)
        })
        .collect();

    for (i, query) in rarities.iter().enumerate() {
        let above = make_filter(&format!("r>{query}")).unwrap().unwrap();
        for (j, card) in cards.iter().enumerate() {
            assert_eq!(above.matches(card), j > i, "{} > {query}", rarities[j]);
        }
    }

    let short = make_filter("r=m").unwrap().unwrap();
    assert!(short.matches(&cards[3]));
    assert!(!short.matches(&cards[2]));
}

#[test]
fn test_rarity_equality_is_textual_and_ordering_is_by_letter() {
    let mut details = CardDetails::named("Abbreviated");
    details.rarity = "m".to_string();
    let abbreviated = Card::from_details(details);

    let equal = make_filter("r=mythic").unwrap().unwrap();
    let not_equal = make_filter("r!=mythic").unwrap().unwrap();
    let at_least = make_filter("r>=mythic").unwrap().unwrap();
    let at_most = make_filter("r<=mythic").unwrap().unwrap();
    assert!(!equal.matches(&abbreviated));
    assert!(not_equal.matches(&abbreviated));
    assert!(at_least.matches(&abbreviated));
    assert!(at_most.matches(&abbreviated));
}

// ============================================================================
// Parser
// ============================================================================

#[test]
fn test_double_negation_parses_to_same_tree() {
    for query in ["t:elf", "cmc>=3", "c:wu", "o:\"draw a card\"", "r<rare"] {
        assert_eq!(
            FilterParser::parse(&format!("-(-{query})")).unwrap(),
            FilterParser::parse(query).unwrap(),
            "{query}"
        );
    }
}

#[test]
fn test_stringify_round_trip() {
    for query in [
        "cmc<3 c:wu t:creature -o:\"draw a card\"",
        "a b or c",
        "  spaced   out  ",
        "(t:elf OR t:goblin) pow>tou",
    ] {
        let filter = make_filter(query).unwrap().unwrap();
        assert_eq!(filter.stringify(), query);
    }
}
