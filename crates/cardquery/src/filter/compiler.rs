//! Compiles parse trees into card predicates.
//!
//! Each [`Condition`] is bound to a typed accessor on [`Card`] through a match
//! over [`FieldId`] and to the operator family its value kind uses. Groups
//! fold their members left to right with AND or OR.

use std::sync::Arc;

use cardquery_model::Card;

use super::ast::{Condition, Group, Node, Operator, Value};
use super::error::{FilterError, FilterResult};
use super::fields::FieldId;
use super::operations::{self, ValuePredicate};

/// A compiled predicate over cards.
pub type CardPredicate = Arc<dyn Fn(&Card) -> bool + Send + Sync>;

/// Cards whose legendary shorthand is the first word rather than the text
/// before the comma.
const SHORTHAND_OVERRIDES: &[&str] = &[
    "Crovax the Cursed",
    "Darigaaz Reincarnated",
    "Gorm the Great",
    "Haktos the Unscarred",
    "Hazoret the Fervent",
    "Phage the Untouchable",
    "Rakdos the Defiler",
    "Rashka the Slayer",
    "Rasputin Dreamweaver",
    "Rubinia Soulsinger",
];

/// Placeholder a card's oracle text uses for its own name.
const NAME_PLACEHOLDER: &str = "~";

/// Compiles a parse tree.
pub fn compile(node: &Node) -> FilterResult<CardPredicate> {
    match node {
        Node::Condition(condition) => compile_condition(condition),
        Node::Group(group) => compile_group(group),
    }
}

/// Folds a group's members into one predicate. The first member seeds the
/// accumulator; each following member joins with AND or OR.
pub fn compile_group(group: &Group) -> FilterResult<CardPredicate> {
    let mut accumulated = compile(&group.first)?;
    for (connective, node) in &group.rest {
        let left = accumulated;
        let right = compile(node)?;
        let joined: CardPredicate = if connective.is_and() {
            Arc::new(move |card: &Card| left(card) && right(card))
        } else {
            Arc::new(move |card: &Card| left(card) || right(card))
        };
        accumulated = joined;
    }
    Ok(negate_if(group.negated, accumulated))
}

fn negate_if(negated: bool, predicate: CardPredicate) -> CardPredicate {
    if negated {
        Arc::new(move |card: &Card| !predicate(card))
    } else {
        predicate
    }
}

/// Compiles one condition, wrapping it in negation when prefixed with `-`.
pub fn compile_condition(condition: &Condition) -> FilterResult<CardPredicate> {
    let predicate = bind(condition.field, condition.operator, &condition.value)?;
    Ok(negate_if(condition.negated, predicate))
}

fn mismatch(field: FieldId, value: &Value) -> FilterError {
    FilterError::invalid_value(field.name(), format!("{value:?}"), "value does not fit the field")
}

/// Binds a string-valued accessor to a string predicate.
fn text_field(accessor: fn(&Card) -> &str, predicate: ValuePredicate<str>) -> CardPredicate {
    Arc::new(move |card: &Card| predicate(accessor(card)))
}

/// Binds a numeric accessor to an ordering predicate over missing values.
fn number_field(
    accessor: fn(&Card) -> Option<f64>,
    predicate: ValuePredicate<Option<f64>>,
) -> CardPredicate {
    Arc::new(move |card: &Card| predicate(&accessor(card)))
}

/// The numeric view of a field, for ordering and field-to-field comparison.
fn numeric_accessor(field: FieldId) -> Option<Box<dyn Fn(&Card) -> Option<f64> + Send + Sync>> {
    let accessor: Box<dyn Fn(&Card) -> Option<f64> + Send + Sync> = match field {
        FieldId::Cmc => Box::new(|card: &Card| Some(card.cmc())),
        FieldId::Power => Box::new(|card: &Card| card.power()),
        FieldId::Toughness => Box::new(|card: &Card| card.toughness()),
        FieldId::Loyalty => Box::new(|card: &Card| card.loyalty()),
        FieldId::Price => Box::new(|card: &Card| card.price()),
        FieldId::PriceFoil => Box::new(|card: &Card| card.price_foil()),
        FieldId::PriceEur => Box::new(|card: &Card| card.price_eur()),
        FieldId::PriceTix => Box::new(|card: &Card| card.price_tix()),
        FieldId::Elo => Box::new(|card: &Card| card.elo()),
        FieldId::Popularity => Box::new(|card: &Card| card.popularity()),
        FieldId::Cubes => Box::new(|card: &Card| Some(card.cube_count() as f64)),
        FieldId::Picks => Box::new(|card: &Card| Some(card.pick_count() as f64)),
        FieldId::Words => Box::new(|card: &Card| Some(card.word_count() as f64)),
        FieldId::Devotion(color) => {
            let letter = color.letter();
            Box::new(move |card: &Card| Some(card.devotion(letter) as f64))
        }
        _ => return None,
    };
    Some(accessor)
}

fn bind(field: FieldId, op: Operator, value: &Value) -> FilterResult<CardPredicate> {
    // Field-to-field comparison
    if let Value::Field(other) = value {
        let (Some(left), Some(right)) = (numeric_accessor(field), numeric_accessor(*other)) else {
            return Err(mismatch(field, value));
        };
        let compare = operations::property_comparison::<f64>(op)?;
        return Ok(Arc::new(move |card: &Card| compare(&left(card), &right(card))));
    }

    match (field, value) {
        (FieldId::Name, Value::Text(text)) => {
            Ok(text_field(Card::name, operations::substring_default(op, text)?))
        }
        (FieldId::Type, Value::Text(text)) => {
            Ok(text_field(Card::type_line, operations::substring_default(op, text)?))
        }
        (FieldId::Artist, Value::Text(text)) => {
            Ok(text_field(Card::artist, operations::substring_default(op, text)?))
        }
        (FieldId::Oracle, Value::Text(text)) => oracle(op, text),

        (FieldId::Set, Value::Identifier(code)) => {
            let predicate = operations::text_equality(op, code.to_lowercase())?;
            Ok(Arc::new(move |card: &Card| predicate(&card.set_code().to_lowercase())))
        }
        (FieldId::OracleId, Value::Identifier(id)) => {
            Ok(text_field(Card::oracle_id, operations::text_equality(op, id.clone())?))
        }
        (FieldId::CardId, Value::Identifier(id)) => {
            Ok(text_field(Card::card_id, operations::text_equality(op, id.clone())?))
        }
        (FieldId::Layout, Value::Identifier(layout)) => {
            let predicate = operations::text_equality(op, layout.to_lowercase())?;
            Ok(Arc::new(move |card: &Card| predicate(&card.layout().to_lowercase())))
        }
        (FieldId::Status, Value::Status(status)) => {
            Ok(text_field(Card::status, operations::text_equality(op, status.clone())?))
        }
        (FieldId::Finish, Value::Finish(finish)) => {
            Ok(text_field(Card::finish, operations::text_equality(op, finish.clone())?))
        }

        (FieldId::Color | FieldId::Identity, Value::Colors(colors)) => {
            let accessor = color_accessor(field);
            // Colorless matches only cards with no colors at all.
            let op = match op {
                Operator::Colon if colors.is_empty() => Operator::Equal,
                other => other,
            };
            let predicate = operations::set(op, colors.clone())?;
            Ok(Arc::new(move |card: &Card| predicate(accessor(card))))
        }
        (FieldId::Color | FieldId::Identity, Value::Count(count)) => {
            let accessor = color_accessor(field);
            let predicate = operations::set_count(op, *count)?;
            Ok(Arc::new(move |card: &Card| predicate(accessor(card))))
        }

        (FieldId::Tag, Value::Text(tag)) => {
            let membership = operations::set_membership(op, tag)?;
            Ok(Arc::new(move |card: &Card| {
                membership.test(card.tags().iter().map(String::as_str))
            }))
        }
        (FieldId::Legality, Value::Text(format)) => {
            let membership = operations::set_membership(op, format)?;
            if format.eq_ignore_ascii_case("vintage") {
                // Restricted cards are still legal in vintage.
                return Ok(Arc::new(move |card: &Card| {
                    membership.test(card.legal_in().into_iter().chain(card.restricted_in()))
                }));
            }
            Ok(Arc::new(move |card: &Card| membership.test(card.legal_in())))
        }
        (FieldId::Banned, Value::Text(format)) => {
            let membership = operations::set_membership(op, format)?;
            Ok(Arc::new(move |card: &Card| membership.test(card.banned_in())))
        }
        (FieldId::Restricted, Value::Text(format)) => {
            let membership = operations::set_membership(op, format)?;
            Ok(Arc::new(move |card: &Card| membership.test(card.restricted_in())))
        }

        (FieldId::Rarity, Value::Rarity(rarity)) => {
            Ok(text_field(Card::rarity, operations::rarity(op, rarity)?))
        }

        (FieldId::Mana, Value::ManaCost(cost)) => {
            let predicate = operations::mana_cost(op, cost.clone())?;
            Ok(Arc::new(move |card: &Card| predicate(card.cost())))
        }
        (FieldId::Castable, Value::ManaPool(pool)) => {
            let predicate = operations::castable(op, pool.clone())?;
            Ok(Arc::new(move |card: &Card| predicate(card.cost())))
        }

        (FieldId::Is, Value::Category(category)) => {
            let category = *category;
            let predicate = operations::equality(op, true)?;
            Ok(Arc::new(move |card: &Card| predicate(&category.detect(card))))
        }

        (FieldId::Released, Value::Date(date)) => {
            let predicate = operations::optional_ordering(op, *date)?;
            Ok(Arc::new(move |card: &Card| predicate(&card.released())))
        }

        (FieldId::Cmc, Value::HalfInteger(n)) => {
            Ok(number_field(|card| Some(card.cmc()), operations::optional_ordering(op, *n)?))
        }
        (FieldId::Power, Value::HalfInteger(n)) => {
            Ok(number_field(Card::power, operations::optional_ordering(op, *n)?))
        }
        (FieldId::Toughness, Value::HalfInteger(n)) => {
            Ok(number_field(Card::toughness, operations::optional_ordering(op, *n)?))
        }
        (_, Value::Integer(n)) => {
            let accessor = numeric_accessor(field).ok_or_else(|| mismatch(field, value))?;
            let predicate = operations::optional_ordering(op, *n as f64)?;
            Ok(Arc::new(move |card: &Card| predicate(&accessor(card))))
        }
        (
            FieldId::Price | FieldId::PriceFoil | FieldId::PriceEur | FieldId::PriceTix,
            Value::Dollars(amount),
        ) => {
            let accessor = numeric_accessor(field).ok_or_else(|| mismatch(field, value))?;
            let predicate = operations::optional_ordering(op, *amount)?;
            Ok(Arc::new(move |card: &Card| predicate(&accessor(card))))
        }

        _ => Err(mismatch(field, value)),
    }
}

fn color_accessor(field: FieldId) -> fn(&Card) -> &[String] {
    match field {
        FieldId::Identity => Card::printed_color_identity,
        _ => Card::color_identity,
    }
}

/// Oracle text search that also matches the card's references to itself.
///
/// For the positive operators either spelling may match; for the negative
/// ones both must.
fn oracle(op: Operator, text: &str) -> FilterResult<CardPredicate> {
    let predicate = operations::contains_or_exclude(op, text)?;
    let negative = op.is_negative();
    Ok(Arc::new(move |card: &Card| {
        let oracle = card.oracle_text();
        let plain = predicate(oracle);
        if plain != negative {
            return plain;
        }
        predicate(&with_self_references(card, oracle))
    }))
}

/// Replaces the card's own name, "this spell" and any legendary shorthand
/// with `~`.
fn with_self_references(card: &Card, oracle: &str) -> String {
    let name = card.name();
    let mut expanded = if name.is_empty() {
        oracle.to_string()
    } else {
        oracle.replace(name, NAME_PLACEHOLDER)
    };
    expanded = expanded
        .replace("this spell", NAME_PLACEHOLDER)
        .replace("This spell", NAME_PLACEHOLDER);
    if let Some(shorthand) = legendary_shorthand(card) {
        expanded = expanded.replace(shorthand, NAME_PLACEHOLDER);
    }
    expanded
}

fn legendary_shorthand(card: &Card) -> Option<&str> {
    let name = card.name();
    if SHORTHAND_OVERRIDES.contains(&name) {
        return name.split(' ').next();
    }
    if card.type_line().contains("Legendary") {
        if let Some((shorthand, _)) = name.split_once(',') {
            return Some(shorthand);
        }
    }
    None
}
