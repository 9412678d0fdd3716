//! Conversion of raw value text into typed [`Value`]s.

use chrono::NaiveDate;

use super::ast::Value;
use super::categories::Category;
use super::error::{FilterError, FilterResult};
use super::fields::{FieldId, ValueKind};
use super::mana;
use super::operations::{rarity_ordinal, RARITIES};

/// Color words and named color combinations.
const COLOR_NAMES: &[(&str, &str)] = &[
    ("white", "w"),
    ("blue", "u"),
    ("black", "b"),
    ("red", "r"),
    ("green", "g"),
    ("colorless", "c"),
    ("azorius", "wu"),
    ("dimir", "ub"),
    ("rakdos", "br"),
    ("gruul", "rg"),
    ("selesnya", "gw"),
    ("orzhov", "wb"),
    ("izzet", "ur"),
    ("golgari", "bg"),
    ("boros", "rw"),
    ("simic", "gu"),
    ("bant", "gwu"),
    ("esper", "wub"),
    ("grixis", "ubr"),
    ("jund", "brg"),
    ("naya", "rgw"),
    ("abzan", "wbg"),
    ("jeskai", "urw"),
    ("sultai", "bgu"),
    ("mardu", "rwb"),
    ("temur", "urg"),
];

/// Canonical ownership statuses.
pub const STATUSES: &[&str] = &[
    "Not Owned",
    "Ordered",
    "Owned",
    "Premium Owned",
    "Proxied",
    "Borrowed",
];

/// Canonical finishes.
pub const FINISHES: &[&str] = &["Non-foil", "Foil", "Etched"];

/// Parses the text after a field's operator.
pub fn parse_value(field: FieldId, raw: &str) -> FilterResult<Value> {
    let invalid = |reason: &str| FilterError::invalid_value(field.name(), raw, reason);

    if field.is_numeric() {
        if let Some(other) = FieldId::from_abbreviation(raw).filter(|f| f.is_numeric()) {
            return Ok(Value::Field(other));
        }
    }

    match field.value_kind() {
        ValueKind::Text => Ok(Value::Text(raw.to_string())),
        ValueKind::Identifier => Ok(Value::Identifier(raw.to_string())),
        ValueKind::Integer => raw
            .trim()
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| invalid("expected a whole number")),
        ValueKind::HalfInteger => parse_half_integer(raw)
            .map(Value::HalfInteger)
            .ok_or_else(|| invalid("expected a number such as 3 or 2.5")),
        ValueKind::Dollars => parse_dollars(raw)
            .map(Value::Dollars)
            .ok_or_else(|| invalid("expected a price such as 2.50")),
        ValueKind::Colors => {
            if let Ok(count) = raw.trim().parse::<usize>() {
                return Ok(Value::Count(count));
            }
            parse_colors(raw)
                .map(Value::Colors)
                .ok_or_else(|| invalid("expected colors such as wu, azorius or colorless"))
        }
        ValueKind::ManaCost => mana::parse_cost(raw)
            .map(Value::ManaCost)
            .ok_or_else(|| invalid("expected a mana cost such as {2}{w/u} or 2wu")),
        ValueKind::ManaPool => mana::parse_pool(raw)
            .map(Value::ManaPool)
            .ok_or_else(|| invalid("expected a mana pool such as 2ww")),
        ValueKind::Rarity => {
            if rarity_ordinal(raw) < 0 {
                return Err(invalid("expected common, uncommon, rare, mythic or special"));
            }
            Ok(Value::Rarity(expand_rarity(raw)))
        }
        ValueKind::Status => canonical(raw, STATUSES)
            .map(|s| Value::Status(s.to_string()))
            .ok_or_else(|| invalid("unknown status")),
        ValueKind::Finish => canonical(raw, FINISHES)
            .map(|s| Value::Finish(s.to_string()))
            .ok_or_else(|| invalid("unknown finish")),
        ValueKind::Category => Category::from_keyword(raw)
            .map(Value::Category)
            .ok_or_else(|| invalid("unknown category")),
        ValueKind::Date => parse_date(raw)
            .map(Value::Date)
            .ok_or_else(|| invalid("expected a date such as 2020-01-31")),
    }
}

/// Accepts whole numbers and numbers ending in `.5`.
fn parse_half_integer(raw: &str) -> Option<f64> {
    let number = raw.trim().parse::<f64>().ok()?;
    if !number.is_finite() || (number * 2.0).fract() != 0.0 {
        return None;
    }
    Some(number)
}

fn parse_dollars(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let number = raw.strip_prefix('$').unwrap_or(raw).parse::<f64>().ok()?;
    (number.is_finite() && number >= 0.0).then_some(number)
}

/// Returns uppercase color codes in WUBRG order. Colorless is the empty set.
pub fn parse_colors(raw: &str) -> Option<Vec<String>> {
    let lower = raw.trim().to_lowercase();
    let letters = COLOR_NAMES
        .iter()
        .find(|(name, _)| *name == lower)
        .map_or(lower.as_str(), |(_, letters)| *letters);

    if letters == "c" {
        return Some(Vec::new());
    }
    if letters.is_empty() || !letters.chars().all(|c| "wubrg".contains(c)) {
        return None;
    }
    Some(
        "wubrg"
            .chars()
            .filter(|c| letters.contains(*c))
            .map(|c| c.to_ascii_uppercase().to_string())
            .collect(),
    )
}

/// Matches a canonical name ignoring case, spaces, dashes and underscores.
/// A single letter stands for the full rarity name; anything else is kept.
fn expand_rarity(raw: &str) -> String {
    let lower = raw.to_lowercase();
    if lower.chars().count() == 1 {
        if let Some(name) = RARITIES.iter().find(|name| name.starts_with(lower.as_str())) {
            return name.to_string();
        }
    }
    lower
}

fn canonical(raw: &str, names: &[&'static str]) -> Option<&'static str> {
    let wanted = squash(raw);
    names.iter().copied().find(|name| squash(name) == wanted)
}

fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Accepts `YYYY-MM-DD`, or a bare year meaning January 1st.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if raw.len() == 4 {
        let year = raw.parse::<i32>().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }
    None
}
