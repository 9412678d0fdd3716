//! Common helper functions for output formatting.

use cardquery::filter::Value;
use cardquery_model::ManaColor;
use owo_colors::OwoColorize;

/// Truncates a string to a maximum number of characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Formats parsed cost symbols (`"2"`, `"w"`, `"w-u"`) as `{2}{W}{W/U}`.
pub fn format_cost(cost: &[String]) -> String {
    cost.iter()
        .map(|symbol| format!("{{{}}}", symbol.to_uppercase().replace('-', "/")))
        .collect()
}

/// Formats a color identity as its letters, or `C` for colorless.
pub fn format_colors(colors: &[String]) -> String {
    if colors.is_empty() {
        "C".to_string()
    } else {
        colors.concat()
    }
}

/// Pads `text` to `width` characters, then colors it by the card's identity.
///
/// Padding comes first so color escapes don't break column alignment.
pub fn paint_by_identity(text: &str, width: usize, identity: &[String], use_colors: bool) -> String {
    let padded = format!("{:<width$}", truncate_str(text, width));
    if !use_colors {
        return padded;
    }

    let colors: Vec<ManaColor> = identity
        .iter()
        .filter_map(|code| code.chars().next().and_then(ManaColor::from_letter))
        .filter(|color| *color != ManaColor::Colorless)
        .collect();

    match colors.as_slice() {
        [] => padded.dimmed().to_string(),
        [ManaColor::White] => padded.bright_white().to_string(),
        [ManaColor::Blue] => padded.blue().to_string(),
        [ManaColor::Black] => padded.magenta().to_string(),
        [ManaColor::Red] => padded.red().to_string(),
        [ManaColor::Green] => padded.green().to_string(),
        _ => padded.yellow().to_string(),
    }
}

/// Formats a price in dollars, or an empty string when unknown.
pub fn format_price(price: Option<f64>) -> String {
    price.map(|p| format!("${p:.2}")).unwrap_or_default()
}

/// Formats a typed condition value the way a user would type it.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Integer(n) => n.to_string(),
        Value::HalfInteger(n) | Value::Dollars(n) => n.to_string(),
        Value::Text(text) | Value::Identifier(text) => text.clone(),
        Value::Colors(colors) => format_colors(colors),
        Value::Count(n) => n.to_string(),
        Value::ManaCost(groups) => groups
            .iter()
            .map(|group| format!("{{{}}}", group.join("/")))
            .collect(),
        Value::ManaPool(symbols) => symbols.concat(),
        Value::Rarity(text) | Value::Status(text) | Value::Finish(text) => text.clone(),
        Value::Date(date) => date.format("%Y-%m-%d").to_string(),
        Value::Category(category) => category.to_string(),
        Value::Field(field) => field.to_string(),
    }
}
