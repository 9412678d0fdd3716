//! Common model types shared by [`Card`](super::Card) and
//! [`CardDetails`](super::CardDetails).

use serde::{Deserialize, Deserializer, Serialize};

/// One of the five colors, or colorless.
///
/// Card records store colors as single uppercase letters (`"W"`, `"U"`, ...);
/// mana costs store them as lowercase letters. `ManaColor` is the typed view of
/// both spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ManaColor {
    White,
    Blue,
    Black,
    Red,
    Green,
    Colorless,
}

impl ManaColor {
    /// The five real colors in WUBRG order.
    pub const WUBRG: [ManaColor; 5] = [
        ManaColor::White,
        ManaColor::Blue,
        ManaColor::Black,
        ManaColor::Red,
        ManaColor::Green,
    ];

    /// Returns the lowercase letter used in mana costs.
    pub fn letter(self) -> char {
        match self {
            ManaColor::White => 'w',
            ManaColor::Blue => 'u',
            ManaColor::Black => 'b',
            ManaColor::Red => 'r',
            ManaColor::Green => 'g',
            ManaColor::Colorless => 'c',
        }
    }

    /// Returns the uppercase letter used in color and color identity lists.
    pub fn code(self) -> &'static str {
        match self {
            ManaColor::White => "W",
            ManaColor::Blue => "U",
            ManaColor::Black => "B",
            ManaColor::Red => "R",
            ManaColor::Green => "G",
            ManaColor::Colorless => "C",
        }
    }

    /// Parses a color letter in either case.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            'w' => Some(ManaColor::White),
            'u' => Some(ManaColor::Blue),
            'b' => Some(ManaColor::Black),
            'r' => Some(ManaColor::Red),
            'g' => Some(ManaColor::Green),
            'c' => Some(ManaColor::Colorless),
            _ => None,
        }
    }
}

/// Market prices attached to a printing. Every price is optional because
/// plenty of printings have never been sold in a given finish or market.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prices {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usd: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usd_foil: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usd_etched: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eur: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tix: Option<f64>,
}

/// Accepts either a JSON array of strings or a compact string such as `"WUB"`.
///
/// Older card lists store colors as a single string; each character is one
/// color code.
pub(crate) fn string_or_seq<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Seq(Vec<String>),
        Compact(String),
    }

    Ok(match Option::<Repr>::deserialize(deserializer)? {
        Some(Repr::Seq(values)) => Some(values),
        Some(Repr::Compact(s)) => Some(s.chars().map(|c| c.to_string()).collect()),
        None => None,
    })
}

/// Like [`string_or_seq`] for fields that are never absent.
pub(crate) fn string_or_seq_required<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string_or_seq(deserializer)?.unwrap_or_default())
}

/// Accepts a JSON number or a numeric string (`"2.5"`).
pub(crate) fn number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    match Option::<Repr>::deserialize(deserializer)? {
        Some(Repr::Number(n)) => Ok(Some(n)),
        Some(Repr::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Repr::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}
