//! The field table: query abbreviations, canonical field names, value kinds
//! and the operators each field accepts.

use std::fmt;

use cardquery_model::ManaColor;

use super::ast::Operator;

/// A card attribute a condition can test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Name,
    Oracle,
    Type,
    Artist,
    Cmc,
    Mana,
    Castable,
    Color,
    Identity,
    Set,
    Power,
    Toughness,
    Loyalty,
    Rarity,
    Tag,
    Status,
    Finish,
    Price,
    PriceFoil,
    PriceEur,
    PriceTix,
    Legality,
    Banned,
    Restricted,
    Is,
    /// Number of cost symbols containing the given color.
    Devotion(ManaColor),
    Released,
    Elo,
    Popularity,
    Cubes,
    Picks,
    Words,
    OracleId,
    CardId,
    Layout,
}

/// The shape of value a field expects after its operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Free text.
    Text,
    /// A whole number.
    Integer,
    /// A number that may end in `.5`.
    HalfInteger,
    /// A price such as `2.50` or `$2.50`.
    Dollars,
    /// A color combination, or a color count.
    Colors,
    /// A mana cost such as `{2}{w/u}` or `2wu`.
    ManaCost,
    /// A mana pool such as `2ww`.
    ManaPool,
    /// A rarity word or its first letter.
    Rarity,
    /// An ownership status.
    Status,
    /// A card finish.
    Finish,
    /// A category keyword for `is:`.
    Category,
    /// A `YYYY-MM-DD` date.
    Date,
    /// A code or identifier compared literally.
    Identifier,
}

impl ValueKind {
    /// Short lowercase name for listings.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Text => "text",
            ValueKind::Integer => "integer",
            ValueKind::HalfInteger => "number",
            ValueKind::Dollars => "price",
            ValueKind::Colors => "colors",
            ValueKind::ManaCost => "mana cost",
            ValueKind::ManaPool => "mana pool",
            ValueKind::Rarity => "rarity",
            ValueKind::Status => "status",
            ValueKind::Finish => "finish",
            ValueKind::Category => "category",
            ValueKind::Date => "date",
            ValueKind::Identifier => "identifier",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const EQUALITY: &[Operator] = &[
    Operator::Colon,
    Operator::Equal,
    Operator::NotEqual,
    Operator::LessGreater,
];

const ALL: &[Operator] = &[
    Operator::Colon,
    Operator::Equal,
    Operator::NotEqual,
    Operator::LessGreater,
    Operator::Less,
    Operator::LessEqual,
    Operator::Greater,
    Operator::GreaterEqual,
];

const CASTABLE: &[Operator] = &[
    Operator::Colon,
    Operator::Equal,
    Operator::NotEqual,
    Operator::LessGreater,
    Operator::LessEqual,
    Operator::Greater,
];

/// Abbreviation to field. Abbreviations are matched case-insensitively.
const FIELD_ALIASES: &[(&str, FieldId)] = &[
    ("n", FieldId::Name),
    ("name", FieldId::Name),
    ("o", FieldId::Oracle),
    ("oracle", FieldId::Oracle),
    ("text", FieldId::Oracle),
    ("t", FieldId::Type),
    ("type", FieldId::Type),
    ("a", FieldId::Artist),
    ("art", FieldId::Artist),
    ("artist", FieldId::Artist),
    ("cmc", FieldId::Cmc),
    ("mv", FieldId::Cmc),
    ("manavalue", FieldId::Cmc),
    ("m", FieldId::Mana),
    ("mana", FieldId::Mana),
    ("cost", FieldId::Mana),
    ("cw", FieldId::Castable),
    ("castwith", FieldId::Castable),
    ("castable", FieldId::Castable),
    ("c", FieldId::Color),
    ("color", FieldId::Color),
    ("colors", FieldId::Color),
    ("ci", FieldId::Identity),
    ("id", FieldId::Identity),
    ("identity", FieldId::Identity),
    ("s", FieldId::Set),
    ("set", FieldId::Set),
    ("e", FieldId::Set),
    ("edition", FieldId::Set),
    ("pow", FieldId::Power),
    ("power", FieldId::Power),
    ("tou", FieldId::Toughness),
    ("toughness", FieldId::Toughness),
    ("loy", FieldId::Loyalty),
    ("loyalty", FieldId::Loyalty),
    ("r", FieldId::Rarity),
    ("rarity", FieldId::Rarity),
    ("tag", FieldId::Tag),
    ("tags", FieldId::Tag),
    ("stat", FieldId::Status),
    ("status", FieldId::Status),
    ("fin", FieldId::Finish),
    ("finish", FieldId::Finish),
    ("p", FieldId::Price),
    ("price", FieldId::Price),
    ("usd", FieldId::Price),
    ("pf", FieldId::PriceFoil),
    ("pricefoil", FieldId::PriceFoil),
    ("foil", FieldId::PriceFoil),
    ("eur", FieldId::PriceEur),
    ("priceeur", FieldId::PriceEur),
    ("tix", FieldId::PriceTix),
    ("pricetix", FieldId::PriceTix),
    ("leg", FieldId::Legality),
    ("legal", FieldId::Legality),
    ("legality", FieldId::Legality),
    ("banned", FieldId::Banned),
    ("restricted", FieldId::Restricted),
    ("is", FieldId::Is),
    ("dw", FieldId::Devotion(ManaColor::White)),
    ("du", FieldId::Devotion(ManaColor::Blue)),
    ("db", FieldId::Devotion(ManaColor::Black)),
    ("dr", FieldId::Devotion(ManaColor::Red)),
    ("dg", FieldId::Devotion(ManaColor::Green)),
    ("dc", FieldId::Devotion(ManaColor::Colorless)),
    ("devotionw", FieldId::Devotion(ManaColor::White)),
    ("devotionu", FieldId::Devotion(ManaColor::Blue)),
    ("devotionb", FieldId::Devotion(ManaColor::Black)),
    ("devotionr", FieldId::Devotion(ManaColor::Red)),
    ("devotiong", FieldId::Devotion(ManaColor::Green)),
    ("devotionc", FieldId::Devotion(ManaColor::Colorless)),
    ("date", FieldId::Released),
    ("released", FieldId::Released),
    ("elo", FieldId::Elo),
    ("pop", FieldId::Popularity),
    ("popularity", FieldId::Popularity),
    ("cubes", FieldId::Cubes),
    ("cubecount", FieldId::Cubes),
    ("picks", FieldId::Picks),
    ("pickcount", FieldId::Picks),
    ("wc", FieldId::Words),
    ("words", FieldId::Words),
    ("oracleid", FieldId::OracleId),
    ("oid", FieldId::OracleId),
    ("cardid", FieldId::CardId),
    ("scryfall", FieldId::CardId),
    ("layout", FieldId::Layout),
];

/// Longest distance at which a misspelled field still gets a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 2;

impl FieldId {
    /// Resolves a user-facing abbreviation.
    pub fn from_abbreviation(abbreviation: &str) -> Option<Self> {
        let lower = abbreviation.to_ascii_lowercase();
        FIELD_ALIASES
            .iter()
            .find(|(alias, _)| *alias == lower)
            .map(|(_, field)| *field)
    }

    /// Returns the closest known abbreviation to a misspelled one.
    pub fn suggest(abbreviation: &str) -> Option<&'static str> {
        let lower = abbreviation.to_ascii_lowercase();
        FIELD_ALIASES
            .iter()
            .map(|(alias, _)| (*alias, strsim::levenshtein(&lower, alias)))
            .filter(|(alias, distance)| {
                *distance <= MAX_SUGGESTION_DISTANCE && *distance < alias.len()
            })
            .min_by_key(|(_, distance)| *distance)
            .map(|(alias, _)| alias)
    }

    /// Every abbreviation that resolves to this field.
    pub fn aliases(self) -> impl Iterator<Item = &'static str> {
        FIELD_ALIASES
            .iter()
            .filter(move |(_, field)| *field == self)
            .map(|(alias, _)| *alias)
    }

    /// Every distinct field, in table order.
    pub fn all() -> Vec<FieldId> {
        let mut fields: Vec<FieldId> = Vec::new();
        for (_, field) in FIELD_ALIASES {
            if !fields.contains(field) {
                fields.push(*field);
            }
        }
        fields
    }

    /// The canonical name reported in `fields_used`.
    pub fn name(self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::Oracle => "oracle",
            FieldId::Type => "type",
            FieldId::Artist => "artist",
            FieldId::Cmc => "cmc",
            FieldId::Mana => "mana",
            FieldId::Castable => "castable",
            FieldId::Color => "color",
            FieldId::Identity => "identity",
            FieldId::Set => "set",
            FieldId::Power => "power",
            FieldId::Toughness => "toughness",
            FieldId::Loyalty => "loyalty",
            FieldId::Rarity => "rarity",
            FieldId::Tag => "tag",
            FieldId::Status => "status",
            FieldId::Finish => "finish",
            FieldId::Price => "price",
            FieldId::PriceFoil => "pricefoil",
            FieldId::PriceEur => "priceeur",
            FieldId::PriceTix => "pricetix",
            FieldId::Legality => "legality",
            FieldId::Banned => "banned",
            FieldId::Restricted => "restricted",
            FieldId::Is => "is",
            FieldId::Devotion(ManaColor::White) => "devotionw",
            FieldId::Devotion(ManaColor::Blue) => "devotionu",
            FieldId::Devotion(ManaColor::Black) => "devotionb",
            FieldId::Devotion(ManaColor::Red) => "devotionr",
            FieldId::Devotion(ManaColor::Green) => "devotiong",
            FieldId::Devotion(ManaColor::Colorless) => "devotionc",
            FieldId::Released => "released",
            FieldId::Elo => "elo",
            FieldId::Popularity => "popularity",
            FieldId::Cubes => "cubes",
            FieldId::Picks => "picks",
            FieldId::Words => "words",
            FieldId::OracleId => "oracleid",
            FieldId::CardId => "cardid",
            FieldId::Layout => "layout",
        }
    }

    /// The value kind the field's operator is followed by.
    pub fn value_kind(self) -> ValueKind {
        match self {
            FieldId::Name
            | FieldId::Oracle
            | FieldId::Type
            | FieldId::Artist
            | FieldId::Tag
            | FieldId::Legality
            | FieldId::Banned
            | FieldId::Restricted => ValueKind::Text,
            FieldId::Cmc | FieldId::Power | FieldId::Toughness => ValueKind::HalfInteger,
            FieldId::Loyalty
            | FieldId::Devotion(_)
            | FieldId::Elo
            | FieldId::Popularity
            | FieldId::Cubes
            | FieldId::Picks
            | FieldId::Words => ValueKind::Integer,
            FieldId::Price | FieldId::PriceFoil | FieldId::PriceEur | FieldId::PriceTix => {
                ValueKind::Dollars
            }
            FieldId::Color | FieldId::Identity => ValueKind::Colors,
            FieldId::Mana => ValueKind::ManaCost,
            FieldId::Castable => ValueKind::ManaPool,
            FieldId::Rarity => ValueKind::Rarity,
            FieldId::Status => ValueKind::Status,
            FieldId::Finish => ValueKind::Finish,
            FieldId::Is => ValueKind::Category,
            FieldId::Released => ValueKind::Date,
            FieldId::Set | FieldId::OracleId | FieldId::CardId | FieldId::Layout => {
                ValueKind::Identifier
            }
        }
    }

    /// Operators the field's value kind accepts.
    pub fn operators(self) -> &'static [Operator] {
        match self.value_kind() {
            ValueKind::Integer
            | ValueKind::HalfInteger
            | ValueKind::Dollars
            | ValueKind::Colors
            | ValueKind::Rarity
            | ValueKind::Date => ALL,
            ValueKind::ManaPool => CASTABLE,
            ValueKind::Text
            | ValueKind::ManaCost
            | ValueKind::Status
            | ValueKind::Finish
            | ValueKind::Category
            | ValueKind::Identifier => EQUALITY,
        }
    }

    /// Whether the field's value can be compared against another field's.
    pub fn is_numeric(self) -> bool {
        matches!(
            self.value_kind(),
            ValueKind::Integer | ValueKind::HalfInteger | ValueKind::Dollars
        )
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
