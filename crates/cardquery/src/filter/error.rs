//! Error types for filter parsing and compilation.

use thiserror::Error;

/// A specialized Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur while turning query text into a card filter.
///
/// Most variants are parse errors: the user typed something the grammar does
/// not accept, and the message is meant to be shown back to them. The
/// [`UnrecognizedOperator`](FilterError::UnrecognizedOperator) and
/// [`InvalidRarity`](FilterError::InvalidRarity) variants are configuration
/// errors: the grammar handed the compiler something it cannot compile. See
/// [`FilterError::is_configuration`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The filter expression is empty.
    #[error("filter expression is empty")]
    EmptyExpression,

    /// An unexpected token was encountered during parsing.
    #[error("unexpected token '{token}' at position {position}")]
    UnexpectedToken {
        /// The unexpected token that was encountered.
        token: String,
        /// Byte offset of the token in the query text.
        position: usize,
    },

    /// An unexpected end of input was encountered.
    #[error("unexpected end of expression")]
    UnexpectedEndOfInput,

    /// An unclosed parenthesis was found.
    #[error("unclosed parenthesis")]
    UnclosedParenthesis,

    /// The field abbreviation has no entry in the field table.
    #[error("unknown field '{field}'{}", suggestion.as_ref().map(|s| format!(" (did you mean '{s}'?)")).unwrap_or_default())]
    UnknownField {
        /// The field as typed.
        field: String,
        /// The closest known abbreviation, if any is close enough.
        suggestion: Option<String>,
    },

    /// The field's value type does not accept this operator.
    #[error("operator '{operator}' cannot be used with field '{field}'")]
    UnsupportedOperator {
        /// Canonical field name.
        field: String,
        /// The operator as typed.
        operator: String,
    },

    /// An operator was not followed by a value.
    #[error("missing value for field '{field}'")]
    MissingValue {
        /// Canonical field name.
        field: String,
    },

    /// The value could not be read as the field's value type.
    #[error("invalid value '{value}' for field '{field}': {reason}")]
    InvalidValue {
        /// Canonical field name.
        field: String,
        /// The value as typed.
        value: String,
        /// What was expected instead.
        reason: String,
    },

    /// The grammar accepted the text but produced no result.
    #[error("query did not produce a filter")]
    NoParse,

    /// The grammar produced more than one reading of the text.
    #[error("query is ambiguous ({count} possible readings)")]
    AmbiguousParse {
        /// How many results the grammar returned.
        count: usize,
    },

    /// An operator family received an operator outside its documented set.
    #[error("unrecognized operator '{operator}' for {family} operation")]
    UnrecognizedOperator {
        /// The operator family.
        family: &'static str,
        /// The operator token.
        operator: String,
    },

    /// A rarity value that does not map to a known rarity.
    #[error("invalid rarity value '{value}'")]
    InvalidRarity {
        /// The rarity as given.
        value: String,
    },
}

impl FilterError {
    /// Creates an unexpected token error.
    pub fn unexpected_token(token: impl Into<String>, position: usize) -> Self {
        FilterError::UnexpectedToken {
            token: token.into(),
            position,
        }
    }

    /// Creates an invalid value error.
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        FilterError::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unrecognized operator error for an operator family.
    pub fn unrecognized_operator(family: &'static str, operator: impl ToString) -> Self {
        FilterError::UnrecognizedOperator {
            family,
            operator: operator.to_string(),
        }
    }

    /// Returns true for errors caused by a mismatch between the grammar and
    /// the compiler rather than by the user's query text.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            FilterError::UnrecognizedOperator { .. } | FilterError::InvalidRarity { .. }
        )
    }
}
