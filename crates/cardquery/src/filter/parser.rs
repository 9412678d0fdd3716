//! Recursive descent parser for filter queries.

use super::ast::{Condition, Connective, Node, Operator, Value};
use super::error::{FilterError, FilterResult};
use super::fields::FieldId;
use super::lexer::{Lexer, PositionedToken, QueryToken};
use super::values::parse_value;

/// Parser for card filter queries.
///
/// # Grammar
///
/// ```text
/// query      ::= or_expr
/// or_expr    ::= and_expr ("or" and_expr)*
/// and_expr   ::= unary (("and")? unary)*
/// unary      ::= "-" unary | primary
/// primary    ::= "(" or_expr ")" | condition | bare
/// condition  ::= FIELD OPERATOR VALUE
/// bare       ::= WORD | QUOTED
/// ```
///
/// # Operator Precedence (highest to lowest)
///
/// 1. `-` (NOT) - unary
/// 2. juxtaposition or `and` - left-associative
/// 3. `or` - left-associative
///
/// # Example
///
/// ```
/// use cardquery::filter::{FilterParser, Node};
///
/// let tree = FilterParser::parse("t:elf or t:goblin").unwrap();
/// assert!(matches!(tree, Node::Group(_)));
/// ```
pub struct FilterParser {
    tokens: Vec<PositionedToken>,
    position: usize,
}

impl FilterParser {
    /// Parses a query string into a parse tree.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::EmptyExpression` if the input is blank.
    ///
    /// Returns `FilterError::UnknownField`, `FilterError::UnsupportedOperator`,
    /// `FilterError::MissingValue` or `FilterError::InvalidValue` for a
    /// condition that does not fit the field table.
    ///
    /// Returns `FilterError::UnexpectedToken` or
    /// `FilterError::UnclosedParenthesis` for malformed structure.
    pub fn parse(input: &str) -> FilterResult<Node> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(FilterError::EmptyExpression);
        }

        let tokens = Lexer::new(input).tokenize()?;
        if tokens.is_empty() {
            return Err(FilterError::EmptyExpression);
        }

        let mut parser = Self { tokens, position: 0 };
        let tree = parser.parse_or_expr()?;

        if let Some(remaining) = parser.tokens.get(parser.position) {
            return Err(FilterError::unexpected_token(
                remaining.token.to_string(),
                remaining.position,
            ));
        }

        Ok(tree)
    }

    fn peek(&self) -> Option<&QueryToken> {
        self.tokens.get(self.position).map(|t| &t.token)
    }

    fn advance(&mut self) -> Option<&PositionedToken> {
        let token = self.tokens.get(self.position);
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn check(&self, expected: &QueryToken) -> bool {
        self.peek() == Some(expected)
    }

    /// Parses OR expressions: `and_expr ("or" and_expr)*`
    fn parse_or_expr(&mut self) -> FilterResult<Node> {
        let first = self.parse_and_expr()?;
        let mut rest = Vec::new();

        while self.check(&QueryToken::Or) {
            self.advance();
            rest.push((Connective::Or, self.parse_and_expr()?));
        }

        Ok(Node::join(first, rest))
    }

    /// Parses AND expressions: `unary (("and")? unary)*`
    fn parse_and_expr(&mut self) -> FilterResult<Node> {
        let first = self.parse_unary()?;
        let mut rest = Vec::new();

        loop {
            let connective = match self.peek() {
                None | Some(QueryToken::Or) | Some(QueryToken::CloseParen) => break,
                Some(QueryToken::And) => {
                    self.advance();
                    Connective::And
                }
                Some(_) => Connective::Implicit,
            };
            rest.push((connective, self.parse_unary()?));
        }

        Ok(Node::join(first, rest))
    }

    /// Parses unary expressions: `"-" unary | primary`
    fn parse_unary(&mut self) -> FilterResult<Node> {
        if self.check(&QueryToken::Not) {
            self.advance();
            return Ok(self.parse_unary()?.negate());
        }

        self.parse_primary()
    }

    /// Parses primary expressions: `"(" or_expr ")" | condition | bare`
    fn parse_primary(&mut self) -> FilterResult<Node> {
        let PositionedToken { token, position } = self
            .advance()
            .cloned()
            .ok_or(FilterError::UnexpectedEndOfInput)?;

        match token {
            QueryToken::OpenParen => {
                let inner = self.parse_or_expr()?;
                if !self.check(&QueryToken::CloseParen) {
                    return Err(FilterError::UnclosedParenthesis);
                }
                self.advance();
                Ok(inner)
            }

            QueryToken::Comparison {
                field,
                operator,
                value,
            } => parse_condition(&field, operator, &value).map(Node::Condition),

            QueryToken::Word(text) | QueryToken::Quoted(text) => Ok(Node::Condition(Condition {
                field: FieldId::Name,
                operator: Operator::Colon,
                negated: false,
                value: Value::Text(text),
            })),

            other @ (QueryToken::And
            | QueryToken::Or
            | QueryToken::Not
            | QueryToken::CloseParen) => Err(FilterError::unexpected_token(
                other.to_string(),
                position,
            )),
        }
    }
}

/// Resolves a single `field operator value` term.
fn parse_condition(field: &str, operator: Operator, raw: &str) -> FilterResult<Condition> {
    let field_id = FieldId::from_abbreviation(field).ok_or_else(|| FilterError::UnknownField {
        field: field.to_string(),
        suggestion: FieldId::suggest(field).map(str::to_string),
    })?;

    if !field_id.operators().contains(&operator) {
        return Err(FilterError::UnsupportedOperator {
            field: field_id.name().to_string(),
            operator: operator.to_string(),
        });
    }

    if raw.is_empty() {
        return Err(FilterError::MissingValue {
            field: field_id.name().to_string(),
        });
    }

    Ok(Condition {
        field: field_id,
        operator,
        negated: false,
        value: parse_value(field_id, raw)?,
    })
}
