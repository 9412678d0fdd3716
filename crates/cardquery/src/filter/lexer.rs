//! Lexer (tokenizer) for filter queries.

use std::iter::Peekable;
use std::str::CharIndices;

use super::ast::Operator;
use super::error::{FilterError, FilterResult};

/// A token with its position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedToken {
    /// The token.
    pub token: QueryToken,
    /// The byte position where the token starts (0-indexed).
    pub position: usize,
}

/// A token in a filter query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryToken {
    /// A `field<op>value` term, written without whitespace around the
    /// operator. The value may be empty.
    Comparison {
        field: String,
        operator: Operator,
        value: String,
    },

    /// A bare word.
    Word(String),

    /// A quoted string.
    Quoted(String),

    /// The `and` keyword.
    And,

    /// The `or` keyword.
    Or,

    /// Prefix negation `-`.
    Not,

    /// Opening parenthesis `(`.
    OpenParen,

    /// Closing parenthesis `)`.
    CloseParen,
}

impl std::fmt::Display for QueryToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryToken::Comparison {
                field,
                operator,
                value,
            } => write!(f, "{field}{operator}{value}"),
            QueryToken::Word(word) => f.write_str(word),
            QueryToken::Quoted(text) => write!(f, "\"{text}\""),
            QueryToken::And => f.write_str("and"),
            QueryToken::Or => f.write_str("or"),
            QueryToken::Not => f.write_str("-"),
            QueryToken::OpenParen => f.write_str("("),
            QueryToken::CloseParen => f.write_str(")"),
        }
    }
}

/// Lexer for tokenizing filter queries.
pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input string.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Byte offset of the next character, or the input length at the end.
    fn offset(&mut self) -> usize {
        let len = self.input.len();
        self.chars.peek().map_or(len, |&(i, _)| i)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.chars.next();
        }
    }

    /// Reads a quoted string. Backslash escapes the next character.
    fn read_quoted(&mut self, quote: char) -> FilterResult<String> {
        self.chars.next(); // opening quote

        let mut result = String::new();
        loop {
            match self.chars.next() {
                None => return Err(FilterError::UnexpectedEndOfInput),
                Some((_, c)) if c == quote => return Ok(result),
                Some((_, '\\')) => match self.chars.next() {
                    Some((_, escaped)) => result.push(escaped),
                    None => return Err(FilterError::UnexpectedEndOfInput),
                },
                Some((_, c)) => result.push(c),
            }
        }
    }

    /// Returns true if the character can start an operator at this point.
    fn at_operator(&self) -> bool {
        let mut ahead = self.chars.clone();
        match ahead.next() {
            Some((_, ':' | '=' | '<' | '>')) => true,
            Some((_, '!')) => matches!(ahead.next(), Some((_, '='))),
            _ => false,
        }
    }

    fn read_operator(&mut self) -> Option<Operator> {
        let (_, first) = self.chars.next()?;
        let second = self.peek();
        let (operator, two_chars) = match (first, second) {
            (':', _) => (Operator::Colon, false),
            ('=', _) => (Operator::Equal, false),
            ('!', Some('=')) => (Operator::NotEqual, true),
            ('<', Some('>')) => (Operator::LessGreater, true),
            ('<', Some('=')) => (Operator::LessEqual, true),
            ('<', _) => (Operator::Less, false),
            ('>', Some('=')) => (Operator::GreaterEqual, true),
            ('>', _) => (Operator::Greater, false),
            _ => return None,
        };
        if two_chars {
            self.chars.next();
        }
        Some(operator)
    }

    /// Reads the value after an operator: a quoted string, or everything up
    /// to whitespace or a closing parenthesis.
    fn read_value(&mut self) -> FilterResult<String> {
        if let Some(quote @ ('"' | '\'')) = self.peek() {
            return self.read_quoted(quote);
        }
        let mut value = String::new();
        while let Some(c) = self.peek() {
            if c.is_whitespace() || c == ')' {
                break;
            }
            value.push(c);
            self.chars.next();
        }
        Ok(value)
    }

    /// Reads a word up to whitespace, a parenthesis, a double quote or an
    /// operator. Apostrophes inside a word are kept (`urza's`).
    fn read_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(c) = self.peek() {
            if c.is_whitespace() || matches!(c, '(' | ')' | '"') || self.at_operator() {
                break;
            }
            word.push(c);
            self.chars.next();
        }
        word
    }

    /// Tokenizes the entire input string.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::UnexpectedEndOfInput` for an unterminated quote
    /// and `FilterError::UnexpectedToken` for an operator with no field.
    pub fn tokenize(mut self) -> FilterResult<Vec<PositionedToken>> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            let position = self.offset();
            let Some(c) = self.peek() else {
                break;
            };

            let token = match c {
                '(' => {
                    self.chars.next();
                    QueryToken::OpenParen
                }
                ')' => {
                    self.chars.next();
                    QueryToken::CloseParen
                }
                // Words swallow inner dashes, so a dash here starts a term.
                '-' => {
                    self.chars.next();
                    QueryToken::Not
                }
                '"' | '\'' => QueryToken::Quoted(self.read_quoted(c)?),
                _ if self.at_operator() => {
                    let operator = self
                        .read_operator()
                        .map_or_else(String::new, |op| op.to_string());
                    return Err(FilterError::unexpected_token(operator, position));
                }
                _ => {
                    let word = self.read_word();
                    if self.at_operator() {
                        let operator = self
                            .read_operator()
                            .ok_or_else(|| FilterError::unexpected_token(&word, position))?;
                        let value = self.read_value()?;
                        QueryToken::Comparison {
                            field: word,
                            operator,
                            value,
                        }
                    } else if word.eq_ignore_ascii_case("and") {
                        QueryToken::And
                    } else if word.eq_ignore_ascii_case("or") {
                        QueryToken::Or
                    } else {
                        QueryToken::Word(word)
                    }
                }
            };

            tokens.push(PositionedToken { token, position });
        }

        Ok(tokens)
    }
}
