//! Parse tree for filter queries.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use super::categories::Category;
use super::error::FilterError;
use super::fields::FieldId;

/// A comparison operator between a field and its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `:`
    Colon,
    /// `=`
    Equal,
    /// `!=`
    NotEqual,
    /// `<>`
    LessGreater,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
}

impl Operator {
    /// The operator as written in a query.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Colon => ":",
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::LessGreater => "<>",
            Operator::Less => "<",
            Operator::LessEqual => "<=",
            Operator::Greater => ">",
            Operator::GreaterEqual => ">=",
        }
    }

    /// Returns true for the two inequality operators.
    pub fn is_negative(self) -> bool {
        matches!(self, Operator::NotEqual | Operator::LessGreater)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            ":" => Operator::Colon,
            "=" => Operator::Equal,
            "!=" => Operator::NotEqual,
            "<>" => Operator::LessGreater,
            "<" => Operator::Less,
            "<=" => Operator::LessEqual,
            ">" => Operator::Greater,
            ">=" => Operator::GreaterEqual,
            other => return Err(FilterError::unexpected_token(other, 0)),
        })
    }
}

/// How a group member joins the members before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    /// Juxtaposition, which means AND.
    Implicit,
    /// The `and` keyword.
    And,
    /// The `or` keyword.
    Or,
}

impl Connective {
    /// Returns true when the connective folds with logical AND.
    pub fn is_and(self) -> bool {
        matches!(self, Connective::Implicit | Connective::And)
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connective::Implicit => Ok(()),
            Connective::And => f.write_str("and"),
            Connective::Or => f.write_str("or"),
        }
    }
}

/// A typed condition value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    /// A number with at most one `.5` fraction.
    HalfInteger(f64),
    Dollars(f64),
    Text(String),
    /// Uppercase color codes (`["W", "U"]`).
    Colors(Vec<String>),
    /// A number of colors.
    Count(usize),
    /// Normalized cost groups (`[["2"], ["w", "u"]]`).
    ManaCost(Vec<Vec<String>>),
    /// Pool symbols in the order typed (`["2", "w", "w"]`).
    ManaPool(Vec<String>),
    Rarity(String),
    Status(String),
    Finish(String),
    Date(NaiveDate),
    Category(Category),
    /// Another numeric field, for comparisons such as `pow>tou`.
    Field(FieldId),
    Identifier(String),
}

/// A single `field operator value` test.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: FieldId,
    pub operator: Operator,
    pub negated: bool,
    pub value: Value,
}

/// An ordered sequence of nodes joined by connectives.
///
/// The first member seeds the result; each following member is folded in
/// left to right with its connective.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub negated: bool,
    pub first: Box<Node>,
    pub rest: Vec<(Connective, Node)>,
}

/// A node of the parse tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Condition(Condition),
    Group(Group),
}

impl Node {
    /// Returns the node with its negation flag flipped.
    pub fn negate(self) -> Self {
        match self {
            Node::Condition(mut condition) => {
                condition.negated = !condition.negated;
                Node::Condition(condition)
            }
            Node::Group(mut group) => {
                group.negated = !group.negated;
                Node::Group(group)
            }
        }
    }

    /// Joins nodes that share one connective into a group. A single node is
    /// returned unchanged.
    pub fn join(first: Node, rest: Vec<(Connective, Node)>) -> Self {
        if rest.is_empty() {
            return first;
        }
        Node::Group(Group {
            negated: false,
            first: Box::new(first),
            rest,
        })
    }

    /// Every field referenced anywhere in the tree, in first-appearance order
    /// and without duplicates.
    pub fn fields_used(&self) -> Vec<FieldId> {
        let mut fields = Vec::new();
        self.collect_fields(&mut fields);
        fields
    }

    fn collect_fields(&self, fields: &mut Vec<FieldId>) {
        match self {
            Node::Condition(condition) => {
                let mut push = |field: FieldId| {
                    if !fields.contains(&field) {
                        fields.push(field);
                    }
                };
                push(condition.field);
                if let Value::Field(other) = &condition.value {
                    push(*other);
                }
            }
            Node::Group(group) => {
                group.first.collect_fields(fields);
                for (_, node) in &group.rest {
                    node.collect_fields(fields);
                }
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Condition(condition) => {
                if condition.negated {
                    f.write_str("NOT ")?;
                }
                write!(
                    f,
                    "{} {} {:?}",
                    condition.field, condition.operator, condition.value
                )
            }
            Node::Group(group) => {
                if group.negated {
                    f.write_str("NOT ")?;
                }
                write!(f, "({}", group.first)?;
                for (connective, node) in &group.rest {
                    let word = if connective.is_and() { "AND" } else { "OR" };
                    write!(f, " {word} {node}")?;
                }
                f.write_str(")")
            }
        }
    }
}
