//! Parse tree output formatting for the explain command.

use cardquery::filter::{CardFilter, Connective, Node};
use owo_colors::OwoColorize;
use serde::Serialize;

use super::helpers::format_value;

/// JSON output structure for the explain command.
#[derive(Serialize)]
pub struct ExplainOutput<'a> {
    pub query: &'a str,
    pub fields_used: Vec<&'static str>,
    pub tree: NodeOutput,
}

/// JSON output structure for one parse tree node.
#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeOutput {
    Condition {
        field: &'static str,
        operator: &'static str,
        negated: bool,
        value: String,
    },
    Group {
        negated: bool,
        members: Vec<MemberOutput>,
    },
}

/// A group member with the connective joining it to the members before it.
#[derive(Serialize)]
pub struct MemberOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connective: Option<&'static str>,
    pub node: NodeOutput,
}

impl From<&Node> for NodeOutput {
    fn from(node: &Node) -> Self {
        match node {
            Node::Condition(condition) => NodeOutput::Condition {
                field: condition.field.name(),
                operator: condition.operator.as_str(),
                negated: condition.negated,
                value: format_value(&condition.value),
            },
            Node::Group(group) => {
                let mut members = vec![MemberOutput {
                    connective: None,
                    node: NodeOutput::from(group.first.as_ref()),
                }];
                members.extend(group.rest.iter().map(|(connective, node)| MemberOutput {
                    connective: Some(connective_name(*connective)),
                    node: NodeOutput::from(node),
                }));
                NodeOutput::Group {
                    negated: group.negated,
                    members,
                }
            }
        }
    }
}

fn connective_name(connective: Connective) -> &'static str {
    if connective.is_and() {
        "and"
    } else {
        "or"
    }
}

/// Formats a compiled filter's parse tree as JSON.
pub fn format_explain_json(filter: &CardFilter) -> Result<String, serde_json::Error> {
    let output = ExplainOutput {
        query: filter.stringify(),
        fields_used: filter.fields_used().iter().map(|f| f.name()).collect(),
        tree: NodeOutput::from(filter.query()),
    };

    serde_json::to_string_pretty(&output)
}

/// Formats a compiled filter's parse tree as an indented outline.
pub fn format_explain_text(filter: &CardFilter, use_colors: bool) -> String {
    let mut output = String::new();

    let label = |text: &str| {
        if use_colors {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    };

    output.push_str(&format!("{} {}\n", label("Query:"), filter.stringify()));
    let fields: Vec<&str> = filter.fields_used().iter().map(|f| f.name()).collect();
    output.push_str(&format!("{} {}\n", label("Fields:"), fields.join(", ")));
    output.push_str(&format!("{}\n", label("Tree:")));
    write_node(&mut output, filter.query(), None, 1, use_colors);

    output
}

fn write_node(
    output: &mut String,
    node: &Node,
    connective: Option<Connective>,
    depth: usize,
    use_colors: bool,
) {
    let indent = "  ".repeat(depth);
    let prefix = match connective {
        Some(connective) => {
            let word = connective_name(connective).to_uppercase();
            if use_colors {
                format!("{} ", word.dimmed())
            } else {
                format!("{word} ")
            }
        }
        None => String::new(),
    };

    match node {
        Node::Condition(condition) => {
            let not = if condition.negated { "NOT " } else { "" };
            let text = format!(
                "{}{} {} {}",
                not,
                condition.field,
                condition.operator,
                format_value(&condition.value)
            );
            let text = if use_colors {
                text.cyan().to_string()
            } else {
                text
            };
            output.push_str(&format!("{indent}{prefix}{text}\n"));
        }
        Node::Group(group) => {
            let not = if group.negated { "NOT " } else { "" };
            output.push_str(&format!("{indent}{prefix}{not}group\n"));
            write_node(output, &group.first, None, depth + 1, use_colors);
            for (connective, member) in &group.rest {
                write_node(output, member, Some(*connective), depth + 1, use_colors);
            }
        }
    }
}
