//! Field table output formatting.

use cardquery::filter::FieldId;
use owo_colors::OwoColorize;
use serde::Serialize;

/// JSON output structure for one field.
#[derive(Serialize)]
pub struct FieldOutput {
    pub name: &'static str,
    pub aliases: Vec<&'static str>,
    pub value: &'static str,
    pub operators: Vec<&'static str>,
}

impl From<FieldId> for FieldOutput {
    fn from(field: FieldId) -> Self {
        Self {
            name: field.name(),
            aliases: field.aliases().collect(),
            value: field.value_kind().name(),
            operators: field.operators().iter().map(|op| op.as_str()).collect(),
        }
    }
}

/// Formats the field table as JSON.
pub fn format_fields_json(fields: &[FieldId]) -> Result<String, serde_json::Error> {
    let output: Vec<FieldOutput> = fields.iter().copied().map(FieldOutput::from).collect();
    serde_json::to_string_pretty(&output)
}

/// Formats the field table for the terminal.
pub fn format_fields_table(fields: &[FieldId], use_colors: bool) -> String {
    let mut output = String::new();

    let header = format!(
        "{:<12} {:<11} {:<24} {}",
        "Field", "Value", "Operators", "Aliases"
    );
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for field in fields {
        let row = FieldOutput::from(*field);
        let name = format!("{:<12}", row.name);
        let name = if use_colors {
            name.bold().to_string()
        } else {
            name
        };
        output.push_str(&format!(
            "{} {:<11} {:<24} {}\n",
            name,
            row.value,
            row.operators.join(" "),
            row.aliases.join(", ")
        ));
    }

    output
}
