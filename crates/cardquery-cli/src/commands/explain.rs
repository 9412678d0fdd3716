//! Explain command implementation.
//!
//! Prints the parse tree, the fields used and the round-trip text of a query.

use cardquery::{make_filter, FilterError};

use super::{CommandContext, Result};
use crate::output::{format_explain_json, format_explain_text};

/// Executes the explain command.
///
/// # Errors
///
/// Returns an error if the query is blank or invalid.
pub fn execute(ctx: &CommandContext, query: &str) -> Result<()> {
    let filter = make_filter(query)?.ok_or(FilterError::EmptyExpression)?;

    if ctx.json_output {
        let output = format_explain_json(&filter)?;
        println!("{output}");
    } else if !ctx.quiet {
        let output = format_explain_text(&filter, ctx.use_colors);
        print!("{output}");
    }

    Ok(())
}
