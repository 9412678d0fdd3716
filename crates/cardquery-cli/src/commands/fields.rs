//! Fields command implementation.
//!
//! Lists every field a query can test, with its aliases, value kind and
//! accepted operators.

use cardquery::filter::FieldId;

use super::{CommandContext, Result};
use crate::output::{format_fields_json, format_fields_table};

/// Executes the fields command.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let fields = FieldId::all();

    if ctx.json_output {
        let output = format_fields_json(&fields)?;
        println!("{output}");
    } else if !ctx.quiet {
        let output = format_fields_table(&fields, ctx.use_colors);
        print!("{output}");
    }

    Ok(())
}
