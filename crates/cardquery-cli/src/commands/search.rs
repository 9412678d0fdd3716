//! Search command implementation.
//!
//! Loads the card catalog and prints the cards matching a filter query.

use std::path::{Path, PathBuf};

use cardquery::filter::filter_cards;
use cardquery::{make_filter, CatalogStore};
use cardquery_model::Card;
use tracing::debug;

use super::config::Config;
use super::{CommandContext, Result};
use crate::output::{format_cards_json, format_cards_table, SearchPage};

/// Cards shown when neither `--limit` nor the config sets a limit.
const DEFAULT_LIMIT: usize = 50;

/// Options for the search command.
#[derive(Debug)]
pub struct SearchOptions {
    /// Filter query; blank lists every card.
    pub query: String,
    /// Catalog file from `--catalog` or `CQ_CATALOG`.
    pub catalog: Option<PathBuf>,
    /// Limit from `--limit`.
    pub limit: Option<usize>,
    /// Show all matching cards (no limit).
    pub all: bool,
}

/// Executes the search command.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the query is invalid.
pub fn execute(ctx: &CommandContext, opts: &SearchOptions, config: &Config) -> Result<()> {
    // Compile first so a bad query fails without touching the catalog.
    let filter = make_filter(&opts.query)?;

    let path = resolve_catalog_path(opts.catalog.as_deref(), config)?;
    let cards = CatalogStore::with_path(&path).load()?;

    let matched = filter_cards(&cards, filter.as_ref());
    let total = matched.len();
    let shown = apply_limit(matched, effective_limit(opts, config));
    debug!(
        catalog = %path.display(),
        total,
        shown = shown.len(),
        "Search complete"
    );

    let page = SearchPage {
        query: filter.as_ref().map_or("", |f| f.stringify()),
        fields_used: filter
            .as_ref()
            .map(|f| f.fields_used().iter().map(|field| field.name()).collect())
            .unwrap_or_default(),
        total,
        cards: &shown,
    };

    if ctx.json_output {
        let output = format_cards_json(&page)?;
        println!("{output}");
    } else if !ctx.quiet {
        let output = format_cards_table(&page, ctx.use_colors);
        print!("{output}");
    }

    Ok(())
}

/// Resolves the catalog file with priority: flag/env > config > data directory.
///
/// clap already folds `CQ_CATALOG` into the flag value.
pub fn resolve_catalog_path(flag: Option<&Path>, config: &Config) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = &config.catalog {
        return Ok(path.clone());
    }
    Ok(CatalogStore::default_path()?)
}

/// The number of cards to show, or `None` for all of them.
fn effective_limit(opts: &SearchOptions, config: &Config) -> Option<usize> {
    if opts.all {
        return None;
    }
    Some(opts.limit.or(config.output.limit).unwrap_or(DEFAULT_LIMIT))
}

/// Applies the limit to the matched cards.
fn apply_limit(cards: Vec<&Card>, limit: Option<usize>) -> Vec<&Card> {
    match limit {
        Some(limit) => cards.into_iter().take(limit).collect(),
        None => cards,
    }
}
