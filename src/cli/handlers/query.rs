//! Filter and tags command handlers.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use super::open_kasten;
use crate::cli::config::Config;
use crate::cli::output::{FilterListing, Output, OutputFormat, TagStatsListing};
use crate::cli::{FilterArgs, TagsArgs};
use crate::domain::{SeekPositions, TagQuery};
use crate::kasten::KastenError;

pub fn handle_filter(
    args: &FilterArgs,
    home: &Path,
    config: &Config,
    out: &mut impl Write,
) -> Result<()> {
    let query = TagQuery::parse(&args.query);
    let seek = match &args.seek {
        Some(token) => SeekPositions::from_json(token).map_err(KastenError::from)?,
        None => SeekPositions::new(),
    };
    let max = args.max.unwrap_or_else(|| config.filter_max());

    let mut kasten = open_kasten(home)?;
    let page = kasten
        .filter(&query, &seek, max)
        .with_context(|| format!("failed to filter by '{}'", query))?;

    match args.format {
        OutputFormat::Human => {
            if page.names().is_empty() {
                writeln!(out, "No notes found.")?;
            }
            for name in page.names() {
                writeln!(out, "{}", name)?;
            }
            if !page.is_exhausted() {
                writeln!(out)?;
                writeln!(out, "next: {}", page.next_seek().to_json())?;
            }
        }
        OutputFormat::Json => {
            let out_data = Output::new(FilterListing::from(&page));
            writeln!(out, "{}", serde_json::to_string_pretty(&out_data)?)?;
        }
    }
    Ok(())
}

pub fn handle_tags(
    args: &TagsArgs,
    home: &Path,
    config: &Config,
    out: &mut impl Write,
) -> Result<()> {
    let limit = args.limit.unwrap_or_else(|| config.stats_limit());

    let kasten = open_kasten(home)?;
    let page = kasten
        .tags_stats(args.seek.as_deref(), limit)
        .context("failed to list tags")?;

    match args.format {
        OutputFormat::Human => {
            if page.is_empty() {
                writeln!(out, "No tags found.")?;
            }
            for t in page.stats() {
                writeln!(out, "{} ({})", t.tag(), t.count())?;
            }
            // A short page means the listing is complete.
            if page.stats().len() == limit
                && let Some(last) = page.last_key()
            {
                writeln!(out)?;
                writeln!(out, "next: {}", last)?;
            }
        }
        OutputFormat::Json => {
            let out_data = Output::new(TagStatsListing::from(&page));
            writeln!(out, "{}", serde_json::to_string_pretty(&out_data)?)?;
        }
    }
    Ok(())
}
