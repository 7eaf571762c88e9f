//! Put, read and attr command handlers.

use anyhow::{Context, Result};
use std::io::{Read, Write};
use std::path::Path;

use super::open_kasten;
use crate::cli::output::{AttributeListing, Output, OutputFormat};
use crate::cli::{AttrArgs, PutArgs, ReadArgs};

pub fn handle_put(args: &PutArgs, home: &Path, out: &mut impl Write) -> Result<()> {
    let content = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read note from stdin")?;
            buf
        }
    };

    let mut kasten = open_kasten(home)?;
    let delta = kasten
        .put_note(&args.name, &content)
        .with_context(|| format!("failed to save note '{}'", args.name))?;

    write!(out, "Saved {}", args.name)?;
    for tag in delta.added() {
        write!(out, " +{}", tag)?;
    }
    for tag in delta.removed() {
        write!(out, " -{}", tag)?;
    }
    writeln!(out)?;
    Ok(())
}

pub fn handle_read(args: &ReadArgs, home: &Path, out: &mut impl Write) -> Result<()> {
    let kasten = open_kasten(home)?;
    let content = kasten
        .read_note(&args.name)
        .with_context(|| format!("failed to read note '{}'", args.name))?;

    out.write_all(content.as_bytes())?;
    Ok(())
}

pub fn handle_attr(args: &AttrArgs, home: &Path, out: &mut impl Write) -> Result<()> {
    let kasten = open_kasten(home)?;
    let attribute = kasten
        .attribute(&args.name)
        .with_context(|| format!("failed to look up note '{}'", args.name))?;
    let listing = AttributeListing::new(&args.name, &attribute);

    match args.format {
        OutputFormat::Human => {
            writeln!(out, "Name: {}", listing.name)?;
            if listing.tags.is_empty() {
                writeln!(out, "Tags: (none)")?;
            } else {
                writeln!(out, "Tags: {}", listing.tags.join(", "))?;
            }
            writeln!(out, "Created: {}", listing.created_at.to_rfc3339())?;
            writeln!(out, "Updated: {}", listing.updated_at.to_rfc3339())?;
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&Output::new(listing))?)?;
        }
    }
    Ok(())
}
