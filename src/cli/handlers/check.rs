//! Check command handler.

use anyhow::{Context, Result, bail};
use std::io::Write;
use std::path::Path;

use super::open_kasten;

pub fn handle_check(home: &Path, out: &mut impl Write) -> Result<()> {
    let kasten = open_kasten(home)?;
    let issues = kasten.check().context("failed to check index")?;

    if issues.is_empty() {
        writeln!(out, "Index OK.")?;
        return Ok(());
    }

    for issue in &issues {
        writeln!(out, "error: {}", issue)?;
    }
    writeln!(out, "\nFound {} issue(s)", issues.len())?;

    bail!("check failed");
}
