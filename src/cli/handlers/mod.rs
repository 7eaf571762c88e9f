//! Command handlers for the CLI.

mod check;
mod notes;
mod query;


use anyhow::{Context, Result};
use std::path::Path;

use crate::kasten::Kasten;

pub use check::handle_check;
pub use notes::{handle_attr, handle_put, handle_read};
pub use query::{handle_filter, handle_tags};

/// Opens the store at `home`, creating it on first use.
pub(crate) fn open_kasten(home: &Path) -> Result<Kasten> {
    Kasten::open(home).with_context(|| format!("failed to open store at {}", home.display()))
}
