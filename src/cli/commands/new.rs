//! new command - Create a tierlist file

use std::path::Path;

use anyhow::{bail, Result};

use crate::cli::Context;
use crate::core::model::Document;
use crate::core::store;
use crate::core::types::RowName;
use crate::ui::output;

/// Create a new document with config defaults.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `file` - File to create
/// * `title` - Title (defaults to config `default_title`)
/// * `rows` - Row names (defaults to config `default_rows`)
/// * `force` - Overwrite an existing file
pub fn new(
    ctx: &Context,
    file: &Path,
    title: Option<&str>,
    rows: Option<Vec<String>>,
    force: bool,
) -> Result<()> {
    let path = ctx.resolve(file);
    if path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    let rows = rows.unwrap_or_else(|| ctx.config.default_rows());
    for name in &rows {
        RowName::new(name.as_str())?;
    }
    let title = title.unwrap_or_else(|| ctx.config.default_title());

    let doc = Document::with_rows(title, &rows, &ctx.config.palette());
    store::save(&path, &doc, ctx.config.pretty())?;

    output::print(
        format!("Created {} with {} rows", path.display(), doc.rows.len()),
        ctx.verbosity(),
    );
    Ok(())
}
