//! dedupe command - Remove items with near-duplicate names

use std::path::Path;

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::store;
use crate::tools::dedupe::DedupePlan;
use crate::tools::{rewrite, RewriteOptions};
use crate::ui::{output, prompts};

/// Plan, show, confirm, then remove duplicates.
///
/// The plan is rebuilt under the file lock, so concurrent edits between
/// the preview and the write cannot cause the wrong items to go.
pub fn dedupe(ctx: &Context, file: &Path, dry_run: bool, yes: bool, no_backup: bool) -> Result<()> {
    let verbosity = ctx.verbosity();
    let path = ctx.resolve(file);

    let preview = DedupePlan::build(&store::load_with(&path, &ctx.config.palette())?);
    if preview.is_empty() {
        output::print("No duplicates found.", verbosity);
        return Ok(());
    }

    for group in &preview.groups {
        println!("keep   {}", group.keep);
        println!("{}", output::format_list(&group.remove, "remove "));
    }

    if dry_run {
        output::print(
            format!("Would remove {} items (dry run).", preview.removal_count()),
            verbosity,
        );
        return Ok(());
    }

    if !yes {
        let message = format!("Remove {} items?", preview.removal_count());
        if !prompts::confirm(&message, false, ctx.interactive)? {
            output::print("Aborted.", verbosity);
            return Ok(());
        }
    }

    let options = RewriteOptions {
        backup: !no_backup,
        backup_dir: ctx.config.backup_dir().map(Path::to_path_buf),
        pretty: ctx.config.pretty(),
        palette: ctx.config.palette(),
    };
    let result = rewrite(&path, &options, |doc| DedupePlan::build(doc).apply(doc))
        .with_context(|| format!("Failed to update {}", path.display()))?;

    output::print(format!("Removed {} items", result.value), verbosity);
    if let Some(backup) = result.backup {
        output::print(format!("Backup written to {}", backup.display()), verbosity);
    }
    Ok(())
}
