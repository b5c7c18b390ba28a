//! row command - Add, remove, rename or recolor rows

use anyhow::{anyhow, Result};

use super::{open_session, save_session};
use crate::cli::args::RowAction;
use crate::cli::Context;
use crate::ui::{output, prompts};

pub fn row(ctx: &Context, action: RowAction) -> Result<()> {
    let verbosity = ctx.verbosity();

    match action {
        RowAction::Add { file, name, at } => {
            let (path, mut session) = open_session(ctx, &file)?;
            let at = at.unwrap_or(session.document().rows.len());
            let index = session.add_row(at, &name)?;
            save_session(ctx, &path, &mut session)?;
            output::print(format!("Added row {name:?} at {index}"), verbosity);
        }
        RowAction::Remove { file, index, yes } => {
            let (path, mut session) = open_session(ctx, &file)?;
            let row = session.document().rows.get(index).ok_or_else(|| {
                anyhow!(
                    "row {index} does not exist (document has {} rows)",
                    session.document().rows.len()
                )
            })?;

            // Only ask when items would be displaced.
            if !yes && !row.items.is_empty() {
                let message = format!(
                    "Row {:?} holds {} items; move them to untiered and remove the row?",
                    row.name.as_str(),
                    row.items.len()
                );
                if !prompts::confirm(&message, false, ctx.interactive)? {
                    output::print("Aborted.", verbosity);
                    return Ok(());
                }
            }

            let moved = session.remove_row(index)?;
            save_session(ctx, &path, &mut session)?;
            output::print(
                format!("Removed row {index}; {moved} items moved to untiered"),
                verbosity,
            );
        }
        RowAction::Rename { file, index, name } => {
            let (path, mut session) = open_session(ctx, &file)?;
            session.rename_row(index, &name)?;
            save_session(ctx, &path, &mut session)?;
            output::print(format!("Renamed row {index} to {name:?}"), verbosity);
        }
        RowAction::Recolor { file, index, color } => {
            let (path, mut session) = open_session(ctx, &file)?;
            session.recolor_row(index, &color)?;
            save_session(ctx, &path, &mut session)?;
            output::print(format!("Row {index} is now {color}"), verbosity);
        }
    }

    Ok(())
}
