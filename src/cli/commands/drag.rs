//! drag command - Move or delete one item through the drag engine
//!
//! The gesture is replayed exactly: pick up `from`, hover `to`, release.
//! With `--dry-run` the pointer is never released; the insertion marker is
//! drawn and nothing is written.

use std::path::Path;

use anyhow::Result;

use super::{open_session, save_session};
use crate::cli::Context;
use crate::engine::{DropOutcome, DropSurface, ItemSlot, NoOpReason};
use crate::ui::output;
use crate::ui::render::{render_with, RenderOptions};

/// Drag the item at `from` and drop it on `to`.
pub fn drag(
    ctx: &Context,
    file: &Path,
    from: ItemSlot,
    to: DropSurface,
    dry_run: bool,
) -> Result<()> {
    let (path, mut session) = open_session(ctx, file)?;
    let verbosity = ctx.verbosity();

    let item = session.begin_drag(from)?;
    session.hover(to);

    if dry_run {
        let options = RenderOptions {
            marker: session.drag_marker(),
            grabbed: Some(item),
            indices: true,
        };
        println!("{}", render_with(session.document(), &options));
        if to == DropSurface::Trash {
            output::print("Dropping here would delete the item.", verbosity);
        } else if session.drag_marker().is_none() {
            output::warn(format!("{to} is not a drop target"), verbosity);
        }
        session.cancel_drag();
        return Ok(());
    }

    match session.drop() {
        DropOutcome::Moved { from, to, .. } => {
            output::print(
                format!("Moved {from} to {}[{}]", to.container, to.index),
                verbosity,
            );
        }
        DropOutcome::Deleted { item, from } => {
            let name = if item.name.is_empty() {
                "<unnamed>"
            } else {
                item.name.as_str()
            };
            output::print(format!("Deleted {name} from {from}"), verbosity);
        }
        DropOutcome::Unchanged => {
            output::print("Item is already there; nothing changed.", verbosity);
        }
        DropOutcome::NoOp(NoOpReason::NoSurface | NoOpReason::InvalidSurface) => {
            output::warn(
                format!("{to} is not a drop target; nothing changed"),
                verbosity,
            );
        }
        DropOutcome::NoOp(reason) => {
            output::warn(format!("Nothing changed ({reason:?})"), verbosity);
        }
    }

    save_session(ctx, &path, &mut session)?;
    Ok(())
}
