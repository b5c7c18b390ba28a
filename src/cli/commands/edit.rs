//! title command - Set the document title

use std::path::Path;

use anyhow::Result;

use super::{open_session, save_session};
use crate::cli::Context;
use crate::ui::output;

pub fn title(ctx: &Context, file: &Path, title: &str) -> Result<()> {
    let (path, mut session) = open_session(ctx, file)?;
    if session.document().title == title {
        output::print("Title unchanged.", ctx.verbosity());
        return Ok(());
    }
    session.set_title(title);
    save_session(ctx, &path, &mut session)?;
    output::print(format!("Title set to {title:?}"), ctx.verbosity());
    Ok(())
}
