//! show command - Print a tierlist

use std::path::Path;

use anyhow::Result;

use crate::cli::Context;
use crate::core::{schema, store};
use crate::ui::render::{render_with, RenderOptions};

/// Print the document as text, or as JSON with `json`.
///
/// Output is the command's result, so it is printed even with `--quiet`.
pub fn show(ctx: &Context, file: &Path, indices: bool, json: bool) -> Result<()> {
    let doc = store::load_with(&ctx.resolve(file), &ctx.config.palette())?;

    if json {
        println!("{}", schema::serialize_pretty(&doc)?);
    } else {
        let options = RenderOptions {
            indices,
            ..Default::default()
        };
        println!("{}", render_with(&doc, &options));
    }
    Ok(())
}
