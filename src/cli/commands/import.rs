//! import command - Fetch a tierlist published at a URL

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Result};

use super::fetcher;
use crate::cli::Context;
use crate::core::model::Document;
use crate::core::{schema, store};
use crate::engine::{ImportOutcome, Session};
use crate::remote::import::{fetch_document, import_url_from_page, parse_import_url};
use crate::ui::{output, prompts};

/// Import the document at `url`.
///
/// `url` may be the document URL itself or a page URL carrying it in a
/// `url` query parameter. A malformed URL is reported and ignored.
pub fn import(ctx: &Context, url: &str, out: Option<&Path>, force: bool) -> Result<()> {
    let verbosity = ctx.verbosity();
    let Some(url) = import_url_from_page(url).or_else(|| parse_import_url(url)) else {
        output::warn(format!("{url:?} is not an http(s) URL; nothing imported"), verbosity);
        return Ok(());
    };

    let out = out.map(|path| ctx.resolve(path));
    if let Some(path) = &out {
        if path.exists() && !force {
            let message = format!("{} exists. Overwrite?", path.display());
            if !prompts::confirm(&message, false, ctx.interactive)? {
                output::print("Aborted.", verbosity);
                return Ok(());
            }
        }
    }

    let fetcher = fetcher(ctx)?;
    let rt = tokio::runtime::Runtime::new()?;

    let mut session = Session::new(Document::default(), ctx.config.palette());
    let ticket = session.begin_import();
    let result = rt.block_on(fetch_document(&fetcher, &url));

    match session.finish_import(ticket, result) {
        ImportOutcome::Applied => {}
        ImportOutcome::Stale => bail!("Import of {url} was superseded"),
        ImportOutcome::Failed(err) => return Err(err.into()),
    }

    let doc = session.into_document();
    match out {
        Some(path) => {
            store::save(&path, &doc, ctx.config.pretty())?;
            output::print(
                format!(
                    "Imported {:?} ({} items) to {}",
                    doc.title,
                    doc.item_count(),
                    path.display()
                ),
                verbosity,
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", schema::serialize_pretty(&doc)?)?;
        }
    }
    Ok(())
}
