//! add-image / append-image commands - Put images into the untiered pool

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};

use super::{fetcher, open_session, save_session};
use crate::cli::Context;
use crate::remote::import::parse_import_url;
use crate::tools::append::{append_untiered, download_all, item_from_file};
use crate::tools::{rewrite, RewriteOptions};
use crate::ui::output;

/// Add local image files to the untiered pool.
///
/// Every file is read before the document is touched, so one unreadable
/// file leaves the document unchanged.
pub fn add_image(ctx: &Context, file: &Path, images: &[PathBuf], name: Option<&str>) -> Result<()> {
    let name = if images.len() == 1 { name } else { None };
    let items = images
        .iter()
        .map(|image| {
            let image = ctx.resolve(image);
            item_from_file(&image, name)
                .with_context(|| format!("Failed to read image {}", image.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let (path, mut session) = open_session(ctx, file)?;
    let added = session.add_items(items);
    save_session(ctx, &path, &mut session)?;

    output::print(format!("Added {added} images to untiered"), ctx.verbosity());
    Ok(())
}

/// Download images and append them to the file's untiered pool.
///
/// Failed downloads are reported and skipped. The command fails only when
/// nothing could be added.
pub fn append_image(
    ctx: &Context,
    file: &Path,
    urls: &[String],
    name: Option<&str>,
    no_backup: bool,
) -> Result<()> {
    let verbosity = ctx.verbosity();
    let path = ctx.resolve(file);

    let mut parsed = Vec::with_capacity(urls.len());
    for raw in urls {
        match parse_import_url(raw) {
            Some(url) => parsed.push(url),
            None => output::warn(format!("skipping {raw:?}: not an http(s) URL"), verbosity),
        }
    }
    if parsed.is_empty() {
        bail!("No valid image URLs given");
    }

    let fetcher = fetcher(ctx)?;
    let rt = tokio::runtime::Runtime::new()?;
    let downloads = rt.block_on(download_all(&fetcher, &parsed, name));

    for (url, err) in &downloads.failed {
        output::warn(format!("{url}: {err}"), verbosity);
    }
    if downloads.items.is_empty() {
        bail!("No images could be downloaded");
    }

    let options = RewriteOptions {
        backup: !no_backup,
        backup_dir: ctx.config.backup_dir().map(Path::to_path_buf),
        pretty: ctx.config.pretty(),
        palette: ctx.config.palette(),
    };
    let items = downloads.items;
    let result = rewrite(&path, &options, |doc| append_untiered(doc, items))
        .with_context(|| format!("Failed to update {}", path.display()))?;

    output::print(
        format!("Appended {} images to {}", result.value, path.display()),
        verbosity,
    );
    if let Some(backup) = result.backup {
        output::print(format!("Backup written to {}", backup.display()), verbosity);
    }
    Ok(())
}
