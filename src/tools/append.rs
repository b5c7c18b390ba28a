//! tools::append
//!
//! Turn images (downloaded or local) into untiered items.
//!
//! Images are embedded byte-for-byte as base64 data URIs; nothing is
//! resized or re-encoded.

use std::path::Path;

use log::warn;
use reqwest::Url;

use crate::core::model::{Document, Item};
use crate::core::types::ImageSource;
use crate::remote::image::{download_image, ImageError};
use crate::remote::Fetcher;

/// Results of downloading a batch of images.
#[derive(Debug, Default)]
pub struct Downloads {
    /// Successfully converted items, in request order.
    pub items: Vec<Item>,
    /// URLs that failed and why.
    pub failed: Vec<(Url, ImageError)>,
}

/// Download every URL; one failure does not stop the rest.
///
/// `name` applies only when a single URL is given; otherwise names come
/// from the URLs.
pub async fn download_all(fetcher: &dyn Fetcher, urls: &[Url], name: Option<&str>) -> Downloads {
    let name = if urls.len() == 1 { name } else { None };
    let mut downloads = Downloads::default();
    for url in urls {
        match download_image(fetcher, url, name).await {
            Ok(item) => downloads.items.push(item),
            Err(err) => {
                warn!("skipping {url}: {err}");
                downloads.failed.push((url.clone(), err));
            }
        }
    }
    downloads
}

/// Read a local image file into an item named after the file stem.
pub fn item_from_file(path: &Path, name: Option<&str>) -> std::io::Result<Item> {
    let source = ImageSource::from_file(path)?;
    let name = match name {
        Some(name) => name.to_string(),
        None => path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };
    Ok(Item::new(source, name))
}

/// Append items to the end of the untiered pool; returns how many.
pub fn append_untiered(doc: &mut Document, items: Vec<Item>) -> usize {
    let count = items.len();
    doc.untiered.items.extend(items);
    count
}
