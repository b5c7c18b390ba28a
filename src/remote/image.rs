//! remote::image
//!
//! Download an image and wrap it as an untiered item.
//!
//! The bytes are embedded as-is in a base64 data URI. The media type comes
//! from the file's magic bytes, falling back to the `Content-Type` header;
//! images that are neither webp, png, jpeg nor gif are refused.

use reqwest::Url;
use thiserror::Error;

use crate::core::model::Item;
use crate::core::types::{ImageSource, TypeError};

use super::traits::{Fetcher, RemoteError};

/// Errors from image download.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("failed to download image: {0}")]
    Network(#[from] RemoteError),

    #[error(transparent)]
    Unsupported(#[from] TypeError),
}

/// Display name for an image at `url`: the last path segment without its
/// extension.
///
/// ```
/// use reqwest::Url;
/// use tierlist::remote::image::name_from_url;
///
/// let url = Url::parse("https://cdn.example/logos/Pizza%20Hut.png?v=2").unwrap();
/// assert_eq!(name_from_url(&url), "Pizza Hut");
/// ```
pub fn name_from_url(url: &Url) -> String {
    let segment = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();
    let decoded = percent_decode(segment);
    match decoded.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => decoded,
    }
}

fn percent_decode(segment: &str) -> String {
    let bytes = segment.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let escaped = (bytes[i] == b'%')
            .then(|| segment.get(i + 1..i + 3))
            .flatten()
            .and_then(|hex| u8::from_str_radix(hex, 16).ok());
        match escaped {
            Some(byte) => {
                out.push(byte);
                i += 3;
            }
            None => {
                out.push(bytes[i]);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Download `url` and build an item from it.
///
/// `name` overrides the name derived from the URL.
pub async fn download_image(
    fetcher: &dyn Fetcher,
    url: &Url,
    name: Option<&str>,
) -> Result<Item, ImageError> {
    let fetched = fetcher.fetch(url).await?;
    let source = ImageSource::from_image_bytes(&fetched.body, fetched.content_type.as_deref())?;
    let name = name.map_or_else(|| name_from_url(url), str::to_string);
    Ok(Item::new(source, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::MediaType;
    use crate::remote::mock::MockFetcher;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn names_from_urls() {
        let name = |raw: &str| name_from_url(&Url::parse(raw).unwrap());
        assert_eq!(name("https://x.example/a/kfc.webp"), "kfc");
        assert_eq!(name("https://x.example/a/archive.tar.gz"), "archive.tar");
        assert_eq!(name("https://x.example/noext"), "noext");
        assert_eq!(name("https://x.example/"), "");
        assert_eq!(name("https://x.example/.hidden"), ".hidden");
    }

    #[tokio::test]
    async fn sniffs_before_trusting_header() {
        let fetcher = MockFetcher::new();
        fetcher.respond("https://x.example/logo", PNG.to_vec(), Some("image/jpeg"));

        let url = Url::parse("https://x.example/logo").unwrap();
        let item = download_image(&fetcher, &url, None).await.unwrap();

        assert_eq!(item.source.media_type(), Some(MediaType::Png));
        assert_eq!(item.name, "logo");
    }

    #[tokio::test]
    async fn header_used_when_bytes_unknown() {
        let fetcher = MockFetcher::new();
        fetcher.respond("https://x.example/a.img", vec![1, 2, 3], Some("image/webp"));

        let url = Url::parse("https://x.example/a.img").unwrap();
        let item = download_image(&fetcher, &url, Some("Custom")).await.unwrap();

        assert!(item.source.as_str().starts_with("data:image/webp;base64,"));
        assert_eq!(item.name, "Custom");
    }

    #[tokio::test]
    async fn refuses_non_images() {
        let fetcher = MockFetcher::new();
        fetcher.respond("https://x.example/page", b"<html>".to_vec(), Some("text/html"));

        let url = Url::parse("https://x.example/page").unwrap();
        let err = download_image(&fetcher, &url, None).await.unwrap_err();

        assert!(matches!(err, ImageError::Unsupported(_)));
    }
}
