//! remote::import
//!
//! Replace a document with one fetched from a URL.
//!
//! # URL handling
//!
//! Only absolute `http` and `https` URLs are used. Anything else is ignored
//! without an error, so a stray or malformed link simply leaves the current
//! document in place.
//!
//! A page address carrying the document URL in its `url` query parameter
//! (`https://host/editor?url=https://host/list.json`) is also understood,
//! see [`import_url_from_page`].

use reqwest::Url;
use thiserror::Error;

use crate::core::model::Document;
use crate::core::schema::{self, FormatError};

use super::traits::{Fetcher, RemoteError};

/// Errors from a remote import.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to fetch document: {0}")]
    Network(#[from] RemoteError),

    #[error("fetched document is not a valid tierlist: {0}")]
    Format(#[from] FormatError),
}

/// Accept `raw` as an import URL if it is absolute `http(s)`.
///
/// ```
/// use tierlist::remote::import::parse_import_url;
///
/// assert!(parse_import_url("https://example.com/list.json").is_some());
/// assert!(parse_import_url("file:///etc/passwd").is_none());
/// assert!(parse_import_url("list.json").is_none());
/// ```
pub fn parse_import_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw.trim()).ok()?;
    match url.scheme() {
        "http" | "https" => Some(url),
        _ => None,
    }
}

/// Extract and check the `url` query parameter of a page address.
///
/// ```
/// use tierlist::remote::import::import_url_from_page;
///
/// let url = import_url_from_page("https://t.example/?url=https%3A%2F%2Fcdn.example%2Fa.json");
/// assert_eq!(url.unwrap().as_str(), "https://cdn.example/a.json");
/// assert!(import_url_from_page("https://t.example/?url=ftp://x").is_none());
/// assert!(import_url_from_page("https://t.example/").is_none());
/// ```
pub fn import_url_from_page(page: &str) -> Option<Url> {
    let page = Url::parse(page.trim()).ok()?;
    let (_, target) = page.query_pairs().find(|(key, _)| key == "url")?;
    parse_import_url(&target)
}

/// Fetch and parse a document.
pub async fn fetch_document(fetcher: &dyn Fetcher, url: &Url) -> Result<Document, ImportError> {
    let fetched = fetcher.fetch(url).await?;
    Ok(schema::parse(&fetched.text())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::mock::MockFetcher;

    #[test]
    fn rejects_relative_and_other_schemes() {
        for raw in ["", "   ", "/list.json", "data:application/json,{}", "javascript:alert(1)"] {
            assert!(parse_import_url(raw).is_none(), "{raw} should be ignored");
        }
    }

    #[tokio::test]
    async fn fetch_document_parses_body() {
        let fetcher = MockFetcher::new();
        fetcher.respond(
            "https://example.com/list.json",
            br#"{"title":"Remote","rows":[]}"#.to_vec(),
            Some("application/json"),
        );

        let url = parse_import_url("https://example.com/list.json").unwrap();
        let doc = fetch_document(&fetcher, &url).await.unwrap();

        assert_eq!(doc.title, "Remote");
    }

    #[tokio::test]
    async fn bad_shape_is_format_error() {
        let fetcher = MockFetcher::new();
        fetcher.respond("https://example.com/x.json", br#"{"title":"x"}"#.to_vec(), None);

        let url = parse_import_url("https://example.com/x.json").unwrap();
        let err = fetch_document(&fetcher, &url).await.unwrap_err();

        assert!(matches!(err, ImportError::Format(FormatError::RowsNotArray)));
    }

    #[tokio::test]
    async fn missing_is_network_error() {
        let fetcher = MockFetcher::new();
        let url = parse_import_url("https://example.com/gone.json").unwrap();

        let err = fetch_document(&fetcher, &url).await.unwrap_err();

        assert!(matches!(
            err,
            ImportError::Network(RemoteError::Status { status: 404, .. })
        ));
    }
}
