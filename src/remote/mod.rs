//! remote
//!
//! Network collaborators: importing a document from a URL and downloading
//! images to append.
//!
//! # Architecture
//!
//! Everything is written against the async [`Fetcher`] trait:
//!
//! - [`http::HttpFetcher`] is the real `reqwest` client
//! - [`mock::MockFetcher`] serves canned responses in tests
//!
//! Remote failures never touch local state. Import results are applied
//! through [`Session::finish_import`](crate::engine::Session::finish_import),
//! which discards results from superseded imports.

pub mod http;
pub mod image;
pub mod import;
pub mod mock;
pub mod traits;

pub use http::HttpFetcher;
pub use image::{download_image, ImageError};
pub use import::{fetch_document, import_url_from_page, parse_import_url, ImportError};
pub use traits::{Fetched, Fetcher, RemoteError};
