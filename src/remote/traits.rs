//! remote::traits
//!
//! Fetcher trait definition for retrieving documents and images over the
//! network.
//!
//! # Design
//!
//! The `Fetcher` trait is async because fetching involves network I/O.
//! Import and image download are written against the trait so tests can
//! substitute [`MockFetcher`](super::mock::MockFetcher) for the real HTTP
//! client.
//!
//! A failed fetch never touches local state; callers decide what to log.

use async_trait::async_trait;
use reqwest::Url;
use thiserror::Error;

/// Errors from network fetches.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Connection, TLS, timeout or body read failure.
    #[error("network error: {0}")]
    Network(String),

    /// The client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// A fetched response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    /// Raw body bytes
    pub body: Vec<u8>,
    /// `Content-Type` header, if the server sent one
    pub content_type: Option<String>,
}

impl Fetched {
    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Something that can GET a URL.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url`, failing on non-success status codes.
    async fn fetch(&self, url: &Url) -> Result<Fetched, RemoteError>;
}
