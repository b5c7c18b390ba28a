//! remote::mock
//!
//! In-memory fetcher for deterministic testing.
//!
//! # Example
//!
//! ```
//! use tierlist::remote::mock::MockFetcher;
//! use tierlist::remote::{Fetcher, RemoteError};
//! use reqwest::Url;
//!
//! # tokio_test::block_on(async {
//! let fetcher = MockFetcher::new();
//! fetcher.respond("https://example.com/a.json", b"{}".to_vec(), Some("application/json"));
//!
//! let url = Url::parse("https://example.com/a.json").unwrap();
//! assert_eq!(fetcher.fetch(&url).await.unwrap().text(), "{}");
//!
//! let missing = Url::parse("https://example.com/b.json").unwrap();
//! assert!(matches!(
//!     fetcher.fetch(&missing).await,
//!     Err(RemoteError::Status { status: 404, .. })
//! ));
//! # });
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::Url;

use super::traits::{Fetched, Fetcher, RemoteError};

/// Mock fetcher keyed by URL.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping. Unknown URLs answer
/// 404.
#[derive(Debug, Clone, Default)]
pub struct MockFetcher {
    inner: Arc<Mutex<MockFetcherInner>>,
}

#[derive(Debug, Default)]
struct MockFetcherInner {
    responses: HashMap<String, Result<Fetched, RemoteError>>,
    requests: Vec<String>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` at `url`.
    pub fn respond(&self, url: &str, body: Vec<u8>, content_type: Option<&str>) {
        let fetched = Fetched {
            body,
            content_type: content_type.map(str::to_string),
        };
        self.set(url, Ok(fetched));
    }

    /// Fail requests to `url` with `error`.
    pub fn fail(&self, url: &str, error: RemoteError) {
        self.set(url, Err(error));
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.lock().requests.clone()
    }

    fn set(&self, url: &str, response: Result<Fetched, RemoteError>) {
        let key = Url::parse(url).map_or_else(|_| url.to_string(), String::from);
        self.lock().responses.insert(key, response);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockFetcherInner> {
        // A poisoned mock only means another test thread panicked.
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &Url) -> Result<Fetched, RemoteError> {
        let mut inner = self.lock();
        inner.requests.push(url.to_string());
        inner
            .responses
            .get(url.as_str())
            .cloned()
            .unwrap_or_else(|| {
                Err(RemoteError::Status {
                    url: url.to_string(),
                    status: 404,
                })
            })
    }
}
