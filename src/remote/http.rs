//! remote::http
//!
//! `reqwest`-backed [`Fetcher`].

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Url};

use super::traits::{Fetched, Fetcher, RemoteError};

/// HTTP fetcher with a fixed timeout and User-Agent.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Client`] if the user agent is not a valid
    /// header value or the TLS backend fails to initialize.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, RemoteError> {
        let agent =
            HeaderValue::from_str(user_agent).map_err(|e| RemoteError::Client(e.to_string()))?;
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(USER_AGENT, agent);

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| RemoteError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Fetched, RemoteError> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response
            .bytes()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;
        debug!("GET {url}: {} bytes", body.len());

        Ok(Fetched {
            body: body.to_vec(),
            content_type,
        })
    }
}
