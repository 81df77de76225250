//! HTTP fetch client.
//!
//! Issues a single GET per call, restricted to an allow-list of hosts, with
//! a bounded timeout and an optional [`ResponseCache`] in front of the
//! network. No retries: a failed fetch is returned to the caller as is.

use crate::cache::ResponseCache;
use crate::config::Config;
use crate::error::FeedError;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use url::Url;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub struct FetchClient {
    client: Client,
    /// Lowercase host names; matched exactly.
    allowed_domains: Vec<String>,
    cache: Option<ResponseCache>,
}

impl FetchClient {
    /// Build a client with the given timeout, allow-list and cache.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Config`] if the TLS backend cannot be initialized.
    pub fn new(
        timeout: Duration,
        allowed_domains: Vec<String>,
        cache: Option<ResponseCache>,
    ) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FeedError::Config(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            client,
            allowed_domains: allowed_domains
                .into_iter()
                .map(|d| d.to_ascii_lowercase())
                .collect(),
            cache,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, FeedError> {
        Self::new(
            config.timeout,
            config.allowed_domains.clone(),
            config.cache.clone(),
        )
    }

    /// Parse `url` and check its host against the allow-list.
    pub fn check_allowed(&self, url: &str) -> Result<Url, FeedError> {
        let parsed = Url::parse(url).map_err(|source| FeedError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        let host = parsed.host_str().unwrap_or_default().to_ascii_lowercase();
        if host.is_empty() || !self.allowed_domains.iter().any(|d| *d == host) {
            return Err(FeedError::DomainNotAllowed {
                url: url.to_string(),
                host,
            });
        }
        Ok(parsed)
    }

    /// Fetch `url` and return the response body.
    ///
    /// A fresh cache entry is returned without touching the network.
    /// Successful network responses are written back to the cache.
    ///
    /// # Errors
    ///
    /// - [`FeedError::InvalidUrl`] / [`FeedError::DomainNotAllowed`] before any I/O
    /// - [`FeedError::Fetch`] on transport failure or timeout
    /// - [`FeedError::HttpStatus`] on a non-2xx response
    #[instrument(level = "info", skip_all, fields(%url))]
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, FeedError> {
        let parsed = self.check_allowed(url)?;

        if let Some(cache) = &self.cache {
            if let Some(body) = cache.get(&parsed).await {
                info!(bytes = body.len(), "Serving page from cache");
                return Ok(body);
            }
        }

        info!("Requesting");
        let fetch_err = |source| FeedError::Fetch {
            url: url.to_string(),
            source,
        };
        let response = self
            .client
            .get(parsed.clone())
            .send()
            .await
            .map_err(fetch_err)?;

        let status = response.status();
        if !status.is_success() {
            error!(%status, "Non-success HTTP status");
            return Err(FeedError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(fetch_err)?.to_vec();
        debug!(bytes = body.len(), %status, "Fetched page");

        if let Some(cache) = &self.cache {
            cache.put(&parsed, &body).await;
        }
        Ok(body)
    }
}
