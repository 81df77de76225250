//! Run configuration.
//!
//! [`Config`] is resolved once at startup from the parsed [`Cli`] (and the
//! optional YAML metadata file) and then passed by reference through the
//! pipeline. Nothing below `main` reads the environment.
//!
//! # YAML metadata file
//!
//! Any subset of the feed metadata may be overridden:
//!
//! ```yaml
//! title: Governo Sombra
//! description: Weekly political commentary
//! feed_path: /go-verno-sombra/feeds/json
//! author_name: Nuno Lopes
//! ```

use crate::cache::ResponseCache;
use crate::cli::Cli;
use crate::error::FeedError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

/// Static, feed-level metadata copied into every generated document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FeedMeta {
    pub title: String,
    pub description: String,
    /// Defaults to the source URL when unset.
    pub home_page_url: Option<String>,
    /// Appended to the domain to form `feed_url`.
    pub feed_path: String,
    pub author_name: String,
    pub icon: String,
    pub favicon: String,
}

impl Default for FeedMeta {
    fn default() -> Self {
        Self {
            title: "Governo Sombra".to_string(),
            description: "Scraper in Rust to generate a json feed".to_string(),
            home_page_url: None,
            feed_path: "/go-verno-sombra/feeds/json".to_string(),
            author_name: "Nuno Lopes".to_string(),
            icon: "https://static.impresa.pt/sic/2039//assets/gfx/icon.png".to_string(),
            favicon: "https://sic.pt/favicon.ico?v=2".to_string(),
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base domain the feed is served from, e.g. `https://feeds.example.org`.
    pub domain: String,
    pub source_url: Url,
    /// Root of the scraped site; relative links resolve against it.
    pub site_origin: Url,
    pub allowed_domains: Vec<String>,
    pub output_path: PathBuf,
    pub cache: Option<ResponseCache>,
    pub timeout: Duration,
    pub feed: FeedMeta,
}

impl Config {
    /// Resolve the run configuration from parsed command-line arguments.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Config`] when the domain is missing or blank,
    /// when the source URL is not an absolute http(s) URL, or when the
    /// metadata file cannot be loaded.
    #[instrument(level = "info", skip_all)]
    pub fn from_cli(cli: &Cli) -> Result<Self, FeedError> {
        let domain = cli
            .domain
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| FeedError::Config("DOMAIN is not set".to_string()))?
            .to_string();

        let source_url = Url::parse(&cli.source_url).map_err(|e| {
            FeedError::Config(format!("invalid source URL {}: {}", cli.source_url, e))
        })?;
        if !matches!(source_url.scheme(), "http" | "https") || !source_url.has_host() {
            return Err(FeedError::Config(format!(
                "source URL must be an absolute http(s) URL: {}",
                cli.source_url
            )));
        }
        let site_origin = source_url.join("/").map_err(|e| {
            FeedError::Config(format!("cannot derive site origin from {}: {}", source_url, e))
        })?;

        let allowed_domains = cli
            .allowed_domains
            .iter()
            .map(|d| d.trim().to_ascii_lowercase())
            .filter(|d| !d.is_empty())
            .collect();

        let cache = (!cli.no_cache).then(|| {
            ResponseCache::new(
                cli.cache_dir.clone(),
                cli.cache_ttl_secs.map(Duration::from_secs),
            )
        });

        let feed = match &cli.config {
            Some(path) => load_feed_meta(path)?,
            None => FeedMeta::default(),
        };

        let config = Config {
            domain,
            source_url,
            site_origin,
            allowed_domains,
            output_path: cli.output.clone(),
            cache,
            timeout: Duration::from_secs(cli.timeout_secs),
            feed,
        };
        debug!(?config, "Resolved configuration");
        Ok(config)
    }

    /// Public URL of the generated feed: domain plus the configured path.
    pub fn feed_url(&self) -> String {
        format!("{}{}", self.domain.trim_end_matches('/'), self.feed.feed_path)
    }

    pub fn home_page_url(&self) -> String {
        self.feed
            .home_page_url
            .clone()
            .unwrap_or_else(|| self.source_url.to_string())
    }
}

/// Load feed metadata overrides from a YAML file.
///
/// Keys that are absent keep their defaults.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn load_feed_meta(path: &Path) -> Result<FeedMeta, FeedError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        FeedError::Config(format!("cannot read feed config {}: {}", path.display(), e))
    })?;
    let meta: FeedMeta = serde_yaml::from_str(&raw).map_err(|e| {
        FeedError::Config(format!("malformed feed config {}: {}", path.display(), e))
    })?;
    info!(title = %meta.title, "Loaded feed metadata");
    Ok(meta)
}
