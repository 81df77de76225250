//! Command-line interface definitions for sombra_feed.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every argument can be provided via a command-line flag or an environment
//! variable, so the binary runs unchanged from cron or a container.

use clap::Parser;
use std::path::PathBuf;

/// Episode listing scraped when no source is given.
pub const DEFAULT_SOURCE_URL: &str = "https://sic.pt/Programas/governo-sombra/videos";

/// Command-line arguments for the sombra_feed application.
///
/// # Examples
///
/// ```sh
/// # Minimal run, domain from the environment
/// DOMAIN=https://feeds.example.org sombra_feed
///
/// # Custom output location and a one-hour cache lifetime
/// sombra_feed --domain https://feeds.example.org -o ./public/feed.json --cache-ttl-secs 3600
///
/// # Override feed metadata from a YAML file
/// sombra_feed --domain https://feeds.example.org -c ./feed.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Base domain the feed is published under (used for feed_url and author.url)
    #[arg(long, env = "DOMAIN")]
    pub domain: Option<String>,

    /// Episode listing page to scrape
    #[arg(long, env = "SOURCE_URL", default_value = DEFAULT_SOURCE_URL)]
    pub source_url: String,

    /// Hosts the fetcher may contact (repeatable)
    #[arg(
        long = "allowed-domain",
        env = "ALLOWED_DOMAINS",
        value_delimiter = ',',
        default_value = "sic.pt"
    )]
    pub allowed_domains: Vec<String>,

    /// Path of the generated JSON feed
    #[arg(short, long, env = "FEED_OUTPUT", default_value = "./feeds/json")]
    pub output: PathBuf,

    /// Directory holding cached responses
    #[arg(long, env = "CACHE_DIR", default_value = "./cache")]
    pub cache_dir: PathBuf,

    /// Always hit the network, never read or write the response cache
    #[arg(long)]
    pub no_cache: bool,

    /// Maximum age of a cached response in seconds (unset: never expires)
    #[arg(long, env = "CACHE_TTL_SECS")]
    pub cache_ttl_secs: Option<u64>,

    /// Timeout for the page fetch in seconds
    #[arg(
        long,
        env = "FETCH_TIMEOUT_SECS",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// Optional path to a YAML file overriding the feed metadata
    #[arg(short, long, env = "FEED_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Built-in defaults with no domain, independent of the process environment.
#[cfg(test)]
impl Default for Cli {
    fn default() -> Self {
        Self {
            domain: None,
            source_url: DEFAULT_SOURCE_URL.to_string(),
            allowed_domains: vec!["sic.pt".to_string()],
            output: PathBuf::from("./feeds/json"),
            cache_dir: PathBuf::from("./cache"),
            no_cache: false,
            cache_ttl_secs: None,
            timeout_secs: 30,
            config: None,
        }
    }
}
