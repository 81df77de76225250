//! One complete run: fetch, extract, normalize, assemble, write.
//!
//! The run either commits a complete feed file or returns an error and
//! leaves any previous file untouched.

use crate::config::Config;
use crate::error::FeedError;
use crate::feed::assemble;
use crate::http::FetchClient;
use crate::models::Episode;
use crate::normalize::normalize;
use crate::outputs::json::write_feed;
use crate::scrapers::sic::EpisodePage;
use crate::utils::Clock;
use std::path::PathBuf;
use tracing::{info, instrument};
use url::Url;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub items: usize,
    pub path: PathBuf,
}

/// Turn fetched page bytes into episodes, in page order.
pub fn collect_episodes(content: &[u8], origin: &Url, clock: &dyn Clock) -> Vec<Episode> {
    let page = EpisodePage::parse(content);
    page.records()
        .map(|raw| normalize(raw, origin, clock))
        .collect()
}

#[instrument(level = "info", skip_all, fields(source = %config.source_url, output = %config.output_path.display()))]
pub async fn run(config: &Config, clock: &dyn Clock) -> Result<RunSummary, FeedError> {
    let client = FetchClient::from_config(config)?;
    let content = client.fetch(config.source_url.as_str()).await?;

    // Parsed document is dropped here, before the next await.
    let episodes = collect_episodes(&content, &config.site_origin, clock);
    info!(count = episodes.len(), "Collected episodes");

    let feed = assemble(config, episodes);
    write_feed(&feed, &config.output_path).await?;

    Ok(RunSummary {
        items: feed.items.len(),
        path: config.output_path.clone(),
    })
}
