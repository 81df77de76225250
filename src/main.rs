//! # sombra_feed
//!
//! Scrapes the episode listing of a SIC programme (by default *Governo
//! Sombra*) and publishes it as a [JSON Feed](https://jsonfeed.org/version/1).
//!
//! ## Usage
//!
//! ```sh
//! DOMAIN=https://feeds.example.org sombra_feed -o ./feeds/json
//! ```
//!
//! ## Architecture
//!
//! A single synchronous pass:
//! 1. **Fetching**: GET the listing page (allow-listed host, bounded timeout,
//!    on-disk response cache)
//! 2. **Extraction**: one raw record per `article` block, in page order
//! 3. **Normalization**: absolute URLs, `https:` images, publish dates
//! 4. **Output**: assemble the feed and atomically replace the output file
//!
//! ## Exit codes
//!
//! `0` success, `2` configuration, `3` domain not allowed, `4` fetch,
//! `5` write.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cache;
mod cli;
mod config;
mod error;
mod feed;
mod http;
mod models;
mod normalize;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use cli::Cli;
use config::Config;
use utils::SystemClock;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("sombra_feed starting up");

    let args = Cli::parse();

    let config = match Config::from_cli(&args) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Fatal configuration error; nothing fetched");
            return ExitCode::from(e.exit_code());
        }
    };
    info!(
        source = %config.source_url,
        output = %config.output_path.display(),
        cache = %config.cache.as_ref().map(|c| c.dir().display().to_string()).unwrap_or_else(|| "disabled".to_string()),
        "Configuration loaded"
    );

    let outcome = pipeline::run(&config, &SystemClock).await;
    let elapsed = start_time.elapsed();

    match outcome {
        Ok(summary) => {
            info!(
                path = %summary.path.display(),
                items = summary.items,
                ?elapsed,
                "Feed was successfully generated"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(
                error = %e,
                source = %config.source_url,
                output = %config.output_path.display(),
                ?elapsed,
                "Run failed; feed not written"
            );
            ExitCode::from(e.exit_code())
        }
    }
}
