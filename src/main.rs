//! # arxiv_digest
//!
//! Queries the arXiv Atom API for keyword searches and publishes the results
//! as dated static HTML reports, plus an `index.html` linking every report
//! ever written to the output directory.
//!
//! ## Usage
//!
//! ```sh
//! arxiv_digest                      # built-in jobs into ./docs
//! arxiv_digest -c jobs.yaml -d 1    # custom jobs, yesterday's submissions only
//! ```
//!
//! ## Pipeline
//!
//! Jobs run strictly one after another:
//! 1. **Search**: one request per `(query, topic)` job
//! 2. **Report**: write `arxiv_<topic>_<date>.html`
//! 3. **Index**: link the report from `index.html`
//!
//! A failed job is logged and the remaining jobs still run. The process
//! exits with an error if any job failed.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use arxiv_digest::cli::Cli;
use arxiv_digest::config::RunConfig;
use arxiv_digest::models::Job;
use arxiv_digest::outputs::publish_report;
use arxiv_digest::query::SearchQuery;
use arxiv_digest::scrapers::arxiv::ArxivClient;
use arxiv_digest::utils::ensure_writable_dir;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
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
    info!("arxiv_digest starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = RunConfig::from_cli(&args)?;
    info!(
        jobs = config.jobs.len(),
        max_results = config.max_results,
        day_offset = ?config.day_offset,
        output_dir = %config.output_dir,
        "Resolved run configuration"
    );

    if let Err(e) = ensure_writable_dir(&config.output_dir).await {
        error!(
            path = %config.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let client = ArxivClient::new(&config.endpoint)?;

    let mut failed = Vec::new();
    for job in &config.jobs {
        match run_job(&client, &config, job).await {
            Ok(path) => info!(topic = %job.topic, path = %path.display(), "Report saved"),
            Err(e) => {
                error!(topic = %job.topic, error = %e, "Job failed; continuing with next job");
                failed.push(job.topic.clone());
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        succeeded = config.jobs.len() - failed.len(),
        failed = failed.len(),
        "Execution complete"
    );

    if !failed.is_empty() {
        return Err(format!(
            "{} of {} jobs failed: {}",
            failed.len(),
            config.jobs.len(),
            failed.join(", ")
        )
        .into());
    }
    Ok(())
}

/// Search for one job and publish its report under today's date.
#[instrument(level = "info", skip(client, config), fields(topic = %job.topic))]
async fn run_job(
    client: &ArxivClient,
    config: &RunConfig,
    job: &Job,
) -> Result<PathBuf, Box<dyn Error>> {
    let query = SearchQuery::from_literal(&job.query);
    let entries = match config.day_offset {
        Some(offset) => {
            client
                .search_on_day(&query, offset, config.max_results)
                .await?
        }
        None => client.search(&query, config.max_results).await?,
    };

    let today = Local::now().date_naive();
    publish_report(&config.output_dir, &entries, &job.topic, today).await
}
