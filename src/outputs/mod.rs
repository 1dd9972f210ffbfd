//! Output generation: per-topic HTML reports and the shared index.
//!
//! # Submodules
//!
//! - [`report`]: Renders a topic's entries into a standalone HTML page
//! - [`indexes`]: Keeps `index.html` linking every report ever written
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── arxiv_LLM-RL_2024-01-01.html
//! ├── arxiv_LLM-agent_2024-01-01.html
//! └── index.html
//! ```

pub mod indexes;
pub mod report;

use crate::models::PaperEntry;
use chrono::NaiveDate;
use std::error::Error;
use std::path::PathBuf;
use tracing::instrument;

/// Write the report for `topic` and link it from the index.
///
/// # Returns
///
/// The path of the written report.
#[instrument(level = "info", skip(entries), fields(count = entries.len()))]
pub async fn publish_report(
    output_dir: &str,
    entries: &[PaperEntry],
    topic: &str,
    date: NaiveDate,
) -> Result<PathBuf, Box<dyn Error>> {
    let path = report::write_report(output_dir, entries, topic, date).await?;
    indexes::update_index(output_dir, date, topic).await?;
    Ok(path)
}
