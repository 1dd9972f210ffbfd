//! Data models for fetched papers and the jobs that produce reports.
//!
//! - [`PaperEntry`]: one validated result from the arXiv feed
//! - [`Job`]: a `(query, topic)` pair processed by a single pass of the runner
//! - [`JobFile`]: the YAML job list accepted by `--config`

use crate::error::ConfigError;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

/// Timestamp layout used by the arXiv Atom feed for `<published>`.
pub const PUBLISHED_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A paper returned by a feed query.
///
/// Entries are built once from the feed and never modified afterwards.
/// Required fields are guaranteed present; see
/// [`crate::scrapers::arxiv`] for how incomplete feed records are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperEntry {
    /// Canonical identifier URL, e.g. `http://arxiv.org/abs/2401.00001v1`.
    pub id: String,
    /// Human-readable title with whitespace collapsed.
    pub title: String,
    /// Author names in feed order.
    pub authors: Vec<String>,
    /// Link to the abstract page.
    pub link: String,
    /// Link to the PDF, when the feed advertises one.
    pub pdf_link: Option<String>,
    /// Submission time, UTC, second precision.
    pub published: DateTime<Utc>,
    /// Abstract text with whitespace collapsed.
    pub summary: String,
}

impl PaperEntry {
    /// Short arXiv identifier: everything after `/abs/` in the identifier URL.
    ///
    /// Falls back to the whole identifier when it has no `/abs/` segment.
    pub fn arxiv_id(&self) -> &str {
        self.id.rsplit("/abs/").next().unwrap_or(&self.id)
    }

    /// Submission time formatted for display, `YYYY-MM-DD HH:MM:SS`.
    pub fn published_display(&self) -> String {
        self.published.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Parse an Atom `<published>` value in the exact `YYYY-MM-DDTHH:MM:SSZ` form.
pub fn parse_published(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value.trim(), PUBLISHED_FORMAT).map(|naive| naive.and_utc())
}

/// One search to run and the topic label its report is filed under.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Job {
    /// Query in the remote field-query syntax, as it would appear in a URL.
    pub query: String,
    /// Free-text label used in the report filename and the index link.
    pub topic: String,
}

impl Job {
    pub fn new(query: &str, topic: &str) -> Self {
        Self {
            query: query.to_string(),
            topic: topic.to_string(),
        }
    }
}

/// Contents of a YAML job file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct JobFile {
    /// Result cap for every job unless overridden on the command line.
    #[serde(default)]
    pub max_results: Option<usize>,
    /// Restrict every job to one calendar day, counted back from today.
    #[serde(default)]
    pub day_offset: Option<u32>,
    pub jobs: Vec<Job>,
}

/// Check that a topic can be embedded in a filename.
pub fn validate_topic(topic: &str) -> Result<(), ConfigError> {
    if topic.trim().is_empty() || topic.contains(['/', '\\']) || topic == "." || topic == ".." {
        return Err(ConfigError::InvalidTopic(topic.to_string()));
    }
    Ok(())
}
