//! Maintenance of the shared `index.html` linking every report.
//!
//! The index lives next to the reports and accumulates one list item per
//! `(topic, date)` across all runs:
//!
//! ```text
//! <ul>
//! <li><a href="arxiv_LLM-agent_2024-01-02.html">LLM-agent 2024-01-02 Papers</a></li>
//! <li><a href="arxiv_LLM-RL_2024-01-01.html">LLM-RL 2024-01-01 Papers</a></li>
//! </ul>
//! ```
//!
//! # Insert semantics
//!
//! New links go directly after the opening `<ul>` so the newest report comes
//! first. A link is only inserted when the exact same line is not already
//! in the file. The read-modify-write is not locked; two processes updating
//! the same index at once can lose an insertion.

use crate::outputs::report::report_filename;
use crate::utils::html_escape;
use chrono::NaiveDate;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument, warn};

/// Name of the index file inside the output directory.
pub const INDEX_FILENAME: &str = "index.html";

const LIST_OPEN: &str = "<ul>\n";

const INDEX_SHELL: &str = "<!DOCTYPE html>
<html>
<head>
<meta charset='UTF-8'>
<title>arXiv Archive</title>
</head>
<body>
<h1>📚 arXiv Paper Archive</h1>
<ul>
</ul>
</body>
</html>";

/// The list item linking to the report for `topic` on `date`.
pub fn index_entry(topic: &str, date: NaiveDate) -> String {
    let href = urlencoding::encode(&report_filename(topic, date)).into_owned();
    format!(
        "<li><a href=\"{}\">{} {} Papers</a></li>\n",
        html_escape(&href),
        html_escape(topic),
        date.format("%Y-%m-%d")
    )
}

/// Insert `entry` after the first `<ul>` of `content` unless it is already present.
///
/// Returns `None` when nothing needs to change, either because the entry
/// exists or because the document has no list to insert into.
fn insert_entry(content: &str, entry: &str) -> Option<String> {
    if content.contains(entry) {
        return None;
    }
    content
        .find(LIST_OPEN)
        .map(|pos| {
            let at = pos + LIST_OPEN.len();
            let mut updated = String::with_capacity(content.len() + entry.len());
            updated.push_str(&content[..at]);
            updated.push_str(entry);
            updated.push_str(&content[at..]);
            updated
        })
}

/// Add a link to the report for `topic` on `date` to `{output_dir}/index.html`.
///
/// Creates the index with an empty list if it does not exist yet. Calling
/// this twice with the same arguments leaves a single link.
///
/// # Returns
///
/// The path of the index file.
#[instrument(level = "info", skip_all, fields(%output_dir, %date, %topic))]
pub async fn update_index(
    output_dir: &str,
    date: NaiveDate,
    topic: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let index_path = Path::new(output_dir).join(INDEX_FILENAME);

    let content = if index_path.exists() {
        fs::read_to_string(&index_path).await?
    } else {
        fs::create_dir_all(output_dir).await?;
        fs::write(&index_path, INDEX_SHELL).await?;
        info!(path = %index_path.display(), "Created index");
        INDEX_SHELL.to_string()
    };

    let entry = index_entry(topic, date);
    match insert_entry(&content, &entry) {
        Some(updated) => {
            fs::write(&index_path, updated).await?;
            info!(path = %index_path.display(), "Added report link to index");
        }
        None if content.contains(&entry) => {
            debug!(path = %index_path.display(), "Index already links this report");
        }
        None => {
            warn!(
                path = %index_path.display(),
                "Index has no <ul> list to insert into; leaving it unchanged"
            );
        }
    }

    Ok(index_path)
}
