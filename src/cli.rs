//! Command-line interface definitions for arxiv_digest.
//!
//! Every option has a default, so running the binary with no arguments
//! performs the standard daily run: the built-in jobs, written to `docs/`.

use crate::scrapers::arxiv::DEFAULT_ENDPOINT;
use clap::Parser;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Built-in jobs, reports in ./docs
/// arxiv_digest
///
/// # Custom job file, only papers submitted yesterday
/// arxiv_digest -c jobs.yaml -d 1 -o ./site
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory receiving the reports and index.html
    #[arg(short, long, env = "ARXIV_DIGEST_OUTPUT_DIR", default_value = "docs")]
    pub output_dir: String,

    /// Maximum number of results requested per query [default: 15000]
    #[arg(short = 'n', long, env = "ARXIV_DIGEST_MAX_RESULTS")]
    pub max_results: Option<usize>,

    /// YAML job file replacing the built-in (query, topic) list
    #[arg(short, long)]
    pub config: Option<String>,

    /// Only include papers submitted this many days ago (0 = today)
    #[arg(short, long)]
    pub day_offset: Option<u32>,

    /// arXiv API endpoint
    #[arg(long, env = "ARXIV_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}
