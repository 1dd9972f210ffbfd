//! Error types for feed access, entry conversion and job configuration.
//!
//! Filesystem and top-level plumbing keep using `Box<dyn Error>`; these
//! enums exist where callers need to tell failure kinds apart.

use thiserror::Error;

/// A single feed entry that could not be turned into a [`crate::models::PaperEntry`].
///
/// Rejections are reported per entry; the rest of the feed is still used.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryError {
    #[error("entry {id} is missing required field `{field}`")]
    MissingField { id: String, field: &'static str },

    #[error("entry {id} has malformed timestamp {value:?} (expected YYYY-MM-DDTHH:MM:SSZ)")]
    BadTimestamp { id: String, value: String },
}

/// Failure to fetch or decode a feed page.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed endpoint answered {status} for {url}")]
    Status { status: u16, url: String },

    #[error("arXiv rejected the query: {message}")]
    Api { message: String },

    #[error("could not decode Atom feed: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Problems with the job list supplied on the command line or in a job file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read job file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("job file {path} is not valid YAML: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid topic {0:?}: must be non-empty and contain no path separators")]
    InvalidTopic(String),

    #[error("job file {0} lists no jobs")]
    NoJobs(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_error_messages_name_the_field() {
        let e = EntryError::MissingField {
            id: "http://arxiv.org/abs/1".to_string(),
            field: "title",
        };
        assert_eq!(
            e.to_string(),
            "entry http://arxiv.org/abs/1 is missing required field `title`"
        );
    }

    #[test]
    fn test_status_error_message() {
        let e = FeedError::Status {
            status: 503,
            url: "http://export.arxiv.org/api/query".to_string(),
        };
        assert!(e.to_string().contains("503"));
    }
}
