//! arXiv Atom API client.
//!
//! Issues one `GET` against the export API per search and turns the Atom
//! response into [`PaperEntry`] values.
//!
//! # Request
//!
//! ```text
//! http://export.arxiv.org/api/query?search_query=all%3ALLM+AND+all%3Aagent
//!     &start=0&max_results=20&sortBy=submittedDate&sortOrder=descending
//! ```
//!
//! Only a single page is requested. The service caps page size on its side,
//! so a large `max_results` yields at most that cap.
//!
//! # Incomplete entries
//!
//! Entries without a title, link or `YYYY-MM-DDTHH:MM:SSZ` timestamp are
//! rejected one by one and logged; the rest of the feed is still returned.
//!
//! # API errors
//!
//! arXiv answers a query it refuses with status 200 and a feed holding a
//! single `http://arxiv.org/api/errors#...` entry. That reply is turned into
//! [`FeedError::Api`] so no empty report is written for it.

use crate::error::{EntryError, FeedError};
use crate::models::{PaperEntry, parse_published};
use crate::query::{SearchQuery, day_for_offset};
use crate::utils::{normalize_whitespace, truncate_for_log};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Public arXiv export endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://export.arxiv.org/api/query";

/// Identifier prefix of the entry arXiv sends, with status 200, when it
/// refuses a query (bad syntax, `max_results` too large, ...).
const API_ERROR_ID: &str = "arxiv.org/api/errors";

#[derive(Debug, Deserialize)]
struct Feed {
    #[serde(rename = "entry", default)]
    entries: Vec<RawEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct RawEntry {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    published: Option<String>,
    #[serde(rename = "author", default)]
    authors: Vec<RawAuthor>,
    #[serde(rename = "link", default)]
    links: Vec<RawLink>,
}

#[derive(Debug, Deserialize)]
struct RawAuthor {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLink {
    #[serde(rename = "@href", default)]
    href: Option<String>,
    #[serde(rename = "@rel", default)]
    rel: Option<String>,
    #[serde(rename = "@title", default)]
    title: Option<String>,
    #[serde(rename = "@type", default)]
    kind: Option<String>,
}

impl RawEntry {
    fn is_api_error(&self) -> bool {
        self.id.as_deref().is_some_and(|id| {
            let id = id.trim();
            id.starts_with(&format!("http://{API_ERROR_ID}"))
                || id.starts_with(&format!("https://{API_ERROR_ID}"))
        })
    }
}

impl RawLink {
    fn is_pdf(&self) -> bool {
        self.title.as_deref() == Some("pdf") || self.kind.as_deref() == Some("application/pdf")
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| normalize_whitespace(&v))
        .filter(|v| !v.is_empty())
}

impl TryFrom<RawEntry> for PaperEntry {
    type Error = EntryError;

    fn try_from(raw: RawEntry) -> Result<Self, Self::Error> {
        let raw_id = non_empty(raw.id);

        // Atom marks the abstract page as rel="alternate"; fall back to the
        // first link carrying an href, then to the identifier itself.
        let link = raw
            .links
            .iter()
            .find(|l| l.rel.as_deref() == Some("alternate") && l.href.is_some())
            .or_else(|| raw.links.iter().find(|l| l.href.is_some()))
            .and_then(|l| l.href.clone())
            .or_else(|| raw_id.clone());
        let pdf_link = raw
            .links
            .iter()
            .find(|l| l.is_pdf())
            .and_then(|l| l.href.clone());

        let id = raw_id
            .or_else(|| link.clone())
            .unwrap_or_else(|| "<no id>".to_string());

        let link = link.ok_or_else(|| EntryError::MissingField {
            id: id.clone(),
            field: "link",
        })?;
        let title = non_empty(raw.title).ok_or_else(|| EntryError::MissingField {
            id: id.clone(),
            field: "title",
        })?;
        let published_raw = non_empty(raw.published).ok_or_else(|| EntryError::MissingField {
            id: id.clone(),
            field: "published",
        })?;
        let published = parse_published(&published_raw).map_err(|_| EntryError::BadTimestamp {
            id: id.clone(),
            value: published_raw.clone(),
        })?;

        let authors = raw
            .authors
            .into_iter()
            .filter_map(|a| non_empty(a.name))
            .collect();

        Ok(PaperEntry {
            id,
            title,
            authors,
            link,
            pdf_link,
            published,
            summary: raw.summary.map(|s| normalize_whitespace(&s)).unwrap_or_default(),
        })
    }
}

/// Entries decoded from one feed page, in feed order, plus the ones rejected.
#[derive(Debug, Default)]
pub struct ParsedFeed {
    pub entries: Vec<PaperEntry>,
    pub rejected: Vec<EntryError>,
}

/// Decode an Atom document returned by the export API.
///
/// # Errors
///
/// Returns [`FeedError::Xml`] when the document as a whole cannot be
/// decoded, and [`FeedError::Api`] when the feed is arXiv's error reply.
/// Individual bad entries end up in [`ParsedFeed::rejected`].
pub fn parse_feed(xml: &str) -> Result<ParsedFeed, FeedError> {
    let feed: Feed = quick_xml::de::from_str(xml)?;
    if let Some(err) = feed.entries.iter().find(|e| e.is_api_error()) {
        let message = non_empty(err.summary.clone())
            .or_else(|| non_empty(err.id.clone()))
            .unwrap_or_default();
        return Err(FeedError::Api { message });
    }
    let mut parsed = ParsedFeed::default();
    for raw in feed.entries {
        match PaperEntry::try_from(raw) {
            Ok(entry) => parsed.entries.push(entry),
            Err(e) => parsed.rejected.push(e),
        }
    }
    Ok(parsed)
}

/// Client for the arXiv export API.
#[derive(Debug, Clone)]
pub struct ArxivClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl ArxivClient {
    /// Build a client for `endpoint` (usually [`DEFAULT_ENDPOINT`]).
    ///
    /// No request timeout is configured.
    pub fn new(endpoint: &str) -> Result<Self, FeedError> {
        let endpoint = Url::parse(endpoint)?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("arxiv_digest/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, endpoint })
    }

    /// The full request URL for `query`, with every parameter form-encoded.
    pub fn search_url(&self, query: &SearchQuery, max_results: usize) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("search_query", &query.expression())
            .append_pair("start", "0")
            .append_pair("max_results", &max_results.to_string())
            .append_pair("sortBy", "submittedDate")
            .append_pair("sortOrder", "descending");
        url
    }

    /// Run `query` and return up to `max_results` entries, newest submission first.
    #[instrument(level = "info", skip(self, query), fields(query = %query))]
    pub async fn search(
        &self,
        query: &SearchQuery,
        max_results: usize,
    ) -> Result<Vec<PaperEntry>, FeedError> {
        let url = self.search_url(query, max_results);
        info!(%url, "Querying arXiv");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        debug!(bytes = body.len(), preview = %truncate_for_log(&body, 300), "Received feed");

        let parsed = parse_feed(&body)?;
        for rejected in &parsed.rejected {
            warn!(error = %rejected, "Skipping incomplete feed entry");
        }
        info!(
            count = parsed.entries.len(),
            rejected = parsed.rejected.len(),
            "Parsed arXiv entries"
        );
        Ok(parsed.entries)
    }

    /// Run `query` restricted to papers submitted `day_offset` days before
    /// today's local date (0 = today, 1 = yesterday).
    pub async fn search_on_day(
        &self,
        query: &SearchQuery,
        day_offset: u32,
        max_results: usize,
    ) -> Result<Vec<PaperEntry>, FeedError> {
        let day = day_for_offset(Local::now().date_naive(), day_offset);
        self.search_for_day(query, day, max_results).await
    }

    /// Run `query` restricted to papers submitted on `day`.
    #[instrument(level = "info", skip(self, query))]
    pub async fn search_for_day(
        &self,
        query: &SearchQuery,
        day: NaiveDate,
        max_results: usize,
    ) -> Result<Vec<PaperEntry>, FeedError> {
        let windowed = query.clone().on_day(day);
        let entries = self.search(&windowed, max_results).await?;
        info!(count = entries.len(), %day, "Found papers submitted on day");
        Ok(entries)
    }
}
