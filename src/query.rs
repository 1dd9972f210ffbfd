//! Search expressions in the arXiv field-query language.
//!
//! A [`SearchQuery`] holds the human form of the expression (spaces, quotes,
//! colons as-is). Percent-encoding happens once, when the request URL is
//! assembled in [`crate::scrapers::arxiv`].
//!
//! ```ignore
//! let q = SearchQuery::all("LLM").and(SearchQuery::all("reinforcement learning"));
//! assert_eq!(q.expression(), r#"all:LLM AND all:"reinforcement learning""#);
//! ```

use chrono::{Days, NaiveDate};
use std::fmt;

/// An inclusive calendar-day filter on submission time.
///
/// Rendered as two minute-precision bounds, `YYYYMMDD0000` to `YYYYMMDD2359`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub day: NaiveDate,
}

impl DayWindow {
    pub fn new(day: NaiveDate) -> Self {
        Self { day }
    }

    /// The window as a `submittedDate` range clause.
    pub fn clause(&self) -> String {
        let d = self.day.format("%Y%m%d");
        format!("submittedDate:[{d}0000 TO {d}2359]")
    }
}

/// A search expression plus an optional day window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    expr: String,
    window: Option<DayWindow>,
}

impl SearchQuery {
    /// Match `term` in any field. Terms with whitespace are quoted as a phrase.
    pub fn all(term: &str) -> Self {
        Self::field("all", term)
    }

    /// Match `term` in a specific field prefix (`ti`, `au`, `abs`, `cat`, ...).
    pub fn field(prefix: &str, term: &str) -> Self {
        let term = term.trim();
        let expr = if term.contains(char::is_whitespace) {
            format!("{prefix}:\"{}\"", term.replace('"', ""))
        } else {
            format!("{prefix}:{term}")
        };
        Self { expr, window: None }
    }

    /// Accept a query written in URL-ready form, as found in job files:
    /// `all:LLM+AND+all:"reinforcement%20learning"`.
    ///
    /// `+` becomes a space and `%XX` sequences are decoded, so the request
    /// encoder does not encode them a second time. Input that is not valid
    /// percent-encoded UTF-8 is kept with only the `+` substitution applied.
    pub fn from_literal(literal: &str) -> Self {
        let spaced = literal.trim().replace('+', " ");
        let expr = match urlencoding::decode(&spaced) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => spaced,
        };
        Self { expr, window: None }
    }

    /// Both this expression and `other` must match.
    pub fn and(self, other: SearchQuery) -> Self {
        Self {
            expr: format!("{} AND {}", self.expr, other.expr),
            window: self.window.or(other.window),
        }
    }

    /// Restrict results to papers submitted on `day`.
    pub fn on_day(mut self, day: NaiveDate) -> Self {
        self.window = Some(DayWindow::new(day));
        self
    }

    /// The full expression sent as `search_query`, before percent-encoding.
    pub fn expression(&self) -> String {
        match &self.window {
            Some(window) => format!("({}) AND {}", self.expr, window.clause()),
            None => self.expr.clone(),
        }
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression())
    }
}

/// The calendar day `offset` days before `today` (0 = today, 1 = yesterday).
///
/// Saturates at the earliest representable date.
pub fn day_for_offset(today: NaiveDate, offset: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(offset)))
        .unwrap_or(NaiveDate::MIN)
}
