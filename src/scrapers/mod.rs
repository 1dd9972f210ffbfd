//! Paper feed clients.
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | arXiv | [`arxiv`] | Atom export API | Single page per query, sorted by submission date |
//!
//! A client builds the request from a [`crate::query::SearchQuery`], fetches
//! one page and returns validated [`crate::models::PaperEntry`] values.
//! Entries that fail validation are logged and skipped without failing the
//! whole query.

pub mod arxiv;
