//! Library side of arxiv_digest: feed access, query building and report output.
//!
//! The binary in `main.rs` wires these together; they are exposed here so
//! other tools can reuse the client and renderer.

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod outputs;
pub mod query;
pub mod scrapers;
pub mod utils;
