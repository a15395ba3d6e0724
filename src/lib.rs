//! # paper-ranker
//!
//! Search arXiv by keyword, rank the returned papers by a query-local
//! relevance score and summarize abstracts extractively. Available as a CLI
//! and as a Model Context Protocol (MCP) server.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (Paper, Query, ranking results)
//! - [`ranking`]: Text normalization, relevance scoring, ranking and summaries
//! - [`sources`]: Search providers behind the [`Source`] trait
//! - [`service`]: Search, lookup and download operations shared by all frontends
//! - [`mcp`]: MCP protocol implementation and server
//! - [`utils`]: HTTP client, retry and file name helpers
//! - [`config`]: Configuration management

pub mod config;
pub mod mcp;
pub mod models;
pub mod ranking;
pub mod service;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use models::{Paper, Query};
pub use service::{PaperService, ServiceError};
pub use sources::{ArxivSource, Source};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
