//! Core data models for papers, queries and ranking results.

mod paper;
mod search;

pub use paper::{Paper, PaperBuilder};
pub use search::{
    DownloadResult, HealthStatus, PaperDetail, Query, QueryError, RankedPapers, ScoredPaper,
    SearchRequest, SearchResponse,
};
