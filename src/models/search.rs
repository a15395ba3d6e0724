//! Query, ranking result and request/response models.

use serde::{Deserialize, Serialize};

use crate::models::Paper;

/// A keyword query
///
/// Keywords keep their order and duplicates; matching is case-insensitive
/// because the normalizer lowercases everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Keywords as supplied by the caller
    pub keywords: Vec<String>,
}

/// Errors raised while parsing a raw keyword string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("No keywords provided")]
    Empty,
}

impl Query {
    /// Create a query from keywords without validation
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a comma-separated keyword string
    ///
    /// Each piece is trimmed and empty pieces are dropped. Fails when nothing
    /// is left.
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        let keywords: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect();

        if keywords.is_empty() {
            return Err(QueryError::Empty);
        }

        Ok(Self { keywords })
    }

    /// Whether the query has no keywords
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Keywords joined with `OR`, as sent to the provider
    pub fn search_expression(&self) -> String {
        self.keywords.join(" OR ")
    }
}

/// Provider search parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Query to search for
    pub query: Query,

    /// Maximum number of results to fetch
    pub max_results: usize,
}

impl SearchRequest {
    /// Create a new search request
    pub fn new(query: Query) -> Self {
        Self {
            query,
            max_results: 20,
        }
    }

    /// Set maximum results
    pub fn max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }
}

/// A paper with its relevance score and positions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPaper {
    /// 1-based position in provider order, used to address the paper later
    pub id: usize,

    /// 1-based position after ranking
    pub rank: usize,

    /// Relevance score (may be zero or negative)
    pub score: f64,

    /// Distinct keyword tokens found in the paper
    pub matched_keyword_count: usize,

    /// Abstract shortened for list display
    pub preview: String,

    /// The paper itself
    pub paper: Paper,
}

/// Output of the ranker
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankedPapers {
    /// Every paper, best first
    pub all: Vec<ScoredPaper>,

    /// Prefix of `all` holding the top-K papers
    pub top: Vec<ScoredPaper>,
}

/// Response of a ranked search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Parsed query
    pub query: Query,

    /// Ranked papers
    pub papers: RankedPapers,

    /// Number of papers returned by the provider
    pub total: usize,
}

/// A single paper with its extractive summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperDetail {
    /// 1-based position in provider order
    pub id: usize,

    /// Relevance score for the query used to look the paper up
    pub score: f64,

    /// Extractive summary of the abstract
    pub summary: String,

    /// The paper itself
    pub paper: Paper,
}

/// Result of a download operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadResult {
    /// File name the PDF was saved under
    pub filename: String,

    /// Path where the file was saved
    pub path: String,

    /// Number of bytes written
    pub bytes: u64,
}

impl DownloadResult {
    /// Create a download result
    pub fn new(filename: impl Into<String>, path: impl Into<String>, bytes: u64) -> Self {
        Self {
            filename: filename.into(),
            path: path.into(),
            bytes,
        }
    }
}

/// Liveness report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub papers_dir: bool,
}
