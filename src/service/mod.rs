//! Search, lookup and download operations over a [`Source`].
//!
//! [`PaperService`] is the single entry point shared by the CLI and the MCP
//! server. It parses raw keyword strings, fetches papers from the source,
//! ranks them and summarizes abstracts.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::models::{
    DownloadResult, HealthStatus, Paper, PaperDetail, Query, QueryError, SearchRequest,
    SearchResponse,
};
use crate::ranking::{rank, score, summarize};
use crate::sources::{Source, SourceError};
use crate::utils::safe_filename;

/// Errors surfaced by service operations
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Keyword string was empty after parsing
    #[error(transparent)]
    InvalidQuery(#[from] QueryError),

    /// Nothing matched the request
    #[error("{0}")]
    NotFound(String),

    /// The source cannot perform the operation
    #[error("{0}")]
    Unsupported(String),

    /// The provider failed
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Local file system failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Paper search service
#[derive(Debug, Clone)]
pub struct PaperService {
    source: Arc<dyn Source>,
    config: Config,
}

impl PaperService {
    /// Create a service over `source`
    pub fn new(source: Arc<dyn Source>, config: Config) -> Self {
        Self { source, config }
    }

    /// Effective configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Search the source and rank the results
    pub async fn search(&self, raw_keywords: &str) -> Result<SearchResponse, ServiceError> {
        self.search_with(raw_keywords, self.config.search.max_results, self.config.ranking.top_k)
            .await
    }

    /// Search with explicit result and top-K limits
    pub async fn search_with(
        &self,
        raw_keywords: &str,
        max_results: usize,
        top_k: usize,
    ) -> Result<SearchResponse, ServiceError> {
        let query = Query::parse(raw_keywords)?;
        let papers = self.fetch(&query, max_results).await?;

        if papers.is_empty() {
            return Err(ServiceError::NotFound("No papers found".to_string()));
        }

        let total = papers.len();
        let ranked = rank(&query, papers, top_k);
        tracing::info!(
            "Ranked {} papers for '{}', top score {:.4}",
            total,
            query.search_expression(),
            ranked.all.first().map(|p| p.score).unwrap_or_default()
        );

        Ok(SearchResponse {
            query,
            papers: ranked,
            total,
        })
    }

    /// Look a paper up by its 1-based provider position and summarize it
    ///
    /// Without keywords the configured default query is used.
    pub async fn paper_detail(
        &self,
        id: usize,
        raw_keywords: Option<&str>,
    ) -> Result<PaperDetail, ServiceError> {
        self.paper_detail_with(id, raw_keywords, self.config.ranking.summary_sentences)
            .await
    }

    /// Like [`paper_detail`](Self::paper_detail) with an explicit summary length
    pub async fn paper_detail_with(
        &self,
        id: usize,
        raw_keywords: Option<&str>,
        max_sentences: usize,
    ) -> Result<PaperDetail, ServiceError> {
        let query = match Query::parse(raw_keywords.unwrap_or_default()) {
            Ok(query) => query,
            Err(QueryError::Empty) => Query::new([self.config.search.default_query.as_str()]),
        };

        let paper = self.lookup(&query, id).await?;
        let relevance = score(&query, &paper.scoring_text());
        let summary = summarize(paper.abstract_or_empty(), max_sentences);

        Ok(PaperDetail {
            id,
            score: relevance,
            summary,
            paper,
        })
    }

    /// Download a paper's PDF into the configured directory
    pub async fn download(
        &self,
        id: usize,
        raw_keywords: &str,
    ) -> Result<DownloadResult, ServiceError> {
        let directory = self.config.downloads.directory.clone();
        self.download_to(id, raw_keywords, directory).await
    }

    /// Download a paper's PDF into `directory`, creating it when missing
    pub async fn download_to(
        &self,
        id: usize,
        raw_keywords: &str,
        directory: PathBuf,
    ) -> Result<DownloadResult, ServiceError> {
        if !self.source.supports_download() {
            return Err(ServiceError::Unsupported(format!(
                "Source '{}' does not support downloads",
                self.source.id()
            )));
        }

        let query = Query::parse(raw_keywords)?;
        let paper = self.lookup(&query, id).await?;

        tokio::fs::create_dir_all(&directory).await?;

        let filename = safe_filename(&paper.title, id);
        let path = directory.join(&filename);
        let bytes = self.source.download(&paper, &path).await?;

        tracing::info!("Saved '{}' to {} ({} bytes)", paper.title, path.display(), bytes);

        Ok(DownloadResult::new(
            filename,
            path.to_string_lossy().into_owned(),
            bytes,
        ))
    }

    /// Liveness report
    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "healthy".to_string(),
            papers_dir: self.config.downloads.directory.exists(),
        }
    }

    async fn fetch(&self, query: &Query, max_results: usize) -> Result<Vec<Paper>, ServiceError> {
        let request = SearchRequest::new(query.clone()).max_results(max_results);
        tracing::debug!("Fetching up to {} papers from {}", max_results, self.source.name());
        Ok(self.source.search(&request).await?)
    }

    async fn lookup(&self, query: &Query, id: usize) -> Result<Paper, ServiceError> {
        let papers = self
            .fetch(query, self.config.search.detail_max_results)
            .await?;

        id.checked_sub(1)
            .and_then(|index| papers.into_iter().nth(index))
            .ok_or_else(|| ServiceError::NotFound("Paper not found".to_string()))
    }
}
