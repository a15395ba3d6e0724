//! Mock source for testing purposes.

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::models::{Paper, PaperBuilder, SearchRequest};
use crate::sources::{Source, SourceCapabilities, SourceError};

/// A mock source that returns predefined papers and records requests.
#[derive(Debug, Default)]
pub struct MockSource {
    papers: Mutex<Vec<Paper>>,
    requests: Mutex<Vec<SearchRequest>>,
    pdf_bytes: Mutex<Vec<u8>>,
    search_only: bool,
}

impl MockSource {
    /// Create a new mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock source that cannot download.
    pub fn search_only() -> Self {
        Self {
            search_only: true,
            ..Self::default()
        }
    }

    /// Create a mock source returning `papers`.
    pub fn with_papers(papers: Vec<Paper>) -> Self {
        let source = Self::new();
        source.set_papers(papers);
        source
    }

    /// Set the papers to return.
    pub fn set_papers(&self, papers: Vec<Paper>) {
        *self.papers.lock().unwrap() = papers;
    }

    /// Set the bytes written by `download`.
    pub fn set_pdf_bytes(&self, bytes: impl Into<Vec<u8>>) {
        *self.pdf_bytes.lock().unwrap() = bytes.into();
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Source for MockSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Source"
    }

    fn capabilities(&self) -> SourceCapabilities {
        if self.search_only {
            SourceCapabilities::SEARCH
        } else {
            SourceCapabilities::SEARCH | SourceCapabilities::DOWNLOAD
        }
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<Paper>, SourceError> {
        self.requests.lock().unwrap().push(request.clone());
        let papers = self.papers.lock().unwrap();
        Ok(papers.iter().take(request.max_results).cloned().collect())
    }

    async fn download(&self, _paper: &Paper, destination: &Path) -> Result<u64, SourceError> {
        let bytes = self.pdf_bytes.lock().unwrap().clone();
        tokio::fs::write(destination, &bytes).await?;
        Ok(bytes.len() as u64)
    }
}

/// Helper function to create a mock paper for testing.
pub fn make_paper(id: &str, title: &str, abstract_text: &str) -> Paper {
    PaperBuilder::new(
        title,
        format!("http://arxiv.org/abs/{}", id),
        format!("http://arxiv.org/pdf/{}", id),
    )
    .abstract_text(abstract_text)
    .author("Test Author")
    .build()
}
