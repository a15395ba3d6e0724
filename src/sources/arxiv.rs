//! arXiv research source implementation.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use feed_rs::parser;
use url::Url;

use crate::models::{Paper, PaperBuilder, Query, SearchRequest};
use crate::sources::{Source, SourceCapabilities, SourceError};
use crate::utils::{api_retry_config, with_retry, HttpClient, RetryConfig};

/// Base URL for arXiv API
pub const ARXIV_API_URL: &str = "http://export.arxiv.org/api/query";
/// Base URL for arXiv PDFs
const ARXIV_PDF_URL: &str = "https://arxiv.org/pdf";
/// Largest page the arXiv API serves comfortably
const ARXIV_MAX_RESULTS: usize = 200;

/// arXiv research source
///
/// Supports:
/// - Search by keywords, in arXiv's relevance order
/// - Download PDFs
#[derive(Debug, Clone)]
pub struct ArxivSource {
    client: Arc<HttpClient>,
    api_url: String,
    retry: RetryConfig,
}

impl ArxivSource {
    /// Create a new arXiv source
    pub fn new() -> Result<Self, SourceError> {
        Ok(Self::with_client(Arc::new(HttpClient::new()?)))
    }

    /// Create with a custom HTTP client
    pub fn with_client(client: Arc<HttpClient>) -> Self {
        Self {
            client,
            api_url: ARXIV_API_URL.to_string(),
            retry: api_retry_config(),
        }
    }

    /// Point the source at a different API endpoint
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Override the retry policy
    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Build the `search_query` expression: every keyword searched in all
    /// fields, alternatives joined with `OR`
    fn build_search_query(query: &Query) -> String {
        query
            .keywords
            .iter()
            .map(|keyword| {
                if keyword.contains(char::is_whitespace) {
                    format!("all:\"{}\"", keyword)
                } else {
                    format!("all:{}", keyword)
                }
            })
            .collect::<Vec<_>>()
            .join(" OR ")
    }

    fn search_url(&self, request: &SearchRequest) -> Result<Url, SourceError> {
        let search_query = Self::build_search_query(&request.query);
        if search_query.is_empty() {
            return Err(SourceError::InvalidRequest("Empty query".to_string()));
        }

        let max_results = request.max_results.min(ARXIV_MAX_RESULTS).to_string();

        Url::parse_with_params(
            &self.api_url,
            &[
                ("search_query", search_query.as_str()),
                ("start", "0"),
                ("max_results", max_results.as_str()),
                ("sortBy", "relevance"),
                ("sortOrder", "descending"),
            ],
        )
        .map_err(|e| SourceError::InvalidRequest(format!("Invalid API URL: {}", e)))
    }

    /// Parse an Atom feed body into papers, keeping feed order
    fn parse_feed(body: &[u8]) -> Result<Vec<Paper>, SourceError> {
        let feed = parser::parse(body)
            .map_err(|e| SourceError::Parse(format!("Failed to parse Atom feed: {}", e)))?;

        Ok(feed.entries.iter().map(Self::parse_entry).collect())
    }

    /// Parse arXiv Atom feed entry into Paper
    fn parse_entry(entry: &feed_rs::model::Entry) -> Paper {
        let title = entry
            .title
            .as_ref()
            .map(|t| collapse_whitespace(&t.content))
            .unwrap_or_default();

        let pdf_url = entry
            .links
            .iter()
            .find(|link| {
                link.media_type.as_deref() == Some("application/pdf")
                    || link.title.as_deref() == Some("pdf")
            })
            .map(|link| link.href.clone())
            .unwrap_or_else(|| {
                let short_id = entry.id.rsplit("/abs/").next().unwrap_or(&entry.id);
                format!("{}/{}", ARXIV_PDF_URL, short_id)
            });

        let mut builder = PaperBuilder::new(title, entry.id.clone(), pdf_url)
            .authors(entry.authors.iter().map(|a| a.name.trim().to_string()));

        // arXiv hard-wraps abstracts; the line breaks carry no meaning.
        if let Some(summary) = entry.summary.as_ref() {
            let text = collapse_whitespace(&summary.content);
            if !text.is_empty() {
                builder = builder.abstract_text(text);
            }
        }

        if let Some(published) = entry.published {
            builder = builder.published_date(published.date_naive());
        }

        builder.build()
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[async_trait]
impl Source for ArxivSource {
    fn id(&self) -> &str {
        "arxiv"
    }

    fn name(&self) -> &str {
        "arXiv"
    }

    fn capabilities(&self) -> SourceCapabilities {
        SourceCapabilities::SEARCH | SourceCapabilities::DOWNLOAD
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<Paper>, SourceError> {
        let url = self.search_url(request)?;
        tracing::info!("Searching arXiv: {}", request.query.search_expression());
        tracing::debug!("arXiv request: {}", url);

        let body = with_retry(self.retry, || {
            let client = Arc::clone(&self.client);
            let url = url.clone();
            async move {
                let response = client
                    .client()
                    .get(url)
                    .header("Accept", "application/atom+xml")
                    .send()
                    .await
                    .map_err(|e| {
                        SourceError::Network(format!("Failed to fetch arXiv results: {}", e))
                    })?;

                let status = response.status();
                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    return Err(SourceError::RateLimit);
                }
                if !status.is_success() {
                    return Err(SourceError::Api(format!(
                        "arXiv API returned status: {}",
                        status
                    )));
                }

                response
                    .bytes()
                    .await
                    .map_err(|e| SourceError::Network(format!("Failed to read response: {}", e)))
            }
        })
        .await?;

        let papers = Self::parse_feed(&body)?;
        tracing::info!("Found {} papers on arXiv", papers.len());
        Ok(papers)
    }

    async fn download(&self, paper: &Paper, destination: &Path) -> Result<u64, SourceError> {
        tracing::info!("Downloading {} to {}", paper.pdf_url, destination.display());
        with_retry(self.retry, || self.client.download_to(&paper.pdf_url, destination)).await
    }
}
