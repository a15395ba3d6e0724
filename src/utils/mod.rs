//! Utility modules supporting provider access and downloads.
//!
//! - [`HttpClient`]: shared HTTP client with timeouts and file downloads
//! - [`RetryConfig`] / [`with_retry`]: retry transient provider errors with backoff
//! - [`safe_filename`]: turn a paper title into a PDF file name
//!
//! # Retry with Backoff
//!
//! ```rust,no_run
//! use paper_ranker::sources::SourceError;
//! use paper_ranker::utils::{with_retry, RetryConfig};
//!
//! # async fn fetch_feed() -> Result<String, SourceError> { Ok("feed".to_string()) }
//! # #[tokio::main]
//! # async fn main() -> Result<(), SourceError> {
//! let config = RetryConfig::default().max_attempts(3);
//! let feed = with_retry(config, || fetch_feed()).await?;
//! # Ok(())
//! # }
//! ```

mod filename;
mod http;
mod retry;

pub use filename::{safe_filename, MAX_TITLE_CHARS};
pub use http::{HttpClient, DEFAULT_TIMEOUT};
pub use retry::{api_retry_config, with_retry, RetryConfig, TransientError};
