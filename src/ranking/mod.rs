//! Relevance scoring, ranking and extractive summarization.
//!
//! Everything in this module is pure and synchronous:
//!
//! - [`normalize`]: raw text to filtered tokens
//! - [`score`]: query-local relevance of a text
//! - [`rank`]: stable ordering of a batch of papers, with a top-K prefix
//! - [`summarize`]: short extractive summary of an abstract
//!
//! ```rust
//! use paper_ranker::models::{PaperBuilder, Query};
//! use paper_ranker::ranking::{rank, summarize};
//!
//! let query = Query::parse("graph, diffusion, protein, folding").unwrap();
//! let papers = vec![
//!     PaperBuilder::new("Graph diffusion", "id-1", "pdf-1").build(),
//!     PaperBuilder::new("Unrelated", "id-2", "pdf-2").build(),
//! ];
//! let ranked = rank(&query, papers, 5);
//! assert_eq!(ranked.all[0].paper.title, "Graph diffusion");
//!
//! let summary = summarize("Short text.", 4);
//! assert_eq!(summary, "Short text.");
//! ```

mod normalize;
mod ranker;
mod scorer;
mod stopwords;
mod summarizer;

pub use normalize::normalize;
pub use ranker::{preview, rank, DEFAULT_TOP_K, PREVIEW_CHARS};
pub use scorer::{normalize_keywords, score, score_breakdown, score_tokens, RelevanceScore};
pub use stopwords::{is_stopword, ENGLISH_STOPWORDS};
pub use summarizer::{
    score_sentence, split_sentences, summarize, truncate, DEFAULT_MAX_SENTENCES,
    NUMBER_BONUS, SHORT_TEXT_LIMIT, SIGNAL_WORDS, SIGNAL_WORD_BONUS,
};
