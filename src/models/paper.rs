//! Paper model representing a document returned by the search provider.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A research paper as retrieved from the provider
///
/// Papers are immutable once built; ranking and summarization only read them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    /// Paper title
    pub title: String,

    /// Abstract text, absent when the provider returned none
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,

    /// Author names in provider order
    pub authors: Vec<String>,

    /// Publication date
    pub published_date: Option<NaiveDate>,

    /// Provider entry identifier (for arXiv, the abstract page URL)
    pub entry_id: String,

    /// Direct PDF URL
    pub pdf_url: String,
}

impl Paper {
    /// Create a new paper with required fields
    pub fn new(title: String, entry_id: String, pdf_url: String) -> Self {
        Self {
            title,
            abstract_text: None,
            authors: Vec::new(),
            published_date: None,
            entry_id,
            pdf_url,
        }
    }

    /// Abstract text, or an empty string when absent
    pub fn abstract_or_empty(&self) -> &str {
        self.abstract_text.as_deref().unwrap_or("")
    }

    /// Text used for relevance scoring: title and full abstract
    pub fn scoring_text(&self) -> String {
        format!("{} {}", self.title, self.abstract_or_empty())
    }

    /// Publication date as `YYYY-MM-DD`, or `N/A`
    pub fn published_display(&self) -> String {
        self.published_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }

    /// Authors joined for display
    pub fn authors_display(&self) -> String {
        self.authors.join(", ")
    }
}

/// Builder for constructing Paper objects
#[derive(Debug, Clone)]
pub struct PaperBuilder {
    paper: Paper,
}

impl PaperBuilder {
    /// Create a new builder with required fields
    pub fn new(
        title: impl Into<String>,
        entry_id: impl Into<String>,
        pdf_url: impl Into<String>,
    ) -> Self {
        Self {
            paper: Paper::new(title.into(), entry_id.into(), pdf_url.into()),
        }
    }

    /// Set abstract
    pub fn abstract_text(mut self, abstract_text: impl Into<String>) -> Self {
        self.paper.abstract_text = Some(abstract_text.into());
        self
    }

    /// Add a single author
    pub fn author(mut self, name: impl Into<String>) -> Self {
        self.paper.authors.push(name.into());
        self
    }

    /// Set all authors
    pub fn authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paper.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    /// Set publication date
    pub fn published_date(mut self, date: NaiveDate) -> Self {
        self.paper.published_date = Some(date);
        self
    }

    /// Build the Paper
    pub fn build(self) -> Paper {
        self.paper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paper_builder() {
        let paper = PaperBuilder::new(
            "Test Paper",
            "http://arxiv.org/abs/2301.12345v1",
            "http://arxiv.org/pdf/2301.12345v1",
        )
        .authors(["John Doe", "Jane Smith"])
        .abstract_text("This is a test abstract.")
        .published_date(NaiveDate::from_ymd_opt(2023, 1, 15).unwrap())
        .build();

        assert_eq!(paper.title, "Test Paper");
        assert_eq!(paper.authors, vec!["John Doe", "Jane Smith"]);
        assert_eq!(paper.published_display(), "2023-01-15");
        assert_eq!(paper.authors_display(), "John Doe, Jane Smith");
    }

    #[test]
    fn test_scoring_text_without_abstract() {
        let paper = Paper::new("Title".into(), "id".into(), "pdf".into());
        assert_eq!(paper.scoring_text(), "Title ");
        assert_eq!(paper.abstract_or_empty(), "");
        assert_eq!(paper.published_display(), "N/A");
    }

    #[test]
    fn test_serializes_abstract_field_name() {
        let paper = PaperBuilder::new("T", "id", "pdf")
            .abstract_text("A")
            .build();
        let value = serde_json::to_value(&paper).unwrap();
        assert_eq!(value["abstract"], "A");
        assert!(value["published_date"].is_null());
    }
}
