//! Query-local relevance scoring.
//!
//! The score follows TF-IDF intuition without a corpus: term frequency is
//! measured against the paper's own tokens, and the "IDF" term uses the
//! query's token count as its reference set. When a paper matches more
//! distinct keyword forms than the query has tokens minus one, the logarithm
//! goes negative and so does the score. Callers rank on the raw value.

use std::collections::HashSet;

use super::normalize::normalize;
use crate::models::Query;

/// Full breakdown of a relevance computation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RelevanceScore {
    /// Final score, `tf * idf * (1 + match_bonus)`
    pub score: f64,
    /// Paper tokens that are keyword tokens, duplicates counted
    pub keyword_frequency: usize,
    /// Distinct tokens present in both the paper and the query
    pub unique_keywords_in_paper: usize,
    /// Distinct keyword tokens found anywhere in the paper
    pub exact_matches: usize,
}

/// Normalize a query's keywords into one token sequence.
pub fn normalize_keywords(query: &Query) -> Vec<String> {
    normalize(&query.keywords.join(" "))
}

/// Relevance of `text` for `query`.
pub fn score(query: &Query, text: &str) -> f64 {
    score_breakdown(query, text).score
}

/// Relevance of `text` for `query`, with the intermediate counts.
pub fn score_breakdown(query: &Query, text: &str) -> RelevanceScore {
    score_tokens(&normalize_keywords(query), &normalize(text))
}

/// Score already-normalized token sequences.
///
/// Lets the ranker normalize the query once for a whole batch.
pub fn score_tokens(keyword_tokens: &[String], paper_tokens: &[String]) -> RelevanceScore {
    if keyword_tokens.is_empty() || paper_tokens.is_empty() {
        return RelevanceScore::default();
    }

    let keyword_set: HashSet<&str> = keyword_tokens.iter().map(String::as_str).collect();

    let keyword_frequency = paper_tokens
        .iter()
        .filter(|t| keyword_set.contains(t.as_str()))
        .count();
    let tf = keyword_frequency as f64 / paper_tokens.len() as f64;

    let paper_set: HashSet<&str> = paper_tokens.iter().map(String::as_str).collect();
    let unique_keywords_in_paper = paper_set.intersection(&keyword_set).count();

    // Query length is the raw token count, duplicates included.
    let query_len = keyword_tokens.len() as f64;
    let idf = (query_len / (unique_keywords_in_paper as f64 + 1.0)).ln();

    let exact_matches = keyword_set
        .iter()
        .filter(|k| paper_set.contains(*k))
        .count();
    let match_bonus = exact_matches as f64 / query_len;

    RelevanceScore {
        score: tf * idf * (1.0 + match_bonus),
        keyword_frequency,
        unique_keywords_in_paper,
        exact_matches,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABSTRACT: &str = "We propose a transformer model using self attention mechanisms. \
        Our method shows strong results on benchmark tasks. \
        The attention mechanism scales efficiently.";

    #[test]
    fn test_empty_query_scores_zero() {
        assert_eq!(score(&Query::default(), ABSTRACT), 0.0);
        // Keywords that normalize away count as empty.
        assert_eq!(score(&Query::new(["the", "of", "ai"]), ABSTRACT), 0.0);
    }

    #[test]
    fn test_empty_text_scores_zero() {
        let query = Query::new(["transformer"]);
        assert_eq!(score(&query, ""), 0.0);
        assert_eq!(score(&query, "the and of"), 0.0);
    }

    #[test]
    fn test_transformer_attention_is_negative() {
        let query = Query::new(["transformer", "attention"]);
        let result = score_breakdown(&query, ABSTRACT);

        assert_eq!(result.keyword_frequency, 3);
        assert_eq!(result.unique_keywords_in_paper, 2);
        assert_eq!(result.exact_matches, 2);

        let expected = (3.0 / 17.0) * (2.0f64 / 3.0).ln() * 2.0;
        assert!((result.score - expected).abs() < 1e-12);
        assert!(result.score < 0.0);
    }

    #[test]
    fn test_duplicate_keywords_inflate_idf() {
        let single = score(&Query::new(["attention"]), ABSTRACT);
        let tripled = score(&Query::new(["attention", "attention", "attention"]), ABSTRACT);

        // ln(1/2) for one keyword, ln(3/2) for three copies.
        assert!(single < 0.0);
        assert!(tripled > 0.0);
    }

    #[test]
    fn test_positive_when_query_longer_than_matches() {
        let query = Query::new(["transformer", "graph", "diffusion", "protein"]);
        let result = score_breakdown(&query, ABSTRACT);

        assert_eq!(result.exact_matches, 1);
        let expected = (1.0 / 17.0) * (4.0f64 / 2.0).ln() * (1.0 + 0.25);
        assert!((result.score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_no_match_is_zero_magnitude() {
        let query = Query::new(["protein", "folding"]);
        let value = score(&query, ABSTRACT);
        assert_eq!(value, 0.0);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let lower = score(&Query::new(["transformer", "graph", "protein"]), ABSTRACT);
        let upper = score(&Query::new(["TRANSFORMER", "Graph", "PROTEIN"]), ABSTRACT);
        assert_eq!(lower.to_bits(), upper.to_bits());
    }

    #[test]
    fn test_deterministic() {
        let query = Query::new(["attention", "benchmark", "model"]);
        let first = score(&query, ABSTRACT);
        for _ in 0..10 {
            assert_eq!(score(&query, ABSTRACT).to_bits(), first.to_bits());
        }
    }

    #[test]
    fn test_concurrent_scoring_matches_serial() {
        let queries = [
            Query::new(["attention", "benchmark", "model"]),
            Query::new(["transformer", "attention"]),
            Query::new(["transformer", "graph", "diffusion", "protein"]),
            Query::new(["protein", "folding"]),
        ];
        let serial: Vec<u64> = queries.iter().map(|q| score(q, ABSTRACT).to_bits()).collect();

        let parallel: Vec<Vec<u64>> = std::thread::scope(|scope| {
            let workers: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        queries
                            .iter()
                            .map(|q| score(q, ABSTRACT).to_bits())
                            .collect::<Vec<u64>>()
                    })
                })
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).collect()
        });

        for bits in parallel {
            assert_eq!(bits, serial);
        }
    }
}
