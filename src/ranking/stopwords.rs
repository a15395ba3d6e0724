//! Closed list of English stopwords used by the normalizer.

use std::collections::HashSet;
use std::sync::LazyLock;

/// English function words excluded from scoring and matching.
///
/// The list is fixed; changing it changes every score.
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "a", "about", "all", "am", "an", "and", "any", "are", "as", "at", "be", "because", "been",
    "being", "between", "both", "but", "by", "can", "did", "do", "does", "each", "few", "for",
    "from", "had", "has", "have", "he", "her", "here", "him", "his", "i", "if", "in", "into", "is",
    "it", "its", "just", "me", "more", "most", "my", "no", "not", "now", "of", "on", "only", "or",
    "other", "our", "out", "over", "she", "should", "so", "some", "such", "than", "that", "the",
    "their", "them", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "will",
    "with", "you", "your",
];

static STOPWORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ENGLISH_STOPWORDS.iter().copied().collect());

/// Check whether a lowercase token is a stopword.
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_words_are_stopwords() {
        for word in ["the", "and", "with", "our", "their", "which"] {
            assert!(is_stopword(word), "{word} should be a stopword");
        }
    }

    #[test]
    fn test_content_words_are_not_stopwords() {
        for word in ["transformer", "attention", "method", "results", "self", "using"] {
            assert!(!is_stopword(word), "{word} should not be a stopword");
        }
    }

    #[test]
    fn test_list_is_lowercase_and_unique() {
        let unique: HashSet<_> = ENGLISH_STOPWORDS.iter().collect();
        assert_eq!(unique.len(), ENGLISH_STOPWORDS.len());
        assert!(ENGLISH_STOPWORDS
            .iter()
            .all(|w| w.chars().all(|c| c.is_ascii_lowercase())));
    }
}
