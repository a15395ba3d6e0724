//! Text normalization: casing, punctuation stripping, stopword and length filtering.

use super::stopwords::is_stopword;

/// Tokens of this many characters or fewer are dropped.
const MAX_SHORT_TOKEN_LEN: usize = 2;

/// Turn raw text into a filtered token sequence.
///
/// Lowercases the text, removes ASCII punctuation, splits into words, then
/// drops stopwords and tokens of two characters or fewer. Token order is
/// preserved and duplicates are kept.
pub fn normalize(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let stripped: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();

    tokenize(&stripped)
        .filter(|token| !is_stopword(token))
        .filter(|token| token.chars().count() > MAX_SHORT_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}

/// Split on whitespace and on any leftover non-alphanumeric character
/// (Unicode dashes, quotes, symbols), which a word tokenizer would separate.
fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() || !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(normalize("").is_empty());
        assert!(normalize("   \n\t ").is_empty());
    }

    #[test]
    fn test_lowercase_and_punctuation() {
        assert_eq!(
            normalize("Deep-Learning, (Graph) NETWORKS!"),
            vec!["deeplearning", "graph", "networks"]
        );
    }

    #[test]
    fn test_contractions_are_joined() {
        assert_eq!(normalize("model's don't"), vec!["models", "dont"]);
    }

    #[test]
    fn test_stopwords_and_short_tokens_dropped() {
        assert_eq!(
            normalize("We use a GAN in the lab on AI"),
            vec!["use", "gan", "lab"]
        );
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        assert_eq!(
            normalize("attention beats attention"),
            vec!["attention", "beats", "attention"]
        );
    }

    #[test]
    fn test_unicode_punctuation_splits_words() {
        assert_eq!(
            normalize("encoder\u{2014}decoder \u{201c}models\u{201d}"),
            vec!["encoder", "decoder", "models"]
        );
    }

    #[test]
    fn test_length_counts_characters() {
        // Two characters, four bytes.
        assert!(normalize("éé").is_empty());
        assert_eq!(normalize("ééé"), vec!["ééé"]);
    }

    #[test]
    fn test_transformer_abstract_tokens() {
        let tokens = normalize(
            "We propose a transformer model using self attention mechanisms. \
             Our method shows strong results on benchmark tasks. \
             The attention mechanism scales efficiently.",
        );
        for expected in [
            "transformer",
            "propose",
            "method",
            "shows",
            "results",
            "benchmark",
            "tasks",
            "mechanism",
            "scales",
            "efficiently",
        ] {
            assert!(tokens.iter().any(|t| t == expected), "missing {expected}");
        }
        assert_eq!(tokens.iter().filter(|t| *t == "attention").count(), 2);
        assert_eq!(tokens.len(), 17);
    }
}
