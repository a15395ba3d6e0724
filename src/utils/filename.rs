//! File name sanitization for downloaded papers.

use std::sync::LazyLock;

use regex::Regex;

/// Characters of the cleaned title kept in a file name
pub const MAX_TITLE_CHARS: usize = 50;

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("valid regex"));

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Build a PDF file name from a paper title and its position id
///
/// Drops everything but word characters, whitespace and `-`, keeps the first
/// [`MAX_TITLE_CHARS`] characters, trims, replaces whitespace runs with `_`
/// and appends the zero-padded id.
pub fn safe_filename(title: &str, id: usize) -> String {
    let cleaned = UNSAFE_CHARS.replace_all(title, "");
    let head: String = cleaned.chars().take(MAX_TITLE_CHARS).collect();
    let stem = WHITESPACE.replace_all(head.trim(), "_");
    format!("{}_{:02}.pdf", stem, id)
}
