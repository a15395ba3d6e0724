//! Extractive summarization of abstracts.
//!
//! Sentences are scored by length plus two fixed bonuses, the best ones are
//! kept, and the survivors are emitted in their original order.

use std::sync::LazyLock;

use regex::Regex;

/// Sentences kept by default
pub const DEFAULT_MAX_SENTENCES: usize = 4;

/// Characters kept when a text is too short to summarize
pub const SHORT_TEXT_LIMIT: usize = 500;

/// Words that mark a sentence as describing the contribution
pub const SIGNAL_WORDS: &[&str] = &["method", "result", "approach", "propose", "show", "demonstrate"];

/// Bonus for containing a signal word
pub const SIGNAL_WORD_BONUS: usize = 10;

/// Bonus for containing a number
pub const NUMBER_BONUS: usize = 5;

/// Texts with fewer period-delimited segments are returned as-is (truncated).
const MIN_SEGMENTS: usize = 3;

const ELLIPSIS: &str = "...";

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

/// Lowercased abbreviations (without their final period) that bind to the
/// word after them: "Fig. 3", "Dr. Smith", "e.g. Smith".
const PREFIX_ABBREVIATIONS: &[&str] = &[
    "al", "approx", "cf", "dr", "e.g", "eq", "eqs", "fig", "figs", "i.e", "mr", "mrs", "ms",
    "prof", "ref", "refs", "sec", "st", "viz", "vol", "vs",
];

/// Abbreviations that may also close a sentence; they only continue one when
/// the next word starts in lowercase or with a digit.
const TRAILING_ABBREVIATIONS: &[&str] = &["co", "etc", "inc", "jr", "ltd", "resp", "sr"];

const TERMINATORS: &[char] = &['.', '!', '?'];

const CLOSERS: &[char] = &['"', '\'', ')', ']', '}', '\u{201d}', '\u{2019}'];

/// Summarize `text` down to at most `max_sentences` sentences.
///
/// Short texts (fewer than three period-delimited segments) are returned
/// whole, cut at [`SHORT_TEXT_LIMIT`] characters. A `max_sentences` of zero
/// is treated as one.
pub fn summarize(text: &str, max_sentences: usize) -> String {
    if text.is_empty() || text.split('.').count() < MIN_SEGMENTS {
        return truncate(text, SHORT_TEXT_LIMIT);
    }

    let sentences = split_sentences(text);
    let keep = max_sentences.max(1);

    if sentences.len() <= keep {
        return sentences.join(" ");
    }

    let scores: Vec<usize> = sentences.iter().map(|s| score_sentence(s)).collect();

    // Stable sort: on equal scores the earlier sentence wins.
    let mut order: Vec<usize> = (0..sentences.len()).collect();
    order.sort_by(|&a, &b| scores[b].cmp(&scores[a]));

    let mut chosen: Vec<usize> = order.into_iter().take(keep).collect();
    chosen.sort_unstable();

    tracing::trace!(?chosen, total = sentences.len(), "selected sentences");

    chosen
        .into_iter()
        .map(|i| sentences[i])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Heuristic weight of a sentence: word count plus fixed bonuses.
pub fn score_sentence(sentence: &str) -> usize {
    let mut score = sentence.split_whitespace().count();

    let lower = sentence.to_lowercase();
    if SIGNAL_WORDS.iter().any(|w| lower.contains(w)) {
        score += SIGNAL_WORD_BONUS;
    }
    if DIGITS.is_match(sentence) {
        score += NUMBER_BONUS;
    }

    score
}

/// Keep the first `limit` characters, appending an ellipsis when cut.
pub fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Split text into trimmed sentence slices.
///
/// A sentence ends at `.`, `!` or `?` (plus any closing quotes or brackets)
/// followed by whitespace. A period after a single-letter initial or a
/// prefix abbreviation never ends one. A period after a trailing
/// abbreviation such as `etc.` ends one unless the next word starts in
/// lowercase or with a digit. After ordinary words the case of the next word
/// does not matter, so "BERT. mBERT ..." is two sentences.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((index, ch)) = chars.next() {
        if !TERMINATORS.contains(&ch) {
            continue;
        }

        let mut end = index + ch.len_utf8();
        while let Some(&(next_index, next)) = chars.peek() {
            if TERMINATORS.contains(&next) || CLOSERS.contains(&next) {
                end = next_index + next.len_utf8();
                chars.next();
            } else {
                break;
            }
        }

        let rest = &text[end..];
        if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
            continue;
        }

        if ch == '.' {
            match abbreviation_before(&text[start..index]) {
                Some(Abbreviation::Prefix) => continue,
                Some(Abbreviation::Trailing) if continues_sentence(rest) => continue,
                _ => {}
            }
        }

        push_trimmed(&mut sentences, &text[start..end]);
        start = end;
    }

    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, piece: &'a str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        sentences.push(piece);
    }
}

enum Abbreviation {
    Prefix,
    Trailing,
}

fn abbreviation_before(before: &str) -> Option<Abbreviation> {
    let word = before
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();

    if word.chars().count() == 1 && word.chars().all(char::is_alphabetic) {
        return Some(Abbreviation::Prefix);
    }

    if PREFIX_ABBREVIATIONS.contains(&word.as_str()) {
        Some(Abbreviation::Prefix)
    } else if TRAILING_ABBREVIATIONS.contains(&word.as_str()) {
        Some(Abbreviation::Trailing)
    } else {
        None
    }
}

fn continues_sentence(rest: &str) -> bool {
    rest.trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.is_lowercase() || c.is_ascii_digit())
}
