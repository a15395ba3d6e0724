//! Ranking of provider results by relevance.

use std::cmp::Ordering;

use super::normalize::normalize;
use super::scorer::{normalize_keywords, score_tokens};
use crate::models::{Paper, Query, RankedPapers, ScoredPaper};

/// Characters of abstract kept in list previews
pub const PREVIEW_CHARS: usize = 200;

/// Default size of the top-K subset
pub const DEFAULT_TOP_K: usize = 5;

/// Score, sort and number a batch of papers.
///
/// Papers with equal scores keep their provider order. `top` is the first
/// `min(top_k, n)` entries of `all`. Previews are derived from the abstract
/// but scoring always sees the full text.
pub fn rank(query: &Query, papers: Vec<Paper>, top_k: usize) -> RankedPapers {
    if papers.is_empty() {
        return RankedPapers::default();
    }

    let keyword_tokens = normalize_keywords(query);

    let mut scored: Vec<ScoredPaper> = papers
        .into_iter()
        .enumerate()
        .map(|(index, paper)| {
            let relevance = score_tokens(&keyword_tokens, &normalize(&paper.scoring_text()));
            tracing::debug!(
                id = index + 1,
                score = relevance.score,
                matched = relevance.exact_matches,
                "scored {}",
                paper.title
            );
            ScoredPaper {
                id: index + 1,
                rank: 0,
                score: relevance.score,
                matched_keyword_count: relevance.exact_matches,
                preview: preview(&paper),
                paper,
            }
        })
        .collect();

    // Stable: equal scores keep provider order.
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    for (index, entry) in scored.iter_mut().enumerate() {
        entry.rank = index + 1;
    }

    let top = scored.iter().take(top_k).cloned().collect();

    RankedPapers { all: scored, top }
}

/// First [`PREVIEW_CHARS`] characters of the abstract followed by an ellipsis.
pub fn preview(paper: &Paper) -> String {
    match paper.abstract_text.as_deref() {
        Some(text) if !text.is_empty() => {
            let head: String = text.chars().take(PREVIEW_CHARS).collect();
            format!("{head}...")
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaperBuilder;

    fn paper(title: &str, abstract_text: &str) -> Paper {
        PaperBuilder::new(title, format!("http://arxiv.org/abs/{title}"), "pdf")
            .abstract_text(abstract_text)
            .build()
    }

    fn titles(entries: &[ScoredPaper]) -> Vec<&str> {
        entries.iter().map(|e| e.paper.title.as_str()).collect()
    }

    #[test]
    fn test_empty_input() {
        let ranked = rank(&Query::new(["anything"]), Vec::new(), 5);
        assert!(ranked.all.is_empty());
        assert!(ranked.top.is_empty());
    }

    #[test]
    fn test_sorted_by_score_descending() {
        let query = Query::new(["graph", "diffusion", "protein", "folding"]);
        let papers = vec![
            paper("none", "Nothing relevant here at all."),
            paper("one", "Graph models everywhere with many extra words around."),
            paper("two", "Graph diffusion."),
        ];

        let ranked = rank(&query, papers, 5);
        assert_eq!(titles(&ranked.all), vec!["two", "one", "none"]);
        assert_eq!(
            ranked.all.iter().map(|e| e.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(
            ranked.all.iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![3, 2, 1]
        );
        assert!(ranked.all.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let query = Query::new(["quantum"]);
        let papers = vec![
            paper("alpha", "Classical mechanics."),
            paper("beta", "Thermodynamics review."),
            paper("gamma", "Optics overview."),
        ];

        let ranked = rank(&query, papers, 2);
        assert_eq!(titles(&ranked.all), vec!["alpha", "beta", "gamma"]);
        assert_eq!(titles(&ranked.top), vec!["alpha", "beta"]);
    }

    #[test]
    fn test_negative_scores_rank_last() {
        // A single keyword that matches gives idf = ln(1/2) < 0.
        let query = Query::new(["attention"]);
        let papers = vec![
            paper("first", "Convolutions only."),
            paper("second", "Recurrent nets only."),
            paper("third", "Attention attention."),
        ];

        let ranked = rank(&query, papers, 5);
        assert_eq!(titles(&ranked.all), vec!["first", "second", "third"]);
        assert!(ranked.all[2].score < 0.0);
    }

    #[test]
    fn test_top_is_prefix() {
        let query = Query::new(["graph", "neural", "network", "learning"]);
        let papers: Vec<Paper> = (0..8)
            .map(|i| paper(&format!("p{i}"), &"graph ".repeat(i + 1)))
            .collect();

        let ranked = rank(&query, papers, 5);
        assert_eq!(ranked.top.len(), 5);
        for (top, all) in ranked.top.iter().zip(&ranked.all) {
            assert_eq!(top.id, all.id);
            assert_eq!(top.rank, all.rank);
        }

        let small = rank(&query, vec![paper("only", "graph")], 5);
        assert_eq!(small.top.len(), 1);
    }

    #[test]
    fn test_title_contributes_to_score() {
        let query = Query::new(["graph", "diffusion", "protein"]);
        let ranked = rank(
            &query,
            vec![paper("Plain", "Some text."), paper("Graph", "Some text.")],
            5,
        );
        assert_eq!(ranked.all[0].paper.title, "Graph");
        assert_eq!(ranked.all[0].matched_keyword_count, 1);
        assert_eq!(ranked.all[1].matched_keyword_count, 0);
    }

    #[test]
    fn test_preview_truncation() {
        let long = "x".repeat(250);
        let p = paper("long", &long);
        let shown = preview(&p);
        assert_eq!(shown.chars().count(), PREVIEW_CHARS + 3);
        assert!(shown.ends_with("..."));

        let short = paper("short", "Short abstract.");
        assert_eq!(preview(&short), "Short abstract....");

        let missing = PaperBuilder::new("none", "id", "pdf").build();
        assert_eq!(preview(&missing), "");
    }

    #[test]
    fn test_preview_does_not_affect_score() {
        let query = Query::new(["graph", "diffusion", "protein"]);
        let tail = format!("{} protein", "filler ".repeat(60));
        let ranked = rank(&query, vec![paper("t", &tail)], 5);
        assert!(!ranked.all[0].preview.contains("protein"));
        assert_eq!(ranked.all[0].matched_keyword_count, 1);
    }
}
