//! Keyword-relevance retrieval over the bundled knowledge corpus.
//!
//! The corpus is a single static JSON document loaded once at startup.
//! Retrieval is a deterministic weighted substring scan, intentionally not a
//! vector search: identical query and corpus always yield identical ordered
//! results, which keeps the assistant's context assembly auditable.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// A static FAQ/fact record used for context retrieval.
#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeEntry {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CorpusFile {
    #[serde(default)]
    entries: Vec<KnowledgeEntry>,
}

/// In-memory corpus. `Default` is the not-yet-loaded state, in which every
/// query resolves to "no context" rather than an error.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
    loaded: bool,
}

impl KnowledgeBase {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Reading knowledge corpus {}", path.display()))?;
        let corpus: CorpusFile = serde_json::from_str(&data)
            .with_context(|| format!("Parsing knowledge corpus {}", path.display()))?;
        info!(entries = corpus.entries.len(), path = %path.display(), "Loaded knowledge corpus");
        Ok(KnowledgeBase {
            entries: corpus.entries,
            loaded: true,
        })
    }

    pub fn from_entries(entries: Vec<KnowledgeEntry>) -> Self {
        KnowledgeBase {
            entries,
            loaded: true,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top-K entries by weighted keyword match, best first. Ties keep corpus
    /// order (the sort is stable). An unloaded or empty corpus, or a blank
    /// query, yields an empty list.
    pub fn search(&self, query: &str, top_k: usize) -> Vec<&KnowledgeEntry> {
        if !self.loaded || self.entries.is_empty() {
            return Vec::new();
        }
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(u32, &KnowledgeEntry)> = self
            .entries
            .iter()
            .filter_map(|entry| {
                let score = relevance(entry, &query);
                (score > 0).then_some((score, entry))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().take(top_k).map(|(_, e)| e).collect()
    }

    /// Distinct categories in corpus order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for entry in &self.entries {
            if !seen.contains(&entry.category.as_str()) {
                seen.push(entry.category.as_str());
            }
        }
        seen
    }

    pub fn entries_in_category(&self, category: &str) -> Vec<&KnowledgeEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.category == category)
            .collect()
    }
}

/// Weighted substring score of one entry against a lower-cased query.
fn relevance(entry: &KnowledgeEntry, query: &str) -> u32 {
    let mut score = 0;

    if entry.title.to_lowercase().contains(query) {
        score += 10;
    }
    for keyword in &entry.keywords {
        let keyword = keyword.to_lowercase();
        if query.contains(&keyword) || keyword.contains(query) {
            score += 5;
        }
    }
    if entry.content.to_lowercase().contains(query) {
        score += 3;
    }
    if entry.category.to_lowercase().contains(query) {
        score += 2;
    }
    for tag in &entry.tags {
        if query.contains(&tag.to_lowercase()) {
            score += 2;
        }
    }

    score
}

/// Concatenate retrieved entries into the context block handed to the
/// generation call.
pub fn build_context(entries: &[&KnowledgeEntry]) -> String {
    entries
        .iter()
        .map(|entry| format!("【{}】\n{}", entry.title, entry.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, content: &str, category: &str, keywords: &[&str], tags: &[&str]) -> KnowledgeEntry {
        KnowledgeEntry {
            title: title.to_string(),
            content: content.to_string(),
            category: category.to_string(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn corpus() -> KnowledgeBase {
        KnowledgeBase::from_entries(vec![
            entry("七月", "七月流火，九月授衣。", "诗经篇章", &["豳风"], &["农事"]),
            entry("东山", "我徂东山，慆慆不归。", "诗经篇章", &["征役"], &[]),
            entry("染色工艺", "八月载绩，载玄载黄。", "农事技艺", &["染丝"], &["工艺"]),
        ])
    }

    #[test]
    fn unloaded_corpus_returns_empty() {
        let kb = KnowledgeBase::default();
        assert!(kb.search("七月", 3).is_empty());
    }

    #[test]
    fn title_match_scores_ten_and_wins() {
        let kb = corpus();
        let hits = kb.search("七月", 3);
        assert_eq!(hits.len(), 1, "only the matching entry should survive");
        assert_eq!(hits[0].title, "七月");
        // Title (+10) plus content (+3): the keyword 豳风 does not overlap
        // the query in either direction.
        assert_eq!(relevance(hits[0], "七月"), 13);
    }

    #[test]
    fn zero_score_entries_are_excluded() {
        let kb = corpus();
        for hit in kb.search("东山", 3) {
            assert!(relevance(hit, "东山") > 0);
        }
        assert!(kb.search("无关词语", 3).is_empty());
    }

    #[test]
    fn keyword_matches_in_either_direction() {
        let e = entry("t", "c", "", &["豳风"], &[]);
        assert_eq!(relevance(&e, "豳风七月"), 5, "query containing the keyword");
        assert_eq!(relevance(&e, "豳"), 5, "keyword containing the query");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let e = entry("Seasonal Almanac", "The BIN area calendar.", "History", &["Almanac"], &[]);
        assert_eq!(relevance(&e, "almanac"), 15);
    }

    #[test]
    fn results_are_deterministic_and_capped() {
        let kb = KnowledgeBase::from_entries(
            (0..6)
                .map(|i| entry(&format!("农事 {i}"), "内容", "农事", &[], &[]))
                .collect(),
        );
        let first = kb.search("农事", 3);
        let second = kb.search("农事", 3);
        assert_eq!(first.len(), 3, "top-k must cap the result count");
        let titles: Vec<_> = first.iter().map(|e| e.title.as_str()).collect();
        let titles_again: Vec<_> = second.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, titles_again);
        // Equal scores keep corpus order.
        assert_eq!(titles, vec!["农事 0", "农事 1", "农事 2"]);
    }

    #[test]
    fn blank_query_matches_nothing() {
        let kb = corpus();
        assert!(kb.search("   ", 3).is_empty());
    }

    #[test]
    fn context_block_concatenates_title_and_content() {
        let kb = corpus();
        let hits = kb.search("七月", 3);
        let block = build_context(&hits);
        assert_eq!(block, "【七月】\n七月流火，九月授衣。");
        assert!(build_context(&[]).is_empty());
    }

    #[test]
    fn categories_keep_corpus_order() {
        let kb = corpus();
        assert_eq!(kb.categories(), vec!["诗经篇章", "农事技艺"]);
        assert_eq!(kb.entries_in_category("诗经篇章").len(), 2);
    }
}
