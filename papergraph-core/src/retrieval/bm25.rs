//! BM25 ranking of vocabulary keywords against a free-text query
//!
//! The "documents" of this index are the extracted keywords themselves, most
//! of them a handful of tokens long. Scoring a query returns the keywords
//! that seed the graph traversal stage.

use std::collections::HashMap;

use crate::config::Bm25Settings;
use crate::text::tokenize;

/// A keyword matched by a query, with its BM25 score
#[derive(Debug, Clone, PartialEq)]
pub struct RankedKeyword {
    /// Keyword text, exactly as it appears in the vocabulary
    pub keyword: String,
    /// BM25 relevance score, always positive for returned entries
    pub score: f32,
}

/// One vocabulary entry with its precomputed token statistics
#[derive(Debug)]
struct VocabEntry {
    keyword: String,
    term_counts: HashMap<String, usize>,
    length: usize,
}

/// BM25 ranker over the keyword vocabulary
///
/// Built once at load time and read-only afterwards. Vocabulary order is
/// preserved and breaks score ties, which keeps rankings reproducible across
/// runs on the same bundle.
pub struct KeywordRanker {
    k1: f32,
    b: f32,
    max_results: usize,
    entries: Vec<VocabEntry>,
    document_frequencies: HashMap<String, usize>,
    avg_length: f32,
}

impl KeywordRanker {
    /// Index a vocabulary with the given parameters
    pub fn new(vocabulary: Vec<String>, settings: &Bm25Settings) -> Self {
        let mut entries = Vec::with_capacity(vocabulary.len());
        let mut document_frequencies: HashMap<String, usize> = HashMap::new();
        let mut total_length = 0usize;

        for keyword in vocabulary {
            let tokens = tokenize(&keyword);
            let mut term_counts: HashMap<String, usize> = HashMap::new();
            for token in &tokens {
                *term_counts.entry(token.clone()).or_insert(0) += 1;
            }
            // document frequency counts each keyword once per term
            for term in term_counts.keys() {
                *document_frequencies.entry(term.clone()).or_insert(0) += 1;
            }
            total_length += tokens.len();
            entries.push(VocabEntry {
                keyword,
                term_counts,
                length: tokens.len(),
            });
        }

        let avg_length = if entries.is_empty() {
            0.0
        } else {
            total_length as f32 / entries.len() as f32
        };

        Self {
            k1: settings.k1,
            b: settings.b,
            max_results: settings.max_keywords,
            entries,
            document_frequencies,
            avg_length,
        }
    }

    /// Rank vocabulary keywords against a query
    ///
    /// Returns at most `max_keywords` entries, all with positive score, in
    /// descending score order. Ties keep vocabulary order.
    pub fn rank(&self, query: &str) -> Vec<RankedKeyword> {
        if self.entries.is_empty() || self.avg_length == 0.0 {
            return Vec::new();
        }
        let query_terms = tokenize(query);
        if query_terms.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, f32)> = Vec::with_capacity(self.entries.len());
        for (position, entry) in self.entries.iter().enumerate() {
            let mut score = 0.0f32;
            for term in &query_terms {
                let tf = entry.term_counts.get(term).copied().unwrap_or(0) as f32;
                if tf == 0.0 {
                    continue;
                }
                let norm = self.k1
                    * (1.0 - self.b + self.b * entry.length as f32 / self.avg_length);
                score += self.idf(term) * (tf * (self.k1 + 1.0)) / (tf + norm);
            }
            scored.push((position, score));
        }

        // stable sort: equal scores stay in vocabulary order
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        scored
            .into_iter()
            .filter(|(_, score)| *score > 0.0)
            .take(self.max_results)
            .map(|(position, score)| RankedKeyword {
                keyword: self.entries[position].keyword.clone(),
                score,
            })
            .collect()
    }

    /// Number of indexed vocabulary keywords
    pub fn vocabulary_size(&self) -> usize {
        self.entries.len()
    }

    /// Whether the vocabulary is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn idf(&self, term: &str) -> f32 {
        let df = self.document_frequencies.get(term).copied().unwrap_or(0) as f32;
        let n = self.entries.len() as f32;
        ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
    }
}
