//! Per-query search session
//!
//! A session owns the match map of exactly one search. Explanations resolve
//! against the session they came from, never against shared mutable state,
//! so concurrent searches cannot contaminate each other's results.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::core::NodeId;

/// The retained outcome of one search: its query text and match map
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSession {
    query: String,
    match_map: IndexMap<NodeId, BTreeSet<NodeId>>,
}

impl SearchSession {
    /// Wrap a query and its match map
    pub fn new(query: String, match_map: IndexMap<NodeId, BTreeSet<NodeId>>) -> Self {
        Self { query, match_map }
    }

    /// The query text this session was created for
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether a paper was part of this search's results
    pub fn contains_paper(&self, id: &NodeId) -> bool {
        self.match_map.contains_key(id)
    }

    /// The keywords that matched a paper, if it was in the results
    pub fn matched_keywords(&self, id: &NodeId) -> Option<&BTreeSet<NodeId>> {
        self.match_map.get(id)
    }

    /// Number of papers in this session's results
    pub fn paper_count(&self) -> usize {
        self.match_map.len()
    }

    /// The full match map, in first-seen paper order
    pub fn match_map(&self) -> &IndexMap<NodeId, BTreeSet<NodeId>> {
        &self.match_map
    }
}
