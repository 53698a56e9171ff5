//! Fusion of per-keyword graph neighborhoods into one paper ranking
//!
//! Every matched keyword contributes either its hop distance to a paper or a
//! fixed miss penalty. Lower totals rank first; ties keep the order papers
//! were first discovered in, so rankings are reproducible.

use std::collections::{BTreeSet, HashMap};

use indexmap::IndexMap;

use crate::core::NodeId;
use crate::graph::PaperHit;

/// The papers one matched keyword reaches within the traversal bound
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordNeighborhood {
    /// Matched keyword node
    pub keyword: NodeId,
    /// Reached papers in discovery order
    pub hits: Vec<PaperHit>,
}

/// Fused ranking plus the paper-to-keywords match map
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FusionOutcome {
    /// Paper identifiers, best match first
    pub ranking: Vec<NodeId>,
    /// Which keywords matched each paper; keys in first-seen order
    pub match_map: IndexMap<NodeId, BTreeSet<NodeId>>,
}

/// Fuse keyword neighborhoods into a ranking
///
/// A paper's total score sums, over all matched keywords, its distance in
/// that keyword's neighborhood or `miss_penalty` when absent. Papers sort by
/// ascending total; the sort is stable over first-seen order.
pub fn fuse(neighborhoods: &[KeywordNeighborhood], miss_penalty: usize) -> FusionOutcome {
    let mut observed: IndexMap<NodeId, HashMap<NodeId, usize>> = IndexMap::new();
    let mut match_map: IndexMap<NodeId, BTreeSet<NodeId>> = IndexMap::new();

    for neighborhood in neighborhoods {
        for hit in &neighborhood.hits {
            observed
                .entry(hit.id.clone())
                .or_default()
                .insert(neighborhood.keyword.clone(), hit.distance);
            match_map
                .entry(hit.id.clone())
                .or_default()
                .insert(neighborhood.keyword.clone());
        }
    }

    let mut scored: Vec<(NodeId, usize)> = observed
        .iter()
        .map(|(paper, keyword_distances)| {
            let total: usize = neighborhoods
                .iter()
                .map(|n| {
                    keyword_distances
                        .get(&n.keyword)
                        .copied()
                        .unwrap_or(miss_penalty)
                })
                .sum();
            (paper.clone(), total)
        })
        .collect();
    scored.sort_by_key(|(_, total)| *total);

    FusionOutcome {
        ranking: scored.into_iter().map(|(paper, _)| paper).collect(),
        match_map,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighborhood(keyword: &str, hits: &[(&str, usize)]) -> KeywordNeighborhood {
        KeywordNeighborhood {
            keyword: keyword.into(),
            hits: hits
                .iter()
                .map(|(id, distance)| PaperHit {
                    id: (*id).into(),
                    distance: *distance,
                })
                .collect(),
        }
    }

    #[test]
    fn test_full_match_outranks_partial_match() {
        let neighborhoods = vec![
            neighborhood("k1", &[("a", 0), ("b", 1)]),
            neighborhood("k2", &[("a", 0)]),
            neighborhood("k3", &[("a", 0)]),
        ];

        let outcome = fuse(&neighborhoods, 7);
        // a: 0+0+0 = 0, b: 1+7+7 = 15
        assert_eq!(outcome.ranking[0].as_str(), "a");
        assert_eq!(outcome.ranking[1].as_str(), "b");
    }

    #[test]
    fn test_penalty_applies_per_missing_keyword() {
        let neighborhoods = vec![
            neighborhood("k1", &[("a", 1), ("b", 2)]),
            neighborhood("k2", &[("a", 2)]),
        ];

        let outcome = fuse(&neighborhoods, 7);
        // a: 1+2 = 3, b: 2+7 = 9
        assert_eq!(outcome.ranking, vec![NodeId::from("a"), NodeId::from("b")]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let neighborhoods = vec![neighborhood("k1", &[("x", 1), ("y", 1), ("z", 1)])];

        let outcome = fuse(&neighborhoods, 7);
        let ids: Vec<&str> = outcome.ranking.iter().map(NodeId::as_str).collect();
        assert_eq!(ids, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_match_map_records_membership_only() {
        let neighborhoods = vec![
            neighborhood("k1", &[("a", 1), ("b", 3)]),
            neighborhood("k2", &[("a", 2)]),
        ];

        let outcome = fuse(&neighborhoods, 7);
        let a_keywords = &outcome.match_map[&NodeId::from("a")];
        let b_keywords = &outcome.match_map[&NodeId::from("b")];

        assert_eq!(a_keywords.len(), 2);
        assert!(a_keywords.contains(&NodeId::from("k1")));
        assert!(a_keywords.contains(&NodeId::from("k2")));
        assert_eq!(b_keywords.len(), 1);
        assert!(b_keywords.contains(&NodeId::from("k1")));
    }

    #[test]
    fn test_same_inputs_fuse_identically() {
        let neighborhoods = vec![
            neighborhood("k1", &[("a", 1), ("b", 1), ("c", 2)]),
            neighborhood("k2", &[("c", 1), ("b", 3)]),
        ];

        let first = fuse(&neighborhoods, 7);
        let second = fuse(&neighborhoods, 7);
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_neighborhoods_yield_empty_outcome() {
        let outcome = fuse(&[], 7);
        assert!(outcome.ranking.is_empty());
        assert!(outcome.match_map.is_empty());
    }
}
