//! Level-wise frequent itemset mining over keyword match sets
//!
//! Transactions are the per-paper keyword sets of one search. Candidate
//! itemsets grow by pairwise union with downward-closure pruning, so every
//! subset of a counted candidate is already known to be frequent.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::config::MiningSettings;
use crate::core::NodeId;

/// An itemset of keywords with its transaction support
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequentItemset {
    /// Keyword identifiers in the itemset
    pub items: BTreeSet<NodeId>,
    /// Number of transactions containing every item
    pub support: usize,
}

/// Apriori miner over keyword transactions
#[derive(Debug, Clone)]
pub struct AprioriMiner {
    min_support: usize,
}

impl AprioriMiner {
    /// Create a miner with the given settings
    pub fn new(settings: &MiningSettings) -> Self {
        Self {
            min_support: settings.min_support.max(1),
        }
    }

    /// All frequent itemsets across every level, smallest level first
    pub fn frequent_itemsets(&self, transactions: &[BTreeSet<NodeId>]) -> Vec<FrequentItemset> {
        let mut counts: BTreeMap<NodeId, usize> = BTreeMap::new();
        for transaction in transactions {
            for item in transaction {
                *counts.entry(item.clone()).or_insert(0) += 1;
            }
        }

        let mut level: Vec<FrequentItemset> = counts
            .into_iter()
            .filter(|(_, support)| *support >= self.min_support)
            .map(|(item, support)| FrequentItemset {
                items: BTreeSet::from([item]),
                support,
            })
            .collect();

        let mut all = Vec::new();
        while !level.is_empty() {
            all.extend(level.iter().cloned());
            level = Self::candidates(&level)
                .into_iter()
                .filter_map(|items| {
                    let support = transactions
                        .iter()
                        .filter(|transaction| items.is_subset(transaction))
                        .count();
                    (support >= self.min_support).then_some(FrequentItemset { items, support })
                })
                .collect();
        }

        all
    }

    /// The densest shared itemset: more than one keyword, more than one
    /// supporting transaction, maximal by (size, support)
    ///
    /// `None` when no itemset qualifies; the caller renders that as an empty
    /// pattern, not an error.
    pub fn densest_shared_itemset(
        &self,
        transactions: &[BTreeSet<NodeId>],
    ) -> Option<FrequentItemset> {
        let mut best: Option<FrequentItemset> = None;
        for candidate in self.frequent_itemsets(transactions) {
            if candidate.items.len() < 2 || candidate.support < 2 {
                continue;
            }
            let better = match &best {
                None => true,
                Some(current) => {
                    (candidate.items.len(), candidate.support)
                        > (current.items.len(), current.support)
                },
            };
            if better {
                best = Some(candidate);
            }
        }
        best
    }

    /// Next-level candidates: pairwise unions one item larger, kept only
    /// when every one-smaller subset is frequent
    fn candidates(level: &[FrequentItemset]) -> Vec<BTreeSet<NodeId>> {
        let size = match level.first() {
            Some(itemset) => itemset.items.len(),
            None => return Vec::new(),
        };
        let known: HashSet<&BTreeSet<NodeId>> = level.iter().map(|f| &f.items).collect();

        let mut out: BTreeSet<BTreeSet<NodeId>> = BTreeSet::new();
        for i in 0..level.len() {
            for j in (i + 1)..level.len() {
                let union: BTreeSet<NodeId> = level[i]
                    .items
                    .union(&level[j].items)
                    .cloned()
                    .collect();
                if union.len() != size + 1 {
                    continue;
                }
                let closed = union.iter().all(|item| {
                    let mut subset = union.clone();
                    subset.remove(item);
                    known.contains(&subset)
                });
                if closed {
                    out.insert(union);
                }
            }
        }
        out.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transactions(sets: &[&[&str]]) -> Vec<BTreeSet<NodeId>> {
        sets.iter()
            .map(|set| set.iter().map(|id| NodeId::from(*id)).collect())
            .collect()
    }

    fn miner() -> AprioriMiner {
        AprioriMiner::new(&MiningSettings::default())
    }

    #[test]
    fn test_shared_pair_is_the_winner() {
        let transactions = transactions(&[&["k1", "k2"], &["k1", "k2"], &["k1"]]);

        let winner = miner().densest_shared_itemset(&transactions).unwrap();
        assert_eq!(winner.support, 2);
        assert_eq!(
            winner.items,
            BTreeSet::from([NodeId::from("k1"), NodeId::from("k2")])
        );
    }

    #[test]
    fn test_no_shared_pair_yields_none() {
        let isolated = transactions(&[&["k1"], &["k2"], &["k3"]]);
        assert!(miner().densest_shared_itemset(&isolated).is_none());

        // a pair must also repeat: one co-occurrence is not a pattern
        let single = transactions(&[&["k1", "k2"], &["k3"]]);
        assert!(miner().densest_shared_itemset(&single).is_none());
    }

    #[test]
    fn test_larger_itemset_beats_higher_support() {
        let transactions = transactions(&[
            &["k1", "k2", "k3"],
            &["k1", "k2", "k3"],
            &["k4", "k5"],
            &["k4", "k5"],
            &["k4", "k5"],
        ]);

        let winner = miner().densest_shared_itemset(&transactions).unwrap();
        assert_eq!(winner.items.len(), 3);
        assert_eq!(winner.support, 2);
    }

    #[test]
    fn test_downward_closure_prunes_candidates() {
        // {k1,k2} and {k2,k3} repeat, {k1,k3} never co-occurs, so {k1,k2,k3}
        // must not be generated
        let transactions = transactions(&[
            &["k1", "k2"],
            &["k1", "k2"],
            &["k2", "k3"],
            &["k2", "k3"],
        ]);

        let miner = AprioriMiner::new(&MiningSettings { min_support: 2 });
        let frequent = miner.frequent_itemsets(&transactions);
        assert!(frequent.iter().all(|f| f.items.len() <= 2));

        let winner = miner.densest_shared_itemset(&transactions).unwrap();
        assert_eq!(
            winner.items,
            BTreeSet::from([NodeId::from("k1"), NodeId::from("k2")])
        );
    }

    #[test]
    fn test_min_support_prunes_singletons() {
        let transactions = transactions(&[&["k1"], &["k2"]]);
        let miner = AprioriMiner::new(&MiningSettings { min_support: 2 });
        assert!(miner.frequent_itemsets(&transactions).is_empty());
    }

    #[test]
    fn test_empty_transactions_mine_nothing() {
        assert!(miner().frequent_itemsets(&[]).is_empty());
        assert!(miner().densest_shared_itemset(&[]).is_none());
    }
}
