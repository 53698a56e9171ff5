//! Co-occurrence pattern mining over search results

pub mod apriori;

pub use apriori::{AprioriMiner, FrequentItemset};

use crate::core::NodeKind;

/// A keyword participating in the winning co-occurrence pattern
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PatternKeyword {
    /// Keyword text
    pub name: String,
    /// Always the keyword population
    pub kind: NodeKind,
}

/// A paper whose match set contains the whole winning pattern
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PatternPaper {
    /// Paper title
    pub name: String,
    /// Always the paper population
    pub kind: NodeKind,
    /// Issue date from the tabular dataset, empty when unknown
    #[serde(rename = "issuedDate")]
    pub issued_date: String,
}

/// The densest keyword co-occurrence pattern of one search
///
/// Both lists are empty when no pattern qualifies; that is a valid result,
/// not an error.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PatternSummary {
    /// Keywords of the winning itemset
    #[serde(rename = "keyNodes")]
    pub key_nodes: Vec<PatternKeyword>,
    /// Supporting papers, ascending by issue date
    #[serde(rename = "documentNodes")]
    pub document_nodes: Vec<PatternPaper>,
}
