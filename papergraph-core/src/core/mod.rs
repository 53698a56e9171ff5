//! Core data structures for the papergraph engine
//!
//! Fundamental types shared across the graph store, the retrieval pipeline
//! and the tabular corpus, plus the central error type.

pub mod error;

pub use error::{PaperGraphError, Result};

use indexmap::IndexMap;

/// Unique identifier for a graph node (paper or keyword)
///
/// Papers and keywords share one identifier namespace; the node `kind`
/// distinguishes them, not the identifier shape.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(pub String);

impl NodeId {
    /// Creates a new NodeId from a string
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Borrow the underlying identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// Discriminates the two node populations of the bipartite graph
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A paper from the corpus
    Paper,
    /// An extracted keyword
    Keyword,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Paper => write!(f, "paper"),
            NodeKind::Keyword => write!(f, "keyword"),
        }
    }
}

/// A node of the paper-keyword graph
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GraphNode {
    /// Stable external identifier
    pub id: NodeId,
    /// Node population this node belongs to
    pub kind: NodeKind,
    /// Display name (paper title or keyword text)
    pub name: String,
}

impl GraphNode {
    /// Create a paper node
    pub fn paper(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Paper,
            name: name.into(),
        }
    }

    /// Create a keyword node
    pub fn keyword(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Keyword,
            name: name.into(),
        }
    }
}

/// One verbatim row of the tabular paper dataset
///
/// Columns are opaque to the engine; only the identifier, issue-date and URI
/// columns are ever interpreted, and those names come from configuration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PaperRecord {
    /// Column name to value, in file order
    pub fields: IndexMap<String, String>,
}

impl PaperRecord {
    /// Look up a column value by name
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}
