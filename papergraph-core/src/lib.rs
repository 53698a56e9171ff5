//! # PaperGraph Core
//!
//! Retrieval engine over a bipartite paper-keyword graph.
//!
//! This crate provides everything below the HTTP layer:
//! - BM25 ranking of a query against the keyword vocabulary
//! - Bounded breadth-first traversal around each matched keyword
//! - Fusion of keyword neighborhoods into one paper ranking
//! - Apriori mining of the densest keyword co-occurrence pattern
//! - Shortest-path explanations for any paper in a result set
//!
//! All data is loaded once at startup and queries run read-only, so one
//! engine can be shared across threads behind an `Arc`.
//!
//! ## Quick Start
//!
//! ```rust
//! use papergraph_core::{Config, DataBundle, SearchEngine};
//!
//! let config = Config::default();
//! let bundle = DataBundle::empty(&config.data);
//! let engine = SearchEngine::new(bundle, &config);
//!
//! let output = engine.search("energy storage");
//! assert!(output.papers.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Configuration management and loading
pub mod config;
/// Core types and the error enum
pub mod core;
/// Tabular paper dataset
pub mod corpus;
/// Search engine facade
pub mod engine;
/// Graph store and traversal
pub mod graph;
/// Co-occurrence pattern mining
pub mod mining;
/// Startup data loading
pub mod persistence;
/// Ranking, fusion and explanation
pub mod retrieval;
/// Tokenization shared by indexing and querying
pub mod text;

/// Prelude module containing the most commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::core::{NodeId, NodeKind, PaperGraphError, Result};
    pub use crate::engine::{SearchEngine, SearchOutput};
    pub use crate::persistence::DataBundle;
}

// Re-export core types
pub use crate::config::Config;
pub use crate::core::{GraphNode, NodeId, NodeKind, PaperGraphError, PaperRecord, Result};
pub use crate::corpus::PaperStore;
pub use crate::engine::{EngineStats, SearchEngine, SearchOutput};
pub use crate::graph::{PaperGraph, SubgraphView};
pub use crate::mining::PatternSummary;
pub use crate::persistence::{DataBundle, GraphSnapshot};
pub use crate::retrieval::{PathExplanation, SearchSession};
