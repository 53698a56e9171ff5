//! Retrieval pipeline: keyword ranking, neighborhood fusion, explanations

pub mod bm25;
pub mod explain;
pub mod fusion;
pub mod session;

pub use bm25::{KeywordRanker, RankedKeyword};
pub use explain::{explain_paths, PathExplanation, PathStep};
pub use fusion::{fuse, FusionOutcome, KeywordNeighborhood};
pub use session::SearchSession;
