//! Request and response shapes for the HTTP API

use papergraph_core::{PaperRecord, PatternSummary};
use serde::{Deserialize, Serialize};

/// Query string for `GET /search`
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Free-text query, may be empty
    #[serde(default)]
    pub query: String,
}

/// Response body for `GET /search`
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// Matching dataset rows, best first
    pub documents: Vec<PaperRecord>,
    /// Densest keyword co-occurrence pattern across the results
    pub pattern: PatternSummary,
    /// Key for later `GET /paths/{paper_id}` calls
    pub session: String,
}

/// Query string for `GET /paths/{paper_id}`
#[derive(Debug, Deserialize)]
pub struct PathsParams {
    /// Session key returned by the search that produced the paper
    #[serde(default)]
    pub session: String,
}

/// Query string for `GET /graph/overview`
#[derive(Debug, Deserialize)]
pub struct OverviewParams {
    /// Number of edges to sample
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// Query string for `GET /graph/search`
#[derive(Debug, Deserialize)]
pub struct GraphSearchParams {
    /// Substring to match against node names, case-insensitive
    #[serde(default)]
    pub query: String,
    /// Maximum number of name matches to expand
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}
