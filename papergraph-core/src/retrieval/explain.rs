//! Shortest-path explanations for retrieved papers
//!
//! For a paper from a session's results, renders one shortest path to each
//! keyword that matched it. The paper itself is omitted from each rendered
//! path; a keyword that became unreachable renders as an empty path rather
//! than failing the whole explanation.

use crate::core::error::{PaperGraphError, Result};
use crate::core::{NodeId, NodeKind};
use crate::corpus::PaperStore;
use crate::graph::{PaperGraph, Traverser};
use crate::retrieval::session::SearchSession;

/// One node along an explanation path
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PathStep {
    /// Display name of the node
    pub name: String,
    /// Node population
    pub kind: NodeKind,
    /// Paper URI; `None` for keyword nodes
    pub uri: Option<String>,
}

/// Explanation for one paper: a path per matched keyword
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PathExplanation {
    /// Name of the explained paper
    #[serde(rename = "queryName")]
    pub query_name: String,
    /// URI of the explained paper, empty when unknown
    #[serde(rename = "queryURI")]
    pub query_uri: String,
    /// One path per matched keyword, source paper excluded
    pub paths: Vec<Vec<PathStep>>,
}

/// Explain why `paper_id` was in the session's results
///
/// Fails with `NotFound` when the paper was not part of the session.
pub fn explain_paths(
    graph: &PaperGraph,
    store: &PaperStore,
    traverser: &Traverser,
    session: &SearchSession,
    paper_id: &NodeId,
) -> Result<PathExplanation> {
    let Some(keywords) = session.matched_keywords(paper_id) else {
        return Err(PaperGraphError::NotFound {
            resource: "search result".to_string(),
            id: paper_id.to_string(),
        });
    };

    let query_name = graph
        .node(paper_id)
        .map(|node| node.name.clone())
        .unwrap_or_default();
    let query_uri = store.uri(paper_id).unwrap_or_default().to_string();

    let mut paths = Vec::with_capacity(keywords.len());
    for keyword in keywords {
        let mut steps = Vec::new();
        if let Some(node_ids) = traverser.shortest_path(graph, paper_id, keyword) {
            for id in node_ids.into_iter().skip(1) {
                let Some(node) = graph.node(&id) else {
                    continue;
                };
                let uri = match node.kind {
                    NodeKind::Paper => Some(store.uri(&id).unwrap_or_default().to_string()),
                    NodeKind::Keyword => None,
                };
                steps.push(PathStep {
                    name: node.name.clone(),
                    kind: node.kind,
                    uri,
                });
            }
        }
        paths.push(steps);
    }

    Ok(PathExplanation {
        query_name,
        query_uri,
        paths,
    })
}
