//! Paper-keyword graph store
//!
//! The graph is a petgraph arena with a side table mapping stable external
//! identifiers to dense node indices. Nodes and edges are validated on
//! insertion: the graph is strictly bipartite, undirected and simple.

pub mod traversal;

pub use traversal::{PaperHit, Traverser};

use std::collections::{HashMap, HashSet};

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::core::error::{PaperGraphError, Result};
use crate::core::{GraphNode, NodeId, NodeKind};

/// Bipartite graph of papers and keywords
#[derive(Debug, Default)]
pub struct PaperGraph {
    graph: UnGraph<GraphNode, ()>,
    node_index: HashMap<NodeId, NodeIndex>,
}

impl PaperGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self {
            graph: UnGraph::new_undirected(),
            node_index: HashMap::new(),
        }
    }

    /// Add a node; identifiers must be unique across both populations
    pub fn add_node(&mut self, node: GraphNode) -> Result<NodeIndex> {
        if self.node_index.contains_key(&node.id) {
            return Err(PaperGraphError::Graph {
                message: format!("duplicate node id {}", node.id),
            });
        }
        let id = node.id.clone();
        let index = self.graph.add_node(node);
        self.node_index.insert(id, index);
        Ok(index)
    }

    /// Add an undirected edge between a paper and a keyword
    pub fn add_edge(&mut self, a: &NodeId, b: &NodeId) -> Result<()> {
        let a_index = *self.node_index.get(a).ok_or_else(|| PaperGraphError::Graph {
            message: format!("edge endpoint {a} not found"),
        })?;
        let b_index = *self.node_index.get(b).ok_or_else(|| PaperGraphError::Graph {
            message: format!("edge endpoint {b} not found"),
        })?;

        if a_index == b_index {
            return Err(PaperGraphError::Graph {
                message: format!("self loop on {a}"),
            });
        }
        let a_kind = self.graph.node_weight(a_index).map(|n| n.kind);
        let b_kind = self.graph.node_weight(b_index).map(|n| n.kind);
        if a_kind == b_kind {
            return Err(PaperGraphError::Graph {
                message: format!("edge {a} -- {b} does not connect a paper to a keyword"),
            });
        }
        if self.graph.find_edge(a_index, b_index).is_some() {
            return Err(PaperGraphError::Graph {
                message: format!("duplicate edge {a} -- {b}"),
            });
        }

        self.graph.add_edge(a_index, b_index, ());
        Ok(())
    }

    /// Whether a node with this identifier exists
    pub fn contains(&self, id: &NodeId) -> bool {
        self.node_index.contains_key(id)
    }

    /// Internal index of a node, if present
    pub fn index_of(&self, id: &NodeId) -> Option<NodeIndex> {
        self.node_index.get(id).copied()
    }

    /// Node lookup by external identifier
    pub fn node(&self, id: &NodeId) -> Option<&GraphNode> {
        let index = self.node_index.get(id)?;
        self.graph.node_weight(*index)
    }

    /// Node lookup by internal index
    pub fn node_at(&self, index: NodeIndex) -> Option<&GraphNode> {
        self.graph.node_weight(index)
    }

    /// Adjacent node indices
    pub fn neighbors(&self, index: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(index)
    }

    /// All nodes, in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph.node_weights()
    }

    /// Total node count
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Total edge count
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of nodes of one kind
    pub fn count_kind(&self, kind: NodeKind) -> usize {
        self.graph.node_weights().filter(|n| n.kind == kind).count()
    }

    /// A bounded sample of the graph for browsing: the first `limit` edges
    /// with their endpoints
    pub fn overview(&self, limit: usize) -> SubgraphView {
        let mut view = SubgraphView::default();
        let mut seen = HashSet::new();

        for edge in self.graph.edge_references().take(limit) {
            for index in [edge.source(), edge.target()] {
                if let Some(node) = self.graph.node_weight(index) {
                    if seen.insert(node.id.clone()) {
                        view.nodes.push(node.clone());
                    }
                }
            }
            if let (Some(source), Some(target)) = (
                self.graph.node_weight(edge.source()),
                self.graph.node_weight(edge.target()),
            ) {
                view.links.push(GraphLink {
                    source: source.id.clone(),
                    target: target.id.clone(),
                });
            }
        }

        view
    }

    /// Case-insensitive substring search over node names
    ///
    /// Returns up to `limit` matching nodes together with their one-hop
    /// neighborhoods.
    pub fn search_by_name(&self, needle: &str, limit: usize) -> SubgraphView {
        let needle = needle.to_lowercase();
        let mut view = SubgraphView::default();
        let mut seen_nodes = HashSet::new();
        let mut seen_links = HashSet::new();
        let mut hits = 0usize;

        for index in self.graph.node_indices() {
            if hits >= limit {
                break;
            }
            let Some(node) = self.graph.node_weight(index) else {
                continue;
            };
            if !node.name.to_lowercase().contains(&needle) {
                continue;
            }
            hits += 1;

            if seen_nodes.insert(node.id.clone()) {
                view.nodes.push(node.clone());
            }
            for neighbor_index in self.graph.neighbors(index) {
                let Some(neighbor) = self.graph.node_weight(neighbor_index) else {
                    continue;
                };
                if seen_nodes.insert(neighbor.id.clone()) {
                    view.nodes.push(neighbor.clone());
                }
                let key = if node.id <= neighbor.id {
                    (node.id.clone(), neighbor.id.clone())
                } else {
                    (neighbor.id.clone(), node.id.clone())
                };
                if seen_links.insert(key) {
                    view.links.push(GraphLink {
                        source: node.id.clone(),
                        target: neighbor.id.clone(),
                    });
                }
            }
        }

        view
    }
}

/// An undirected link between two nodes, for browse responses
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GraphLink {
    /// One endpoint
    pub source: NodeId,
    /// The other endpoint
    pub target: NodeId,
}

/// A small node-and-link view of the graph
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct SubgraphView {
    /// Nodes in the view, deduplicated
    pub nodes: Vec<GraphNode>,
    /// Links among those nodes
    pub links: Vec<GraphLink>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_node_graph() -> PaperGraph {
        let mut graph = PaperGraph::new();
        graph.add_node(GraphNode::paper("p1", "A study of studies")).unwrap();
        graph.add_node(GraphNode::keyword("k1", "studies")).unwrap();
        graph.add_edge(&"p1".into(), &"k1".into()).unwrap();
        graph
    }

    #[test]
    fn test_node_and_edge_insertion() {
        let graph = two_node_graph();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.count_kind(NodeKind::Paper), 1);
        assert_eq!(graph.count_kind(NodeKind::Keyword), 1);
        assert!(graph.contains(&"p1".into()));
        assert_eq!(graph.node(&"k1".into()).unwrap().name, "studies");
    }

    #[test]
    fn test_duplicate_node_is_rejected() {
        let mut graph = two_node_graph();
        let error = graph
            .add_node(GraphNode::paper("p1", "again"))
            .unwrap_err();
        assert!(matches!(error, PaperGraphError::Graph { .. }));
    }

    #[test]
    fn test_same_kind_edge_is_rejected() {
        let mut graph = two_node_graph();
        graph.add_node(GraphNode::paper("p2", "Another study")).unwrap();
        let error = graph.add_edge(&"p1".into(), &"p2".into()).unwrap_err();
        assert!(matches!(error, PaperGraphError::Graph { .. }));
    }

    #[test]
    fn test_self_loop_and_duplicate_edge_are_rejected() {
        let mut graph = two_node_graph();
        assert!(graph.add_edge(&"p1".into(), &"p1".into()).is_err());
        assert!(graph.add_edge(&"p1".into(), &"k1".into()).is_err());
        assert!(graph.add_edge(&"k1".into(), &"p1".into()).is_err());
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_missing_endpoint_is_rejected() {
        let mut graph = two_node_graph();
        let error = graph.add_edge(&"p1".into(), &"ghost".into()).unwrap_err();
        assert!(matches!(error, PaperGraphError::Graph { .. }));
    }

    #[test]
    fn test_overview_bounds_edges() {
        let mut graph = PaperGraph::new();
        graph.add_node(GraphNode::keyword("k1", "shared")).unwrap();
        for i in 0..5 {
            let id = format!("p{i}");
            graph.add_node(GraphNode::paper(id.as_str(), format!("Paper {i}"))).unwrap();
            graph.add_edge(&id.as_str().into(), &"k1".into()).unwrap();
        }

        let view = graph.overview(2);
        assert_eq!(view.links.len(), 2);
        // two papers plus the shared keyword
        assert_eq!(view.nodes.len(), 3);
    }

    #[test]
    fn test_search_by_name_includes_one_hop() {
        let graph = two_node_graph();

        let view = graph.search_by_name("STUDY", 50);
        assert_eq!(view.nodes.len(), 2);
        assert_eq!(view.links.len(), 1);

        let miss = graph.search_by_name("nowhere", 50);
        assert!(miss.nodes.is_empty());
        assert!(miss.links.is_empty());
    }
}
