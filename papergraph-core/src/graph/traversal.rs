//! Bounded BFS over the paper-keyword graph
//!
//! Two traversals drive the whole pipeline: collecting the papers within a
//! hop bound of a matched keyword, and reconstructing one shortest path for
//! an explanation. Both treat the graph as unweighted.

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::graph::NodeIndex;

use crate::config::TraversalSettings;
use crate::core::{NodeId, NodeKind};
use crate::graph::PaperGraph;

/// A paper reached from a traversal start, with its hop distance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperHit {
    /// Paper identifier
    pub id: NodeId,
    /// Hops from the start node; first discovery wins
    pub distance: usize,
}

/// Traversal runner parameterized by hop bound
#[derive(Debug, Clone)]
pub struct Traverser {
    settings: TraversalSettings,
}

impl Traverser {
    /// Create a traverser with the given settings
    pub fn new(settings: TraversalSettings) -> Self {
        Self { settings }
    }

    /// Collect papers within the configured distance of `start`
    ///
    /// Keyword nodes are traversed through but never reported. The start
    /// node itself is reported at distance 0 when it is a paper. A missing
    /// start yields an empty result. Hits come out in BFS discovery order,
    /// which downstream ranking relies on for stable ties.
    pub fn papers_within_distance(&self, graph: &PaperGraph, start: &NodeId) -> Vec<PaperHit> {
        let Some(start_index) = graph.index_of(start) else {
            return Vec::new();
        };

        let mut distances: HashMap<NodeIndex, usize> = HashMap::new();
        let mut queue: VecDeque<(NodeIndex, usize)> = VecDeque::new();
        let mut hits = Vec::new();

        distances.insert(start_index, 0);
        queue.push_back((start_index, 0));

        while let Some((index, distance)) = queue.pop_front() {
            if let Some(node) = graph.node_at(index) {
                if node.kind == NodeKind::Paper {
                    hits.push(PaperHit {
                        id: node.id.clone(),
                        distance,
                    });
                }
            }
            if distance >= self.settings.max_distance {
                continue;
            }
            for neighbor in graph.neighbors(index) {
                if !distances.contains_key(&neighbor) {
                    distances.insert(neighbor, distance + 1);
                    queue.push_back((neighbor, distance + 1));
                }
            }
        }

        hits
    }

    /// One shortest path between two nodes, as external identifiers
    ///
    /// Returns `None` when either endpoint is missing or no path exists.
    /// The hop bound does not apply here; explanations may be longer than
    /// the retrieval neighborhood.
    pub fn shortest_path(
        &self,
        graph: &PaperGraph,
        source: &NodeId,
        target: &NodeId,
    ) -> Option<Vec<NodeId>> {
        let source_index = graph.index_of(source)?;
        let target_index = graph.index_of(target)?;

        if source_index == target_index {
            return Some(vec![source.clone()]);
        }

        let mut predecessors: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut visited: HashSet<NodeIndex> = HashSet::new();
        let mut queue: VecDeque<NodeIndex> = VecDeque::new();

        visited.insert(source_index);
        queue.push_back(source_index);

        while let Some(index) = queue.pop_front() {
            for neighbor in graph.neighbors(index) {
                if visited.insert(neighbor) {
                    predecessors.insert(neighbor, index);
                    if neighbor == target_index {
                        return self.reconstruct(graph, &predecessors, source_index, target_index);
                    }
                    queue.push_back(neighbor);
                }
            }
        }

        None
    }

    fn reconstruct(
        &self,
        graph: &PaperGraph,
        predecessors: &HashMap<NodeIndex, NodeIndex>,
        source: NodeIndex,
        target: NodeIndex,
    ) -> Option<Vec<NodeId>> {
        let mut indices = vec![target];
        let mut current = target;
        while current != source {
            current = *predecessors.get(&current)?;
            indices.push(current);
        }
        indices.reverse();

        let mut path = Vec::with_capacity(indices.len());
        for index in indices {
            path.push(graph.node_at(index)?.id.clone());
        }
        Some(path)
    }
}

impl Default for Traverser {
    fn default() -> Self {
        Self::new(TraversalSettings::default())
    }
}
