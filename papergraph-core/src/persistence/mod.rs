//! Startup data loading
//!
//! The engine is read-only at query time, so everything it needs is read
//! from the data directory in one pass at startup and served from memory
//! afterwards.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::DataSettings;
use crate::core::error::Result;
use crate::core::{GraphNode, NodeId};
use crate::corpus::PaperStore;
use crate::graph::PaperGraph;

/// On-disk form of the bipartite graph
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// All nodes, papers and keywords alike
    pub nodes: Vec<GraphNode>,
    /// Edges as id pairs
    pub edges: Vec<(NodeId, NodeId)>,
}

impl GraphSnapshot {
    /// Rebuild the in-memory graph from the snapshot
    pub fn into_graph(self) -> Result<PaperGraph> {
        let mut graph = PaperGraph::new();
        for node in self.nodes {
            graph.add_node(node)?;
        }
        for (a, b) in &self.edges {
            graph.add_edge(a, b)?;
        }
        Ok(graph)
    }
}

/// Everything the engine consumes, loaded from disk in one pass
#[derive(Debug, Default)]
pub struct DataBundle {
    /// Bipartite paper-keyword graph
    pub graph: PaperGraph,
    /// Tabular paper dataset
    pub store: PaperStore,
    /// Keyword vocabulary in file order
    pub vocabulary: Vec<String>,
    /// Paper name to id lookup, kept for diagnostics
    pub paper_index: HashMap<String, String>,
    /// Keyword name to id lookup, kept for diagnostics
    pub keyword_index: HashMap<String, String>,
}

impl DataBundle {
    /// Bundle with no data; the engine runs but answers everything empty
    pub fn empty(settings: &DataSettings) -> Self {
        Self {
            graph: PaperGraph::new(),
            store: PaperStore::new(settings),
            vocabulary: Vec::new(),
            paper_index: HashMap::new(),
            keyword_index: HashMap::new(),
        }
    }

    /// Load the bundle, degrading to an empty one on any failure
    ///
    /// The server has to come up even when the data directory is absent or
    /// corrupt, so failures are logged instead of propagated.
    pub fn load(settings: &DataSettings) -> Self {
        match Self::try_load(settings) {
            Ok(bundle) => {
                tracing::info!(
                    nodes = bundle.graph.node_count(),
                    edges = bundle.graph.edge_count(),
                    papers = bundle.store.len(),
                    keywords = bundle.vocabulary.len(),
                    "loaded data bundle from {}",
                    settings.data_dir
                );
                bundle
            }
            Err(error) => {
                tracing::error!(
                    "failed to load data from {}: {}, starting empty",
                    settings.data_dir,
                    error
                );
                Self::empty(settings)
            }
        }
    }

    /// Load the bundle, surfacing the first failure
    pub fn try_load(settings: &DataSettings) -> Result<Self> {
        let dir = PathBuf::from(&settings.data_dir);

        let snapshot: GraphSnapshot = read_json(&dir.join(&settings.graph_file))?;
        let graph = snapshot.into_graph()?;
        let store = PaperStore::from_csv_path(dir.join(&settings.papers_file), settings)?;
        let vocabulary = read_vocabulary(&dir.join(&settings.vocabulary_file))?;
        let paper_index = read_json(&dir.join(&settings.paper_index_file))?;
        let keyword_index = read_json(&dir.join(&settings.keyword_index_file))?;

        Ok(Self {
            graph,
            store,
            vocabulary,
            paper_index,
            keyword_index,
        })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

fn read_vocabulary(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
