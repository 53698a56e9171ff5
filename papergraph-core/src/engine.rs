//! Search engine facade
//!
//! One struct owns the loaded data and the tuned components, and runs the
//! whole pipeline per query: rank keywords, walk the graph around each one,
//! fuse the neighborhoods into a paper ranking, mine the co-occurrence
//! pattern. The result carries the [`SearchSession`] that later explain
//! calls need.

use std::collections::{BTreeSet, HashMap, HashSet};

use indexmap::IndexMap;

use crate::config::Config;
use crate::core::error::Result;
use crate::core::{NodeId, NodeKind, PaperRecord};
use crate::corpus::PaperStore;
use crate::graph::{PaperGraph, SubgraphView, Traverser};
use crate::mining::{AprioriMiner, PatternKeyword, PatternPaper, PatternSummary};
use crate::persistence::DataBundle;
use crate::retrieval::{
    explain_paths, fuse, FusionOutcome, KeywordNeighborhood, KeywordRanker, PathExplanation,
    SearchSession,
};

/// One complete answer to a query
#[derive(Debug, Clone)]
pub struct SearchOutput {
    /// Matching paper rows, best first, verbatim from the dataset
    pub papers: Vec<PaperRecord>,
    /// Densest keyword co-occurrence pattern across the results
    pub pattern: PatternSummary,
    /// State a later explain call needs
    pub session: SearchSession,
}

/// Corpus counts for health reporting
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct EngineStats {
    /// Nodes in the graph, papers and keywords together
    pub nodes: usize,
    /// Edges in the graph
    pub edges: usize,
    /// Rows in the tabular dataset
    pub papers: usize,
    /// Entries in the keyword vocabulary
    pub keywords: usize,
}

/// Read-only retrieval engine over one loaded data bundle
pub struct SearchEngine {
    graph: PaperGraph,
    store: PaperStore,
    ranker: KeywordRanker,
    traverser: Traverser,
    miner: AprioriMiner,
    keyword_ids: HashMap<String, NodeId>,
    miss_penalty: usize,
}

impl SearchEngine {
    /// Build the engine from loaded data and tuning parameters
    pub fn new(bundle: DataBundle, config: &Config) -> Self {
        let keyword_ids = bundle
            .graph
            .nodes()
            .filter(|node| node.kind == NodeKind::Keyword)
            .map(|node| (node.name.clone(), node.id.clone()))
            .collect();

        Self {
            ranker: KeywordRanker::new(bundle.vocabulary, &config.bm25),
            traverser: Traverser::new(config.traversal.clone()),
            miner: AprioriMiner::new(&config.mining),
            graph: bundle.graph,
            store: bundle.store,
            keyword_ids,
            miss_penalty: config.traversal.miss_penalty,
        }
    }

    /// Run one query end to end
    ///
    /// A query that matches nothing yields an empty output, never an error.
    pub fn search(&self, query: &str) -> SearchOutput {
        let ranked = self.ranker.rank(query);

        let mut seen = HashSet::new();
        let mut neighborhoods = Vec::new();
        for keyword in &ranked {
            let Some(id) = self.keyword_ids.get(&keyword.keyword) else {
                tracing::debug!("ranked keyword '{}' has no graph node", keyword.keyword);
                continue;
            };
            if !seen.insert(id.clone()) {
                continue;
            }
            neighborhoods.push(KeywordNeighborhood {
                keyword: id.clone(),
                hits: self.traverser.papers_within_distance(&self.graph, id),
            });
        }

        let FusionOutcome { ranking, match_map } = fuse(&neighborhoods, self.miss_penalty);
        let pattern = self.build_pattern(&match_map);

        let papers = ranking
            .iter()
            .filter_map(|id| self.store.record(id))
            .cloned()
            .collect();

        tracing::debug!(
            keywords = neighborhoods.len(),
            papers = match_map.len(),
            "search pipeline complete"
        );

        SearchOutput {
            papers,
            pattern,
            session: SearchSession::new(query.to_string(), match_map),
        }
    }

    /// Explain why `paper_id` appeared in the results of `session`
    pub fn explain(&self, session: &SearchSession, paper_id: &NodeId) -> Result<PathExplanation> {
        explain_paths(&self.graph, &self.store, &self.traverser, session, paper_id)
    }

    /// Corpus counts for health reporting
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            nodes: self.graph.node_count(),
            edges: self.graph.edge_count(),
            papers: self.store.len(),
            keywords: self.ranker.vocabulary_size(),
        }
    }

    /// Bounded sample of the graph for browsing
    pub fn graph_overview(&self, limit: usize) -> SubgraphView {
        self.graph.overview(limit)
    }

    /// Nodes whose name contains `needle`, each with its 1-hop neighborhood
    pub fn graph_search(&self, needle: &str, limit: usize) -> SubgraphView {
        self.graph.search_by_name(needle, limit)
    }

    /// Winning co-occurrence pattern plus every paper supporting it
    fn build_pattern(&self, match_map: &IndexMap<NodeId, BTreeSet<NodeId>>) -> PatternSummary {
        let transactions: Vec<BTreeSet<NodeId>> = match_map.values().cloned().collect();
        let Some(winner) = self.miner.densest_shared_itemset(&transactions) else {
            return PatternSummary::default();
        };

        let key_nodes = winner
            .items
            .iter()
            .filter_map(|id| self.graph.node(id))
            .map(|node| PatternKeyword {
                name: node.name.clone(),
                kind: node.kind,
            })
            .collect();

        let mut document_nodes: Vec<PatternPaper> = match_map
            .iter()
            .filter(|(_, matched)| winner.items.is_subset(matched))
            .filter_map(|(paper, _)| {
                let node = self.graph.node(paper)?;
                Some(PatternPaper {
                    name: node.name.clone(),
                    kind: node.kind,
                    issued_date: self
                        .store
                        .issued_date(paper)
                        .unwrap_or_default()
                        .to_string(),
                })
            })
            .collect();
        document_nodes.sort_by(|a, b| a.issued_date.cmp(&b.issued_date));

        PatternSummary {
            key_nodes,
            document_nodes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DataSettings;
    use crate::core::error::PaperGraphError;
    use crate::core::GraphNode;

    fn bundle() -> DataBundle {
        let mut graph = PaperGraph::new();
        graph
            .add_node(GraphNode::keyword("k1", "energy storage"))
            .unwrap();
        graph
            .add_node(GraphNode::keyword("k2", "grid balancing"))
            .unwrap();
        graph
            .add_node(GraphNode::paper("p1", "Battery systems for grids"))
            .unwrap();
        graph
            .add_node(GraphNode::paper("p2", "Storage materials"))
            .unwrap();
        graph
            .add_node(GraphNode::paper("p3", "Grid frequency control"))
            .unwrap();
        graph.add_edge(&"k1".into(), &"p1".into()).unwrap();
        graph.add_edge(&"k1".into(), &"p2".into()).unwrap();
        graph.add_edge(&"k2".into(), &"p1".into()).unwrap();
        graph.add_edge(&"k2".into(), &"p3".into()).unwrap();

        let csv = "\
id,dc.title[en_US],dc.date.issued[en_US],dc.identifier.uri[en_US]
p1,Battery systems for grids,2018,http://papers/p1
p2,Storage materials,2020,http://papers/p2
p3,Grid frequency control,2016,http://papers/p3
";
        let store =
            PaperStore::from_csv_reader(csv.as_bytes(), &DataSettings::default()).unwrap();

        DataBundle {
            graph,
            store,
            vocabulary: vec!["energy storage".to_string(), "grid balancing".to_string()],
            paper_index: HashMap::new(),
            keyword_index: HashMap::new(),
        }
    }

    fn engine() -> SearchEngine {
        SearchEngine::new(bundle(), &Config::default())
    }

    #[test]
    fn test_search_ranks_fully_matched_paper_first() {
        let output = engine().search("energy storage grid");

        let ids: Vec<&str> = output.papers.iter().filter_map(|p| p.get("id")).collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(ids[0], "p1");
        assert!(ids.contains(&"p2"));
        assert!(ids.contains(&"p3"));
    }

    #[test]
    fn test_search_mines_the_shared_pattern() {
        let output = engine().search("energy storage grid");

        let keywords: Vec<&str> = output
            .pattern
            .key_nodes
            .iter()
            .map(|k| k.name.as_str())
            .collect();
        assert_eq!(keywords, vec!["energy storage", "grid balancing"]);

        let dates: Vec<&str> = output
            .pattern
            .document_nodes
            .iter()
            .map(|d| d.issued_date.as_str())
            .collect();
        assert_eq!(dates, vec!["2016", "2018", "2020"]);
    }

    #[test]
    fn test_blank_query_yields_empty_output() {
        let output = engine().search("   ");
        assert!(output.papers.is_empty());
        assert!(output.pattern.key_nodes.is_empty());
        assert_eq!(output.session.paper_count(), 0);
    }

    #[test]
    fn test_vocabulary_term_without_a_node_is_skipped() {
        let mut bundle = bundle();
        bundle.vocabulary.push("phantom topic".to_string());
        let engine = SearchEngine::new(bundle, &Config::default());

        let output = engine.search("phantom");
        assert!(output.papers.is_empty());
        assert!(output.pattern.document_nodes.is_empty());
    }

    #[test]
    fn test_explain_round_trip() {
        let engine = engine();
        let output = engine.search("energy storage");

        let explanation = engine.explain(&output.session, &"p2".into()).unwrap();
        assert_eq!(explanation.query_name, "Storage materials");
        assert_eq!(explanation.query_uri, "http://papers/p2");
        assert_eq!(explanation.paths.len(), 1);
        assert!(!explanation.paths[0].is_empty());
    }

    #[test]
    fn test_explain_rejects_a_paper_outside_the_session() {
        let engine = engine();
        let output = engine.search("energy storage");

        let error = engine.explain(&output.session, &"p9".into()).unwrap_err();
        assert!(matches!(error, PaperGraphError::NotFound { .. }));
    }

    #[test]
    fn test_stats_reflect_the_bundle() {
        let stats = engine().stats();
        assert_eq!(stats.nodes, 5);
        assert_eq!(stats.edges, 4);
        assert_eq!(stats.papers, 3);
        assert_eq!(stats.keywords, 2);
    }

    #[test]
    fn test_empty_engine_answers_empty() {
        let engine = SearchEngine::new(
            DataBundle::empty(&DataSettings::default()),
            &Config::default(),
        );

        let output = engine.search("anything at all");
        assert!(output.papers.is_empty());
        assert_eq!(output.session.paper_count(), 0);
    }
}
