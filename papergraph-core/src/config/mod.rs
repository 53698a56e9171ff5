//! Configuration for the papergraph engine
//!
//! All tunables live in one serde tree with TOML file loading. Defaults
//! reproduce the ranking behaviour the corpus was calibrated against, so an
//! absent config file is a fully working setup.

use std::fs;
use std::path::Path;

use crate::core::error::{PaperGraphError, Result};

/// Top-level configuration tree
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Keyword ranking parameters
    pub bm25: Bm25Settings,
    /// Graph neighborhood traversal parameters
    pub traversal: TraversalSettings,
    /// Co-occurrence mining parameters
    pub mining: MiningSettings,
    /// Data bundle file locations
    pub data: DataSettings,
    /// HTTP server parameters
    pub server: ServerSettings,
}

/// BM25 parameters for ranking vocabulary keywords against a query
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Bm25Settings {
    /// Term frequency saturation parameter
    pub k1: f32,
    /// Length normalization parameter
    pub b: f32,
    /// Maximum number of keywords kept per query
    pub max_keywords: usize,
}

impl Default for Bm25Settings {
    fn default() -> Self {
        Self {
            k1: 1.5,
            b: 0.75,
            max_keywords: 10,
        }
    }
}

/// Bounded BFS parameters for keyword neighborhoods
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TraversalSettings {
    /// Maximum hop distance from a matched keyword to a paper
    pub max_distance: usize,
    /// Score charged for a keyword a paper was not reached from
    pub miss_penalty: usize,
}

impl Default for TraversalSettings {
    fn default() -> Self {
        Self {
            max_distance: 3,
            miss_penalty: 7,
        }
    }
}

/// Frequent itemset mining parameters
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MiningSettings {
    /// Minimum transaction support during level-wise growth
    pub min_support: usize,
}

impl Default for MiningSettings {
    fn default() -> Self {
        Self { min_support: 1 }
    }
}

/// File names and columns of the persisted data bundle
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Directory containing all bundle files
    pub data_dir: String,
    /// Graph snapshot (JSON)
    pub graph_file: String,
    /// Tabular paper dataset (CSV)
    pub papers_file: String,
    /// Keyword vocabulary, one keyword per line
    pub vocabulary_file: String,
    /// Paper name to id lookup table (JSON)
    pub paper_index_file: String,
    /// Keyword name to id lookup table (JSON)
    pub keyword_index_file: String,
    /// CSV column holding the paper identifier
    pub id_column: String,
    /// CSV column holding the issue date
    pub date_column: String,
    /// CSV column holding the paper URI
    pub uri_column: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            graph_file: "graph.json".to_string(),
            papers_file: "papers.csv".to_string(),
            vocabulary_file: "keywords.txt".to_string(),
            paper_index_file: "paper_index.json".to_string(),
            keyword_index_file: "keyword_index.json".to_string(),
            id_column: "id".to_string(),
            date_column: "dc.date.issued[en_US]".to_string(),
            uri_column: "dc.identifier.uri[en_US]".to_string(),
        }
    }
}

/// HTTP server parameters
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Seconds an unused search session stays resolvable
    pub session_ttl_secs: u64,
    /// Maximum number of retained search sessions
    pub session_capacity: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            session_ttl_secs: 1800,
            session_capacity: 1024,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let extension = path.extension().and_then(|ext| ext.to_str());
        if extension != Some("toml") {
            return Err(PaperGraphError::Config {
                message: format!("unsupported config format: {}", path.display()),
            });
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| PaperGraphError::Config {
            message: format!("failed to parse {}: {e}", path.display()),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate parameter ranges
    pub fn validate(&self) -> Result<()> {
        if self.bm25.k1 <= 0.0 {
            return Err(PaperGraphError::Config {
                message: format!("bm25.k1 must be positive, got {}", self.bm25.k1),
            });
        }
        if !(0.0..=1.0).contains(&self.bm25.b) {
            return Err(PaperGraphError::Config {
                message: format!("bm25.b must be in [0, 1], got {}", self.bm25.b),
            });
        }
        if self.bm25.max_keywords == 0 {
            return Err(PaperGraphError::Config {
                message: "bm25.max_keywords must be at least 1".to_string(),
            });
        }
        if self.mining.min_support == 0 {
            return Err(PaperGraphError::Config {
                message: "mining.min_support must be at least 1".to_string(),
            });
        }
        if self.server.session_capacity == 0 {
            return Err(PaperGraphError::Config {
                message: "server.session_capacity must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
