//! Unified error handling for the papergraph engine
//!
//! One central error type covers the load pipeline, graph construction and
//! query-time lookups, with a crate-wide `Result` alias.

use std::fmt;

/// Main error type for the papergraph engine
#[derive(Debug)]
pub enum PaperGraphError {
    /// Configuration-related errors
    Config {
        /// Error message
        message: String,
    },

    /// Data bundle loading errors
    Load {
        /// Error message
        message: String,
    },

    /// Graph construction and lookup errors
    Graph {
        /// Error message
        message: String,
    },

    /// Resource not found errors
    NotFound {
        /// Resource type
        resource: String,
        /// Resource identifier
        id: String,
    },

    /// I/O errors from file operations
    Io(std::io::Error),

    /// CSV parsing errors
    Csv(csv::Error),

    /// JSON serialization/deserialization errors
    SerdeJson(serde_json::Error),
}

impl fmt::Display for PaperGraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaperGraphError::Config { message } => {
                write!(
                    f,
                    "Configuration error: {message}. \
                          Solution: Check the config file or fall back to Config::default()"
                )
            },
            PaperGraphError::Load { message } => {
                write!(
                    f,
                    "Data load error: {message}. \
                          Solution: Verify the data directory and file names in [data]"
                )
            },
            PaperGraphError::Graph { message } => {
                write!(f, "Graph error: {message}")
            },
            PaperGraphError::NotFound { resource, id } => {
                write!(f, "{resource} not found: {id}")
            },
            PaperGraphError::Io(err) => {
                write!(
                    f,
                    "I/O error: {err}. \
                          Solution: Check file permissions and that paths exist"
                )
            },
            PaperGraphError::Csv(err) => {
                write!(f, "CSV parsing error: {err}")
            },
            PaperGraphError::SerdeJson(err) => {
                write!(f, "JSON error: {err}")
            },
        }
    }
}

impl std::error::Error for PaperGraphError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PaperGraphError::Io(err) => Some(err),
            PaperGraphError::Csv(err) => Some(err),
            PaperGraphError::SerdeJson(err) => Some(err),
            _ => None,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for PaperGraphError {
    fn from(err: std::io::Error) -> Self {
        PaperGraphError::Io(err)
    }
}

impl From<csv::Error> for PaperGraphError {
    fn from(err: csv::Error) -> Self {
        PaperGraphError::Csv(err)
    }
}

impl From<serde_json::Error> for PaperGraphError {
    fn from(err: serde_json::Error) -> Self {
        PaperGraphError::SerdeJson(err)
    }
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, PaperGraphError>;
