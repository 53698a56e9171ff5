//! PaperGraph REST API server
//!
//! Serves search, path explanation and graph browsing over a corpus loaded
//! once at startup. Query-time state is read-only; per-search sessions live
//! in a TTL-bounded store so explanation calls can find them again.
//!
//! ## Quick Start
//!
//! ```bash
//! # with ./data populated and papergraph.toml present
//! cargo run --bin papergraph-server
//!
//! # or point at another configuration
//! PAPERGRAPH_CONFIG=/etc/papergraph.toml cargo run --bin papergraph-server
//! ```

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::Method;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use papergraph_core::{Config, DataBundle, SearchEngine};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

mod handlers;
mod models;
mod sessions;

use sessions::SessionStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine>,
    pub sessions: Arc<SessionStore>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    let config = load_config();
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let bundle = DataBundle::load(&config.data);
    let state = AppState {
        engine: Arc::new(SearchEngine::new(bundle, &config)),
        sessions: Arc::new(SessionStore::new(
            Duration::from_secs(config.server.session_ttl_secs),
            config.server.session_capacity,
        )),
    };

    let app = app(state);

    tracing::info!("🚀 PaperGraph server starting...");
    tracing::info!("📡 Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Router with all endpoints and permissive CORS
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/search", get(handlers::search))
        .route("/paths/{paper_id}", get(handlers::paths))
        .route("/graph/overview", get(handlers::graph_overview))
        .route("/graph/search", get(handlers::graph_search))
        .layer(cors)
        .with_state(state)
}

/// Configuration from `PAPERGRAPH_CONFIG`, `./papergraph.toml`, or defaults
fn load_config() -> Config {
    let path =
        std::env::var("PAPERGRAPH_CONFIG").unwrap_or_else(|_| "papergraph.toml".to_string());

    match Config::from_file(&path) {
        Ok(config) => {
            tracing::info!("✅ Loaded configuration from {}", path);
            config
        },
        Err(error) => {
            if std::path::Path::new(&path).exists() {
                tracing::error!("⚠️  Could not load {}: {}. Using defaults.", path, error);
            } else {
                tracing::info!("📦 No configuration file at {}, using defaults", path);
            }
            Config::default()
        },
    }
}

/// Root endpoint - API information
async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "name": "PaperGraph REST API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "health": "GET /health",
            "search": "GET /search?query=...",
            "paths": "GET /paths/{paper_id}?session=...",
            "graph": {
                "overview": "GET /graph/overview?limit=50",
                "search": "GET /graph/search?query=...&limit=50"
            }
        }
    }))
}

/// Health check endpoint
async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let stats = state.engine.stats();

    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "nodes": stats.nodes,
        "edges": stats.edges,
        "papers": stats.papers,
        "keywords": stats.keywords,
        "sessions": state.sessions.len().await
    }))
}
