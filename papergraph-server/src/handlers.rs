//! HTTP handlers for search, path explanation and graph browsing

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use papergraph_core::{NodeId, PaperGraphError, PathExplanation, SearchOutput, SubgraphView};

use crate::models::{GraphSearchParams, OverviewParams, PathsParams, SearchParams, SearchResponse};
use crate::AppState;

/// Run one query end to end
///
/// An empty query is a valid request and yields an empty result.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let SearchOutput {
        papers,
        pattern,
        session,
    } = state.engine.search(&params.query);

    let session = state.sessions.insert(session).await;

    tracing::info!(
        documents = papers.len(),
        "search for {:?} complete",
        params.query
    );

    Json(SearchResponse {
        documents: papers,
        pattern,
        session,
    })
}

/// Explain why a paper appeared in an earlier search
pub async fn paths(
    State(state): State<AppState>,
    Path(paper_id): Path<String>,
    Query(params): Query<PathsParams>,
) -> Result<Json<PathExplanation>, (StatusCode, String)> {
    let Some(session) = state.sessions.get(&params.session).await else {
        return Err((
            StatusCode::NOT_FOUND,
            format!("Unknown or expired session '{}'", params.session),
        ));
    };

    match state.engine.explain(&session, &NodeId::new(paper_id)) {
        Ok(explanation) => Ok(Json(explanation)),
        Err(PaperGraphError::NotFound { .. }) => Err((
            StatusCode::NOT_FOUND,
            "This node was not part of the last search results.".to_string(),
        )),
        Err(error) => Err((StatusCode::INTERNAL_SERVER_ERROR, error.to_string())),
    }
}

/// Bounded sample of the graph for browsing
pub async fn graph_overview(
    State(state): State<AppState>,
    Query(params): Query<OverviewParams>,
) -> Json<SubgraphView> {
    Json(state.engine.graph_overview(params.limit))
}

/// Nodes whose name contains the query, each with its neighborhood
pub async fn graph_search(
    State(state): State<AppState>,
    Query(params): Query<GraphSearchParams>,
) -> Json<SubgraphView> {
    if params.query.trim().is_empty() {
        return Json(SubgraphView::default());
    }
    Json(state.engine.graph_search(&params.query, params.limit))
}
