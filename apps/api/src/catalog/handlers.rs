//! Axum route handlers for the catalog API.

use axum::{
    extract::{Query, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::debug;

use crate::catalog::export::export;
use crate::catalog::Catalog;
use crate::catalog::search::{search, SearchResults};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub course: Option<String>,
    pub branch: Option<String>,
    pub year: Option<String>,
}

/// GET /api/roadmap
pub async fn handle_get_roadmap(State(state): State<AppState>) -> Result<Json<Catalog>, AppError> {
    Ok(Json(state.catalog.load().await?))
}

/// GET /api/search?q=
pub async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResults>, AppError> {
    let query = params.q.unwrap_or_default();
    if query.is_empty() {
        return Err(AppError::Validation("No search query provided".to_string()));
    }

    let catalog = state.catalog.load().await?;
    let results = search(&catalog, &query)?;
    debug!("Search for {query:?} matched {} skills", results.count);
    Ok(Json(results))
}

/// GET /api/export?course=&branch=&year=
///
/// Serves the rendered roadmap as a plain-text attachment.
pub async fn handle_export(
    State(state): State<AppState>,
    Query(params): Query<ExportQuery>,
) -> Result<Response, AppError> {
    let (Some(course), Some(branch), Some(year)) = (
        non_empty(params.course),
        non_empty(params.branch),
        non_empty(params.year),
    ) else {
        return Err(AppError::Validation("Missing parameters".to_string()));
    };

    let catalog = state.catalog.load().await?;
    let rendered = export(&catalog, &course, &branch, &year)
        .ok_or_else(|| AppError::NotFound("Roadmap not found".to_string()))?;

    let disposition = HeaderValue::from_str(&format!("attachment; filename={}", rendered.filename))
        .map_err(|_| AppError::Validation("Roadmap name cannot be used as a filename".to_string()))?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        rendered.content,
    )
        .into_response())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
