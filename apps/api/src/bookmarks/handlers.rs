//! Axum route handlers for saving and listing roadmap bookmarks.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::bookmarks::repository::{list_bookmarks, save_bookmark, NewBookmark, SaveOutcome};
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::models::saved_roadmap::SavedRoadmap;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub course: Option<String>,
    pub branch: Option<String>,
    pub year: Option<String>,
}

/// A duplicate save is a normal response with `success: false`, not an HTTP error.
#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// POST /api/save
///
/// `AuthUser` runs before the body is read, so anonymous callers get 401
/// whatever they send.
pub async fn handle_save(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(req): ApiJson<SaveRequest>,
) -> Result<Json<SaveResponse>, AppError> {
    let (Some(course), Some(branch), Some(year)) = (
        req.course.filter(|v| !v.is_empty()),
        req.branch.filter(|v| !v.is_empty()),
        req.year.filter(|v| !v.is_empty()),
    ) else {
        return Err(AppError::Validation(
            "course, branch and year are required".to_string(),
        ));
    };

    let outcome = save_bookmark(
        &state.db,
        NewBookmark {
            email: &user.email,
            course: &course,
            branch: &branch,
            year: &year,
        },
    )
    .await?;

    let response = match outcome {
        SaveOutcome::Created => SaveResponse {
            success: true,
            message: Some("Roadmap saved to profile!".to_string()),
            error: None,
        },
        SaveOutcome::Duplicate => SaveResponse {
            success: false,
            message: None,
            error: Some("Roadmap already saved!".to_string()),
        },
    };
    Ok(Json(response))
}

/// GET /api/saved_roadmaps
pub async fn handle_list_saved(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<SavedRoadmap>>, AppError> {
    let rows = list_bookmarks(&state.db, &user.email).await?;
    Ok(Json(rows.into_iter().map(SavedRoadmap::from).collect()))
}
