//! Axum route handlers for login, logout and session inspection.

use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::session::Session;
use crate::errors::AppError;
use crate::extract::ApiJson;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// POST /api/login
///
/// No credential check: any non-empty email becomes the session identity.
pub async fn handle_login(
    session: Session,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let email = req
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::Validation("Email is required".to_string()))?;

    session.login(&email);
    info!("Session opened for {email}");

    Ok(Json(LoginResponse {
        success: true,
        email,
    }))
}

/// POST /api/logout
pub async fn handle_logout(session: Session) -> Json<LogoutResponse> {
    if let Some(email) = session.current_identity() {
        info!("Session closed for {email}");
    }
    session.logout();
    Json(LogoutResponse { success: true })
}

/// GET /api/session
pub async fn handle_session(session: Session) -> Json<SessionResponse> {
    let email = session.current_identity();
    Json(SessionResponse {
        logged_in: email.is_some(),
        email,
    })
}
