use axum::extract::FromRequest;

use crate::errors::AppError;

/// `Json` body extractor whose rejections (missing content type, malformed
/// or mistyped JSON) come back in the `AppError` envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
