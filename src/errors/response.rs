use axum::{
    response::{IntoResponse, Response, Redirect},
    http::StatusCode,
};
use crate::errors::AppError;

// Converts AppError into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Authentication errors send the browser back to the login form
            AppError::Auth(msg) => {
                tracing::warn!("Authentication required: {}", msg);
                Redirect::to("/login").into_response()
            }

            AppError::Session(e) => {
                tracing::error!("Session store failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Session error: {}", e)
                ).into_response()
            }

            AppError::File(e) => (
                StatusCode::BAD_REQUEST,
                format!("File error: {}", e)
            ).into_response(),

            AppError::Upload(msg) => (
                StatusCode::BAD_REQUEST,
                format!("Upload error: {}", msg)
            ).into_response(),

            AppError::Multipart(e) => {
                tracing::warn!("Rejected multipart body ({}): {}", e.status(), e);
                e.into_response()
            }

            AppError::NotFound(msg) => {
                tracing::debug!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, crate::handlers::NOT_FOUND_TEXT).into_response()
            }
        }
    }
}
