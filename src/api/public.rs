//! Public API types

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde_json::json;

use crate::core::TimesheetError;

// Errors

pub struct ApiError(anyhow::Error);

/// Convert `ApiError` into an Axum compatible response. Problems with
/// the request or its calendar are the caller's to fix and get a 400,
/// anything else is a 500.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Some(err) = self.0.downcast_ref::<TimesheetError>() {
            tracing::warn!("Rejected request: {}", err);
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "detail": err.to_string() })),
            )
                .into_response();
        }

        // Always log the error
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": format!("Something went wrong: {}", self.0) })),
        )
            .into_response()
    }
}

/// Enables using `?` on functions that return `Result<_,
/// anyhow::Error>` to turn them into `Result<_, ApiError>`
impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

// Re-export public types from each route

pub mod timesheet {
    pub use crate::api::routes::timesheet::public::*;
}
