use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures that abort a request before a dashboard can be produced.
///
/// A ledger that cannot be loaded is not one of them: that becomes an error
/// bundle inside a normal response, see `view::DashboardPayload`.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    InvalidReferenceDate(#[from] core_types::CoreError),
    #[error("Analytics error: {0}")]
    Analytics(#[from] analytics::AnalyticsError),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InvalidReferenceDate(err) => {
                tracing::warn!(error = %err, "Rejected reference date.");
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            AppError::Analytics(err) => {
                tracing::warn!(error = ?err, "Reference date outside the supported calendar.");
                (StatusCode::BAD_REQUEST, err.to_string())
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
