use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use blueflights_core::{CoreError, UpstreamError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => ApiError::Validation(msg),
            CoreError::Internal(msg) => ApiError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            ApiError::Upstream(UpstreamError::Provider { status, details }) => {
                tracing::warn!(status, "upstream call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({
                        "error": "Flight data provider request failed",
                        "details": details,
                    }),
                )
            }
            ApiError::Upstream(err) => {
                tracing::error!(error = %err, "upstream call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({
                        "error": "Error contacting flight data provider",
                        "details": err.to_string(),
                    }),
                )
            }
            ApiError::Internal(err) => {
                tracing::error!("Internal Server Error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal Server Error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
