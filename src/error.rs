use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

/// Every failure a handler can surface. Nothing here is retried and
/// nothing is fatal: each variant renders as one HTTP response.
#[derive(Error, Debug)]
pub enum AppError {
    /// Field-level rejection from the store's validation layer
    /// (missing/too-short/too-long/non-unique).
    #[error("{message}")]
    Validation { message: String, errors: Value },

    /// Missing, empty or unknown access token. The three cases are
    /// indistinguishable on the wire.
    #[error("you need to log in to see this page")]
    Unauthorized,

    /// The store or another upstream dependency failed. Distinct from
    /// `Unauthorized` even though both map to 4xx.
    #[error("{message}")]
    Store {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn validation(message: impl Into<String>, errors: Value) -> Self {
        Self::Validation {
            message: message.into(),
            errors,
        }
    }

    pub fn store(message: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::Store {
            message: message.into(),
            source: source.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation { message, errors } => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": message, "errors": errors })),
            )
                .into_response(),
            AppError::Unauthorized => (
                StatusCode::FORBIDDEN,
                Json(json!({ "message": "you need to log in to see this page" })),
            )
                .into_response(),
            AppError::Store { message, source } => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": message, "errors": source.to_string() })),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_renders_bad_request() {
        let err = AppError::validation("Could not save review", json!({ "message": "too short" }));
        let res = err.into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unauthorized_renders_forbidden() {
        let res = AppError::Unauthorized.into_response();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn store_error_renders_bad_request_with_detail() {
        let err = AppError::store("access denied", anyhow::anyhow!("connection refused"));
        assert!(err.to_string().contains("access denied"));
        let res = err.into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
