use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Failures at the service boundary.
///
/// Scoring itself never fails. These cover rejected requests and the
/// blocking-pool plumbing around the engine.
#[derive(Debug, Clone)]
pub enum AppError {
    /// A profile or options payload the engine should not see.
    InvalidInput(String),
    /// More candidates than the configured batch limit.
    BatchTooLarge { size: usize, max: usize },
    /// The scoring task panicked or was cancelled.
    ScoringFailed(String),
    /// Where in the request the inner error happened (`target`, `candidate #3`).
    WithContext {
        source: Box<AppError>,
        context: String,
    },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            AppError::BatchTooLarge { size, max } => {
                write!(f, "too many candidates: {} (max {})", size, max)
            }
            AppError::ScoringFailed(msg) => write!(f, "scoring failed: {}", msg),
            AppError::WithContext { source, context } => write!(f, "{}: {}", context, source),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) | AppError::BatchTooLarge { .. } => StatusCode::BAD_REQUEST,
            AppError::ScoringFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::WithContext { source, .. } => source.status(),
        }
    }
}

impl IntoResponse for AppError {
    /// `{"error": ...}` body. Server-side failures are logged and replaced
    /// with a generic message.
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
            "Internal server error".to_string()
        } else {
            tracing::debug!("Rejected request: {}", self);
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::ScoringFailed(err.to_string())
    }
}

/// Attaches request-location context to an `AppError`, in the spirit of
/// `anyhow::Context`.
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError>;

    /// Lazy variant, `f` only runs on the error path.
    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T, AppError> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.with_context(|| context.into())
    }

    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: f(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_keeps_client_status() {
        let err: Result<(), AppError> = Err(AppError::InvalidInput("name is empty".to_string()));
        let err = err.context("candidate #2").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "candidate #2: invalid input: name is empty");
    }

    #[test]
    fn test_with_context_is_lazy_on_success() {
        let ok: Result<u8, AppError> = Ok(7);
        let value = ok
            .with_context(|| panic!("context must not be built on success"))
            .unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_batch_too_large_message() {
        let err = AppError::BatchTooLarge { size: 501, max: 500 };
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "too many candidates: 501 (max 500)");
    }

    #[tokio::test]
    async fn test_scoring_failure_is_masked() {
        let response = AppError::ScoringFailed("worker panicked".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "Internal server error");
    }
}
