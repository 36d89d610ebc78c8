use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

use crate::domain::error::LedgerError;
use shared::ErrorResponse;

/// Error type for HTTP handlers.
///
/// Wraps [`LedgerError`] for rejected commands and adds malformed-input
/// cases that never reach the domain. Renders as `{ "error", "code" }`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Ledger(e) => match e {
                LedgerError::InvalidType(_) | LedgerError::InvalidQuantity(_) => {
                    StatusCode::BAD_REQUEST
                }
                LedgerError::NotFound { .. } => StatusCode::NOT_FOUND,
                LedgerError::InvalidTransition { .. } | LedgerError::DuplicateId(_) => {
                    StatusCode::CONFLICT
                }
                LedgerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Ledger(e) => e.code(),
            ApiError::BadRequest(_) => "BAD_REQUEST",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!(error = %self, "Internal error");
            "An internal error occurred".to_string()
        } else {
            warn!(code = self.code(), "{}", self);
            self.to_string()
        };

        let body = ErrorResponse {
            error: message,
            code: self.code().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (LedgerError::InvalidType("x".into()), StatusCode::BAD_REQUEST),
            (LedgerError::InvalidQuantity(0), StatusCode::BAD_REQUEST),
            (LedgerError::diary_not_found("d"), StatusCode::NOT_FOUND),
            (LedgerError::DuplicateId("d".into()), StatusCode::CONFLICT),
            (LedgerError::Storage("poisoned".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            assert_eq!(ApiError::from(error).status(), status);
        }
        assert_eq!(ApiError::BadRequest("nope".into()).code(), "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_body_shape() {
        let response = ApiError::from(LedgerError::InvalidQuantity(501)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.code, "INVALID_QUANTITY");
        assert_eq!(body.error, "Quantity 501 is outside the allowed range 1..=500");
    }
}
