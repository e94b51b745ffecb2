//! API error type and HTTP response mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use raffle_core::RaffleError;
use serde::{Deserialize, Serialize};

pub type ApiResult<T> = Result<T, ApiError>;

/// JSON error body.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    /// Stable machine-readable error code.
    pub code: String,
    /// Human-readable message, safe for clients.
    pub message: String,
}

/// HTTP API error with stable machine-readable code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    /// Malformed or missing request input.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "VALIDATION_ERROR",
            message: message.into(),
        }
    }

    /// Generic failure; details stay in the log.
    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "INTERNAL",
            message: "internal storage error".to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl From<RaffleError> for ApiError {
    fn from(value: RaffleError) -> Self {
        let status = match &value {
            RaffleError::Validation(_)
            | RaffleError::DuplicateKey(_)
            | RaffleError::AlreadyDrawnOrUnknown(_)
            | RaffleError::NoEligibleRecipients(_) => StatusCode::BAD_REQUEST,
            RaffleError::NotFound(_) => StatusCode::NOT_FOUND,
            RaffleError::Store(err) => {
                error!(
                    "event=request module=server status=error error_code={} error={}",
                    value.code(),
                    err
                );
                return Self::internal();
            }
        };
        Self {
            status,
            code: value.code(),
            message: value.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::validation(format!("invalid JSON body: {}", value.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ApiErrorBody {
                code: self.code.to_string(),
                message: self.message,
            }),
        )
            .into_response()
    }
}
