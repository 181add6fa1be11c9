//! HTTP-facing error type.
//!
//! Every failure is converted to a JSON body at the request boundary:
//!
//! ```json
//! { "error": "invalid key" }
//! { "error": "Vehicle RC API failed", "details": "HTTP 500" }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::application::services::LookupError;
use crate::domain::QueryError;

/// Usage hint attached to missing-parameter errors.
pub const USAGE_HINT: &str =
    "Use: ?query=CH01AC9090&key=SPLEXXO OR ?vehicle=CH01AC9090&key=SPLEXXO";

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or malformed parameters (400).
    #[error("{message}")]
    Validation {
        message: String,
        details: Option<String>,
    },

    /// Missing or unknown access key (403).
    #[error("{message}")]
    Forbidden { message: String },

    /// Unrouted path (404).
    #[error("{message}")]
    NotFound { message: String },

    /// Any method other than GET (405).
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Upstream unreachable, non-success status, or empty body (502).
    #[error("{message}")]
    Upstream {
        message: String,
        details: Option<String>,
    },

    /// Any other failure in the fetch pipeline (502).
    #[error("{message}")]
    Unexpected {
        message: String,
        details: Option<String>,
    },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Option<String>) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }
    pub fn upstream(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
            details: Some(details.into()),
        }
    }
    pub fn unexpected(details: Option<String>) -> Self {
        Self::Unexpected {
            message: "Vehicle RC API request error".to_string(),
            details: Some(details.unwrap_or_else(|| "unknown error".to_string())),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Upstream { .. } | AppError::Unexpected { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            AppError::Validation { message, details }
            | AppError::Upstream { message, details }
            | AppError::Unexpected { message, details } => ErrorBody {
                error: message,
                details,
            },
            AppError::Forbidden { message } | AppError::NotFound { message } => ErrorBody {
                error: message,
                details: None,
            },
            AppError::MethodNotAllowed => ErrorBody {
                error: "method not allowed".to_string(),
                details: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<QueryError> for AppError {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::Missing => AppError::bad_request(e.to_string(), Some(USAGE_HINT.to_string())),
            QueryError::TooShort { .. } => AppError::bad_request(e.to_string(), None),
        }
    }
}

impl From<LookupError> for AppError {
    fn from(e: LookupError) -> Self {
        match e {
            LookupError::UpstreamStatus { status } => {
                AppError::upstream("Vehicle RC API failed", format!("HTTP {}", status))
            }
            LookupError::UpstreamRequest(inner) => {
                AppError::upstream("Vehicle RC API request error", inner.to_string())
            }
            LookupError::Unexpected(message) => {
                AppError::unexpected((!message.is_empty()).then_some(message))
            }
        }
    }
}
