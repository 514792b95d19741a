//! Error taxonomy shared by every service and its HTTP rendering.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Missing or malformed field, bad date range.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Room unavailable, schedule overlap or an already finalized approval.
    #[error("{message}")]
    Conflict {
        message: String,
        conflicts: Option<serde_json::Value>,
    },

    /// A sibling service answered, but not with something usable.
    #[error("{0}")]
    Upstream(String),

    /// A sibling service could not be reached or timed out.
    #[error("{0}")]
    UpstreamUnavailable(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn not_found(resource: &str) -> Self {
        ServiceError::NotFound(format!("{} not found", resource))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ServiceError::Conflict {
            message: message.into(),
            conflicts: None,
        }
    }

    pub fn conflict_with<T: Serialize>(message: impl Into<String>, conflicts: &T) -> Self {
        ServiceError::Conflict {
            message: message.into(),
            conflicts: serde_json::to_value(conflicts).ok(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict { .. } => StatusCode::CONFLICT,
            ServiceError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ServiceError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflicts: Option<serde_json::Value>,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed with {}: {:#}", status, self);
        }
        let body = match self {
            ServiceError::Conflict { message, conflicts } => ErrorResponse {
                error: message,
                conflicts,
            },
            other => ErrorResponse {
                error: other.to_string(),
                conflicts: None,
            },
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        ServiceError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ServiceError {
    fn from(rejection: QueryRejection) -> Self {
        ServiceError::Validation(rejection.body_text())
    }
}
