//! Error types for the request lifecycle core.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Start date must be before or equal to end date")]
    InvalidRange,

    #[error("Maximum leave days per request is {max}")]
    DurationExceeded { max: i64 },

    #[error("You already have a pending or approved leave request for these dates")]
    OverlappingRequest,

    #[error("Amount must be at least 1")]
    InvalidAmount,

    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0}")]
    InvalidState(&'static str),

    #[error("{entity} is already processed")]
    AlreadyDecided { entity: &'static str },

    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;

impl ResponseError for WorkflowError {
    fn status_code(&self) -> StatusCode {
        match self {
            WorkflowError::InvalidRange
            | WorkflowError::DurationExceeded { .. }
            | WorkflowError::OverlappingRequest
            | WorkflowError::InvalidAmount
            | WorkflowError::MissingField { .. }
            | WorkflowError::InvalidState(_)
            | WorkflowError::AlreadyDecided { .. } => StatusCode::BAD_REQUEST,
            WorkflowError::Forbidden(_) => StatusCode::FORBIDDEN,
            WorkflowError::NotFound { .. } => StatusCode::NOT_FOUND,
            WorkflowError::Database(_) | WorkflowError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Infrastructure faults are logged here and never leak details.
        let message = match self {
            WorkflowError::Database(e) => {
                error!(error = %e, "Database error");
                "Internal Server Error".to_string()
            }
            WorkflowError::Internal(msg) => {
                error!(error = %msg, "Internal error");
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(json!({ "message": message }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_bad_request() {
        assert_eq!(
            WorkflowError::InvalidRange.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WorkflowError::DurationExceeded { max: 10 }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WorkflowError::AlreadyDecided { entity: "Leave" }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WorkflowError::InvalidState("Only approved claims can be marked as paid")
                .status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn authz_and_lookup_errors_keep_their_codes() {
        assert_eq!(
            WorkflowError::Forbidden("Admin only").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            WorkflowError::NotFound { entity: "Claim" }.status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(
            WorkflowError::DurationExceeded { max: 10 }.to_string(),
            "Maximum leave days per request is 10"
        );
        assert_eq!(
            WorkflowError::MissingField { field: "Description" }.to_string(),
            "Description is required"
        );
    }
}
