use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Field name → list of human-readable messages, shown inline next to the
/// offending form field.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(FieldErrors),

    /// The content filter judged the text inappropriate. Attached to the
    /// field the admin was editing, with the filter's stated reason.
    #[error("content rejected: {reason}")]
    ContentRejected { field: String, reason: String },

    #[error("{0}")]
    InvalidState(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    ExternalService(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Internal(e.into())
    }
}

impl ApiError {
    pub fn field_errors(&self) -> Option<FieldErrors> {
        match self {
            ApiError::Validation(errors) => Some(errors.clone()),
            ApiError::ContentRejected { field, reason } => {
                let mut errors = FieldErrors::new();
                errors.insert(field.clone(), vec![reason.clone()]);
                Some(errors)
            }
            _ => None,
        }
    }
}

/// Every error resolves into the admin-action result shape
/// `{ "type": "error", "message"?, "errors"? }` — nothing escapes as a crash.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Some(errors) = self.field_errors() {
            let body = json!({ "type": "error", "errors": errors });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response();
        }

        let (status, message) = match &self {
            ApiError::InvalidState(_) => (StatusCode::CONFLICT, self.to_string()),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::ExternalService(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
            ApiError::Internal(e) => {
                tracing::error!("internal error: {e:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong. Please try again.".to_string(),
                )
            }
            // Handled above.
            ApiError::Validation(_) | ApiError::ContentRejected { .. } => unreachable!(),
        };

        let body = json!({ "type": "error", "message": message });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_rejected_attaches_reason_to_field() {
        let err = ApiError::ContentRejected {
            field: "content".into(),
            reason: "Contains political content.".into(),
        };
        let errors = err.field_errors().unwrap();
        assert_eq!(errors["content"], vec!["Contains political content."]);
    }

    #[test]
    fn invalid_state_has_no_field_errors() {
        let err = ApiError::InvalidState("nothing is live".into());
        assert!(err.field_errors().is_none());
    }
}
