//! API error type with IntoResponse
//!
//! Errors become plain-text responses. Data access failures are logged
//! and answered with a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::db::StoreError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Malformed form or path input (400)
    Validation(ValidationError),

    /// Unknown user or no country for a fragment (404)
    NotFound { resource: &'static str, id: String },

    /// Fragment matches several countries (409)
    Ambiguous {
        fragment: String,
        candidates: Vec<String>,
    },

    /// Query or connection failure (500, logged)
    Database(StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Ambiguous { .. } => StatusCode::CONFLICT,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::Validation(e) => e.to_string(),
            Self::NotFound { resource: "country", .. } => "Country not found".to_owned(),
            Self::NotFound { resource, id } => format!("{} '{}' not found", resource, id),
            Self::Ambiguous {
                fragment,
                candidates,
            } => format!(
                "'{}' matches several countries: {}",
                fragment,
                candidates.join(", ")
            ),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!(error = %e, "data access failed");
                "Internal Server Error".to_owned()
            }
        };

        (status, message).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { resource, id } => Self::NotFound { resource, id },
            StoreError::Ambiguous {
                fragment,
                candidates,
            } => Self::Ambiguous {
                fragment,
                candidates: candidates.into_iter().map(|c| c.country_name).collect(),
            },
            StoreError::Sqlx(_) => Self::Database(e),
        }
    }
}
