//! Error type definitions for the catalog API.
//!
//! Two layers: [`RepositoryError`] covers everything the store adapter and
//! query layer can fail with, [`ApiError`] is the web-facing taxonomy that
//! maps onto HTTP statuses. Client responses only ever carry the generic
//! message; the underlying cause is logged, never serialized.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type RepositoryResult<T> = Result<T, RepositoryError>;
pub type ApiResult<T> = Result<T, ApiError>;

/// Data-layer errors surfaced by the repositories.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Store connection or query execution failures
    #[error("query failed: {0}")]
    Query(#[from] sqlx::Error),

    /// A stored document could not be decoded
    #[error("malformed document: {0}")]
    MalformedDocument(#[from] serde_json::Error),
}

/// Web-facing error taxonomy.
///
/// `NotFound` -> 404, `InvalidRequest` -> 400, `Upstream` -> 500. The display
/// string is exactly the body's `error` field.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("{message}")]
    Upstream { message: &'static str },
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_taxonomy() {
        assert_eq!(
            ApiError::not_found("Movie not found").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::invalid_request("bad").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Upstream { message: "boom" }.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn display_is_the_client_message() {
        let err = ApiError::not_found("Series not found");
        assert_eq!(err.to_string(), "Series not found");
    }
}
