//! Error types for the proxy routes

use crate::response::Envelope;
use adproxy::ClusterError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// A request that does not have the shape a route expects
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    #[error("Field `{0}` must not be empty")]
    EmptyField(&'static str),

    #[error("Invalid field `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// Failures of a forwarded operation, reported inside the envelope
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error(transparent)]
    Cluster(#[from] ClusterError),

    #[error("Unexpected cluster response: {0}")]
    UnexpectedResponse(String),
}

impl ProxyError {
    /// The cluster reported that the index pattern matches nothing
    pub fn is_index_not_found(&self) -> bool {
        matches!(self, Self::Cluster(e) if e.is_index_not_found())
    }
}

/// Rejections of malformed input answer 400 with a failure envelope
impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        let body: Envelope<()> = Envelope::Err(self.to_string());
        (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
    }
}
