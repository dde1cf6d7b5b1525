//! Extractors that parse and validate route input

use crate::error::ValidationError;
use crate::request::ProxyRequest;
use adproxy::metrics::record_rejected;
use async_trait::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use tracing::warn;

/// JSON body parsed into `T` and validated
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

/// Query string parsed into `T` and validated
#[derive(Debug)]
pub struct ValidQuery<T>(pub T);

fn reject<T: ProxyRequest>(error: ValidationError) -> ValidationError {
    warn!(operation = T::OPERATION, "Rejected request: {}", error);
    record_rejected(T::OPERATION);
    error
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: ProxyRequest,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| reject::<T>(ValidationError::InvalidBody(e.body_text())))?;
        value.validate().map_err(reject::<T>)?;
        Ok(Self(value))
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: ProxyRequest,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| reject::<T>(ValidationError::InvalidQuery(e.body_text())))?;
        value.validate().map_err(reject::<T>)?;
        Ok(Self(value))
    }
}
