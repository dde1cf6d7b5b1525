//! Forwarding of named actions to the search cluster
//!
//! Route handlers never talk HTTP to the cluster themselves. They build a
//! [`ClusterAction`] and hand it, together with the [`RequestContext`] of the
//! inbound request, to a [`ClusterClient`]. The production implementation is
//! [`HttpClusterClient`]; tests substitute a recording mock.

mod action;
mod error;
mod http;

pub use action::{ClusterAction, CAT_ALIASES_COLUMNS, CAT_INDICES_COLUMNS};
pub use error::{ClusterError, INDEX_NOT_FOUND_EXCEPTION};
pub use http::HttpClusterClient;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde_json::Value;

/// Executes a cluster action on behalf of an inbound request
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// Run `action` against the cluster, returning the raw JSON response.
    async fn call(&self, ctx: &RequestContext, action: ClusterAction)
        -> Result<Value, ClusterError>;
}

/// Per-request context propagated to the cluster
///
/// Carries the inbound headers (the client decides which ones are forwarded)
/// and an id used to correlate log lines.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub request_id: String,
    pub headers: HeaderMap,
}

impl RequestContext {
    pub fn new(headers: HeaderMap) -> Self {
        let request_id = headers
            .get("x-opaque-id")
            .and_then(|v| v.to_str().ok())
            .map(String::from)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        Self {
            request_id,
            headers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_request_id_reuses_opaque_id() {
        let mut headers = HeaderMap::new();
        headers.insert("x-opaque-id", HeaderValue::from_static("ui-1234"));
        let ctx = RequestContext::new(headers);
        assert_eq!(ctx.request_id, "ui-1234");
    }

    #[test]
    fn test_request_id_generated_when_absent() {
        let a = RequestContext::new(HeaderMap::new());
        let b = RequestContext::new(HeaderMap::new());
        assert!(!a.request_id.is_empty());
        assert_ne!(a.request_id, b.request_id);
    }
}
