//! Proxy route handlers
//!
//! Each operation comes in two layers: a plain `async fn` taking the
//! cluster client explicitly (used by tests and embedders), and an axum
//! handler binding it to [`ProxyState`](crate::router::ProxyState).

pub mod aliases;
pub mod bulk;
pub mod indices;
pub mod mappings;
pub mod search;

pub use aliases::{get_aliases, get_aliases_handler};
pub use bulk::{bulk, bulk_handler};
pub use indices::{
    create_index, create_index_handler, delete_index, delete_index_handler, get_indices,
    get_indices_handler,
};
pub use mappings::{get_mappings, get_mappings_handler};
pub use search::{execute_search, search_handler};

use crate::error::ProxyError;
use crate::response::Envelope;
use adproxy::metrics::RequestTimer;
use adproxy::RequestContext;
use serde_json::Value;
use tracing::error;

/// Log a failure with its operation prefix, record the outcome and wrap the
/// result in an envelope.
pub(crate) fn finish<T>(
    timer: RequestTimer,
    ctx: &RequestContext,
    failure_prefix: &str,
    result: crate::Result<T>,
) -> Envelope<T> {
    if let Err(e) = &result {
        error!(request_id = %ctx.request_id, "{}: {}", failure_prefix, e);
    }
    timer.finish(result.is_ok());
    result.into()
}

/// `_cat` replies are passed through untouched; only their outer shape is
/// checked.
pub(crate) fn cat_rows(action: &str, rows: Value) -> crate::Result<Value> {
    if rows.is_array() {
        Ok(rows)
    } else {
        Err(ProxyError::UnexpectedResponse(format!(
            "{}: expected an array of rows",
            action
        )))
    }
}
