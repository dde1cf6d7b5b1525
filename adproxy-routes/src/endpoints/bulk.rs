//! `POST /bulk`

use super::finish;
use crate::extract::ValidJson;
use crate::request::BulkRequest;
use crate::response::{BulkResponse, Envelope};
use crate::router::ProxyState;
use adproxy::metrics::RequestTimer;
use adproxy::{ClusterAction, ClusterClient, RequestContext};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use tracing::debug;

/// Forward a bulk payload unmodified; per-item failures stay inside the
/// returned bulk result.
pub async fn bulk(
    client: &dyn ClusterClient,
    ctx: &RequestContext,
    request: BulkRequest,
) -> Envelope<BulkResponse> {
    let timer = RequestTimer::new("bulk");

    let result = client
        .call(ctx, ClusterAction::Bulk { body: request.body })
        .await
        .map(|response| {
            if response.get("errors").and_then(|v| v.as_bool()) == Some(true) {
                debug!(request_id = %ctx.request_id, "bulk completed with item errors");
            }
            BulkResponse { response }
        })
        .map_err(Into::into);

    finish(timer, ctx, "Anomaly detector - Unable to perform bulk action", result)
}

/// POST /bulk
pub async fn bulk_handler(
    State(state): State<ProxyState>,
    headers: HeaderMap,
    ValidJson(request): ValidJson<BulkRequest>,
) -> Json<Envelope<BulkResponse>> {
    let ctx = RequestContext::new(headers);
    Json(bulk(state.client.as_ref(), &ctx, request).await)
}
