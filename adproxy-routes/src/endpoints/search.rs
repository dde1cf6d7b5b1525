//! `POST /_search`

use super::finish;
use crate::extract::ValidJson;
use crate::request::SearchRequest;
use crate::response::Envelope;
use crate::router::ProxyState;
use adproxy::metrics::RequestTimer;
use adproxy::{ClusterAction, ClusterClient, RequestContext};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde_json::Value;

/// Run a search and return the cluster's response untouched
pub async fn execute_search(
    client: &dyn ClusterClient,
    ctx: &RequestContext,
    request: SearchRequest,
) -> Envelope<Value> {
    let timer = RequestTimer::new("search");

    let action = ClusterAction::Search {
        index: request.index.clone(),
        size: request.size(),
        body: request.into_body(),
    };
    let result = client.call(ctx, action).await.map_err(Into::into);

    finish(timer, ctx, "Anomaly detector - Unable to execute search", result)
}

/// POST /_search
pub async fn search_handler(
    State(state): State<ProxyState>,
    headers: HeaderMap,
    ValidJson(request): ValidJson<SearchRequest>,
) -> Json<Envelope<Value>> {
    let ctx = RequestContext::new(headers);
    Json(execute_search(state.client.as_ref(), &ctx, request).await)
}
