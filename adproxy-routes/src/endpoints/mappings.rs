//! `GET /_mappings`

use super::finish;
use crate::extract::ValidQuery;
use crate::request::MappingsQuery;
use crate::response::{Envelope, GetMappingResponse};
use crate::router::ProxyState;
use adproxy::metrics::RequestTimer;
use adproxy::{ClusterAction, ClusterClient, RequestContext};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

/// Field mappings of the indices matching `index`, keyed by index name
pub async fn get_mappings(
    client: &dyn ClusterClient,
    ctx: &RequestContext,
    params: MappingsQuery,
) -> Envelope<GetMappingResponse> {
    let timer = RequestTimer::new("get_mappings");

    let result = client
        .call(ctx, ClusterAction::GetMapping { index: params.index })
        .await
        .map(|mappings| GetMappingResponse { mappings })
        .map_err(Into::into);

    finish(timer, ctx, "Anomaly detector - Unable to get mappings", result)
}

/// GET /_mappings?index=<pattern>
pub async fn get_mappings_handler(
    State(state): State<ProxyState>,
    headers: HeaderMap,
    ValidQuery(params): ValidQuery<MappingsQuery>,
) -> Json<Envelope<GetMappingResponse>> {
    let ctx = RequestContext::new(headers);
    Json(get_mappings(state.client.as_ref(), &ctx, params).await)
}
