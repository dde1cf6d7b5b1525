//! Index listing, creation and deletion
//!
//! Creation and deletion are each followed by a listing of the affected
//! index, so the UI can refresh its view from a single call. The two cluster
//! calls always run in sequence; the listing never starts when the first
//! step fails fatally.

use super::{cat_rows, finish};
use crate::extract::{ValidJson, ValidQuery};
use crate::request::{CreateIndexRequest, DeleteIndexRequest, IndicesQuery};
use crate::response::{Envelope, GetIndicesResponse};
use crate::router::ProxyState;
use adproxy::metrics::RequestTimer;
use adproxy::{ClusterAction, ClusterClient, RequestContext};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde_json::Value;
use tracing::{debug, warn};

const GET_INDICES_FAILED: &str = "Anomaly detector - Unable to get indices";

/// `cat.indices` restricted to `health,index`
async fn list_indices(
    client: &dyn ClusterClient,
    ctx: &RequestContext,
    index: Option<String>,
) -> crate::Result<Value> {
    let rows = client
        .call(ctx, ClusterAction::CatIndices { index })
        .await?;
    cat_rows("cat.indices", rows)
}

/// List indices matching `index`.
///
/// A pattern that matches nothing is reported by the cluster as
/// `index_not_found_exception`; that is answered with an empty list.
pub async fn get_indices(
    client: &dyn ClusterClient,
    ctx: &RequestContext,
    params: IndicesQuery,
) -> Envelope<GetIndicesResponse> {
    let timer = RequestTimer::new("get_indices");

    let result = match list_indices(client, ctx, params.index).await {
        Ok(indices) => Ok(GetIndicesResponse { indices }),
        Err(e) if e.is_index_not_found() => {
            debug!(request_id = %ctx.request_id, "No indices match: {}", e);
            Ok(GetIndicesResponse {
                indices: Value::Array(Vec::new()),
            })
        }
        Err(e) => Err(e),
    };

    finish(timer, ctx, GET_INDICES_FAILED, result)
}

/// Create an index, then list it
pub async fn create_index(
    client: &dyn ClusterClient,
    ctx: &RequestContext,
    request: CreateIndexRequest,
) -> Envelope<GetIndicesResponse> {
    let timer = RequestTimer::new("create_index");
    let config = request.index_config;

    let created = client
        .call(
            ctx,
            ClusterAction::CreateIndex {
                index: config.index.clone(),
                body: config.body,
            },
        )
        .await;
    if let Err(e) = created {
        return finish(
            timer,
            ctx,
            "Anomaly detector - Unable to create index",
            Err(e.into()),
        );
    }

    let result = list_indices(client, ctx, Some(config.index))
        .await
        .map(|indices| GetIndicesResponse { indices });

    finish(timer, ctx, GET_INDICES_FAILED, result)
}

/// Delete an index, then list the same pattern.
///
/// Deleting an index that does not exist is not an error; the listing still
/// runs and its outcome is returned.
pub async fn delete_index(
    client: &dyn ClusterClient,
    ctx: &RequestContext,
    request: DeleteIndexRequest,
) -> Envelope<GetIndicesResponse> {
    let timer = RequestTimer::new("delete_index");
    let index = request.index;

    let deleted = client
        .call(
            ctx,
            ClusterAction::DeleteIndex {
                index: index.clone(),
            },
        )
        .await;
    match deleted {
        Err(e) if e.is_index_not_found() => {
            warn!(
                request_id = %ctx.request_id,
                "Anomaly detector - Unable to perform delete index action: {}", e
            );
        }
        Err(e) => {
            return finish(
                timer,
                ctx,
                "Anomaly detector - Unable to perform delete index action",
                Err(e.into()),
            );
        }
        Ok(_) => {}
    }

    let result = list_indices(client, ctx, Some(index))
        .await
        .map(|indices| GetIndicesResponse { indices });

    finish(timer, ctx, GET_INDICES_FAILED, result)
}

/// GET /_indices?index=<pattern>
pub async fn get_indices_handler(
    State(state): State<ProxyState>,
    headers: HeaderMap,
    ValidQuery(params): ValidQuery<IndicesQuery>,
) -> Json<Envelope<GetIndicesResponse>> {
    let ctx = RequestContext::new(headers);
    Json(get_indices(state.client.as_ref(), &ctx, params).await)
}

/// PUT /create_index
pub async fn create_index_handler(
    State(state): State<ProxyState>,
    headers: HeaderMap,
    ValidJson(request): ValidJson<CreateIndexRequest>,
) -> Json<Envelope<GetIndicesResponse>> {
    let ctx = RequestContext::new(headers);
    Json(create_index(state.client.as_ref(), &ctx, request).await)
}

/// POST /delete_index
pub async fn delete_index_handler(
    State(state): State<ProxyState>,
    headers: HeaderMap,
    ValidJson(request): ValidJson<DeleteIndexRequest>,
) -> Json<Envelope<GetIndicesResponse>> {
    let ctx = RequestContext::new(headers);
    Json(delete_index(state.client.as_ref(), &ctx, request).await)
}
