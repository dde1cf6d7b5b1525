//! `GET /_aliases`

use super::{cat_rows, finish};
use crate::extract::ValidQuery;
use crate::request::AliasesQuery;
use crate::response::{Envelope, GetAliasesResponse};
use crate::router::ProxyState;
use crate::ProxyError;
use adproxy::metrics::RequestTimer;
use adproxy::{ClusterAction, ClusterClient, RequestContext};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

/// List aliases matching `alias` (all aliases when absent)
pub async fn get_aliases(
    client: &dyn ClusterClient,
    ctx: &RequestContext,
    params: AliasesQuery,
) -> Envelope<GetAliasesResponse> {
    let timer = RequestTimer::new("get_aliases");

    let result = async {
        let rows = client
            .call(ctx, ClusterAction::CatAliases { alias: params.alias })
            .await?;
        let aliases = cat_rows("cat.aliases", rows)?;
        Ok::<_, ProxyError>(GetAliasesResponse { aliases })
    }
    .await;

    finish(timer, ctx, "Anomaly detector - Unable to get aliases", result)
}

/// GET /_aliases?alias=<pattern>
pub async fn get_aliases_handler(
    State(state): State<ProxyState>,
    headers: HeaderMap,
    ValidQuery(params): ValidQuery<AliasesQuery>,
) -> Json<Envelope<GetAliasesResponse>> {
    let ctx = RequestContext::new(headers);
    Json(get_aliases(state.client.as_ref(), &ctx, params).await)
}
