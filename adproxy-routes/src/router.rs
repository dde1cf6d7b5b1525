//! Proxy router

use crate::endpoints::{
    bulk_handler, create_index_handler, delete_index_handler, get_aliases_handler,
    get_indices_handler, get_mappings_handler, search_handler,
};
use adproxy::ClusterClient;
use axum::routing::{get, post, put};
use axum::Router;
use std::sync::Arc;

/// State shared by the proxy handlers
#[derive(Clone)]
pub struct ProxyState {
    pub client: Arc<dyn ClusterClient>,
}

/// Create the proxy router
///
/// Paths are relative; the caller nests the router under its base path.
///
/// # Endpoints
///
/// - `GET /_indices` - List indices
/// - `GET /_aliases` - List aliases
/// - `GET /_mappings` - Get mappings
/// - `POST /_search` - Search
/// - `PUT /create_index` - Create index
/// - `POST /bulk` - Bulk operations
/// - `POST /delete_index` - Delete index
pub fn proxy_router(client: Arc<dyn ClusterClient>) -> Router {
    let state = ProxyState { client };

    Router::new()
        // Listing endpoints
        .route("/_indices", get(get_indices_handler))
        .route("/_aliases", get(get_aliases_handler))
        .route("/_mappings", get(get_mappings_handler))
        // Search
        .route("/_search", post(search_handler))
        // Index management
        .route("/create_index", put(create_index_handler))
        .route("/delete_index", post(delete_index_handler))
        // Ingestion
        .route("/bulk", post(bulk_handler))
        .with_state(state)
}
