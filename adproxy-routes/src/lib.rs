//! Anomaly-detection proxy routes
//!
//! A thin HTTP layer between the anomaly-detection UI and the search
//! cluster. Every route validates its input, forwards one or two actions to
//! a [`ClusterClient`](adproxy::ClusterClient) and answers with a uniform
//! envelope:
//!
//! - `{"ok": true, "response": ...}` on success
//! - `{"ok": false, "error": "<message>"}` on failure
//!
//! # Endpoints
//!
//! Paths are relative to the mount point (`/api/anomaly_detectors` by
//! default):
//!
//! - `GET /_indices?index=` - List indices (`cat.indices`)
//! - `GET /_aliases?alias=` - List aliases (`cat.aliases`)
//! - `GET /_mappings?index=` - Field mappings (`indices.getMapping`)
//! - `POST /_search` - Search (`search`)
//! - `PUT /create_index` - Create an index, then list it
//! - `POST /bulk` - Bulk ingestion (`bulk`)
//! - `POST /delete_index` - Delete an index, then list the pattern
//!
//! Cluster failures are reported inside the envelope with HTTP 200.
//! Malformed requests never reach the cluster; they are answered with
//! HTTP 400 and a failure envelope.

pub mod endpoints;
pub mod error;
pub mod extract;
pub mod request;
pub mod response;
pub mod router;

pub use error::{ProxyError, ValidationError};
pub use response::Envelope;
pub use router::{proxy_router, ProxyState};

/// Result type for proxy operations
pub type Result<T> = std::result::Result<T, ProxyError>;
