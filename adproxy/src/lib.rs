pub mod cluster;
pub mod config;
pub mod error;
pub mod metrics;

pub use cluster::{ClusterAction, ClusterClient, ClusterError, HttpClusterClient, RequestContext};
pub use config::Config;
pub use error::{Error, Result};
