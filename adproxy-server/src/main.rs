mod app;
mod logging;

use adproxy::{ClusterClient, Config, HttpClusterClient};
use anyhow::Result;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::path::Path;
use std::sync::Arc;
use tokio::signal;

#[derive(Parser, Debug)]
#[command(name = "adproxy-server")]
#[command(about = "Anomaly detection UI proxy to the search cluster")]
#[command(version)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "adproxy.toml")]
    config: String,

    /// Address to bind to, overrides `server.bind_addr`
    #[arg(long)]
    bind_addr: Option<String>,

    /// Cluster base URL, overrides `cluster.url`
    #[arg(long, env = "ADPROXY_CLUSTER_URL")]
    cluster_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load_or_create(Path::new(&args.config))?;
    if let Some(addr) = args.bind_addr {
        config.server.bind_addr = addr;
    }
    if let Some(url) = args.cluster_url {
        config.cluster.url = url;
    }
    config.validate()?;

    logging::init(&config)?;

    tracing::info!("Config file: {}", args.config);

    let metrics = if config.observability.metrics_enabled {
        Some(PrometheusBuilder::new().install_recorder()?)
    } else {
        None
    };

    let client: Arc<dyn ClusterClient> = Arc::new(HttpClusterClient::new(&config.cluster)?);
    let router = app::build_app(&config.server, client, metrics);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr).await?;

    tracing::info!(
        addr = %config.server.bind_addr,
        base_path = %config.server.base_path,
        cluster = %config.cluster.url,
        "Starting adproxy server"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");

    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
