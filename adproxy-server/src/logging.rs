//! Tracing subscriber setup

use adproxy::Config;
use anyhow::{bail, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::fmt::{self, writer::BoxMakeWriter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Install the global subscriber.
///
/// `RUST_LOG` overrides `observability.log_level` and `LOG_FORMAT` overrides
/// `observability.log_format`. Logs go to `logging.file` when set, stderr
/// otherwise.
pub fn init(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));

    let format =
        std::env::var("LOG_FORMAT").unwrap_or_else(|_| config.observability.log_format.clone());

    let writer = match &config.logging.file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let fmt_layer = match format.as_str() {
        "json" => fmt::layer()
            .json()
            .with_writer(writer)
            .with_current_span(true)
            .with_target(true)
            .boxed(),
        "pretty" => fmt::layer().with_writer(writer).with_target(true).boxed(),
        other => bail!("Invalid log format {:?}, expected \"pretty\" or \"json\"", other),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
