use tracing::subscriber::{set_global_default, SetGlobalDefaultError};
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::{log_tracer::SetLoggerError, LogTracer};
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, EnvFilter, Registry};

use crate::helper::error_chain_fmt;

/// Builds the subscriber used by the sync client binary and by the tests.
///
/// Layers, from the innermost:
/// - `EnvFilter`: reads `RUST_LOG`, falls back to `fallback_env_filter` when it is unset
/// - `JsonStorageLayer`: keeps span fields so children events carry their parents' context
/// - `BunyanFormattingLayer`: writes one bunyan-compatible JSON record per line into `sink`
///
/// # Arguments
/// - `name`: name of the app, found in every record
/// - `fallback_env_filter`: filter level when `RUST_LOG` has not been set
/// - `sink`: where the records are written (`std::io::stdout`, `std::io::sink`, ...)
pub fn get_tracing_subscriber<Sink>(
    name: String,
    fallback_env_filter: String,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    // The sink must build a writer for any lifetime: https://doc.rust-lang.org/nomicon/hrtb.html
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_env_filter));

    let formatting_layer = BunyanFormattingLayer::new(name, sink);

    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// Registers a subscriber as the global default, and redirects `log` records to it.
///
/// Can only succeed once per process.
pub fn init_tracing_subscriber(
    subscriber: impl Subscriber + Send + Sync,
) -> Result<(), TelemetryError> {
    LogTracer::init()?;
    set_global_default(subscriber)?;

    Ok(())
}

#[derive(thiserror::Error)]
pub enum TelemetryError {
    #[error("The `log` records could not be redirected to tracing")]
    LogTracer(#[from] SetLoggerError),
    #[error("A global tracing subscriber has already been set")]
    GlobalDefault(#[from] SetGlobalDefaultError),
}

impl std::fmt::Debug for TelemetryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
