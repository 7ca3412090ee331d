use strum_macros::Display as EnumToString;
use thiserror::Error;
use tracing::subscriber::{set_global_default, SetGlobalDefaultError};
use tracing_log::{log::SetLoggerError, LogTracer};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

#[derive(Debug, EnumToString, PartialEq, Eq)]
#[strum(serialize_all = "kebab_case")]
pub enum LogKey {
    CountryLookup,
    EmptyQueryValue,
    InvalidFieldKind,
    RemoteFetch,
    RemoteFetchFailed,
    RemoteFetchSucceeded,
    Test, // For test cases
}

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Failed to set logger. {0}")]
    Logger(#[from] SetLoggerError),
    #[error("Failed to set subscriber. {0}")]
    Subscriber(#[from] SetGlobalDefaultError),
}

/// Creates a tracing subscriber and sets it as the global default.
///
/// `log` records (emitted by reqwest) are forwarded into the same
/// subscriber. Call once per process.
pub fn init_tracing<Sink>(log_level: &str, sink: Sink) -> Result<(), TelemetryError>
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    // Filter out any events that are below `log_level`.
    let env_filter = EnvFilter::new(log_level);

    let subscriber = Registry::default()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(sink));

    LogTracer::init()?;
    set_global_default(subscriber)?;
    Ok(())
}

pub fn info(log_key: &LogKey, message: &str) {
    tracing::info!(r#type = log_key.to_string().as_str(), message);
}

pub fn warn(log_key: &LogKey, message: &str) {
    tracing::warn!(r#type = log_key.to_string().as_str(), message);
}

pub fn error(log_key: &LogKey, message: &str, error: Option<&dyn std::error::Error>) {
    match error {
        Some(err) => tracing::error!(
            r#type = log_key.to_string().as_str(),
            "Message: '{}'. Original error: {}",
            message,
            err
        ),
        None => tracing::error!(r#type = log_key.to_string().as_str(), message),
    };
}
