use crate::config::{AppEnvironment, TelemetryConfig};
use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{value}'")]
    Filter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("tracing subscriber already installed: {0}")]
    Subscriber(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Filter used when neither `RUST_LOG` nor `APP_LOG_LEVEL` is set.
pub fn default_directive(environment: AppEnvironment) -> &'static str {
    match environment {
        AppEnvironment::Development => "info,talent_desk=debug,talent_desk_console=debug",
        AppEnvironment::Test => "warn",
        AppEnvironment::Production => "info",
    }
}

/// Resolves the filter: `RUST_LOG`, then `APP_LOG_LEVEL`, then the
/// environment default.
pub fn build_filter(
    config: &TelemetryConfig,
    rust_log: Option<&str>,
) -> Result<EnvFilter, TelemetryError> {
    let directive = rust_log
        .filter(|value| !value.trim().is_empty())
        .or(config.log_level.as_deref())
        .unwrap_or_else(|| default_directive(config.environment));

    EnvFilter::try_new(directive).map_err(|source| TelemetryError::Filter {
        value: directive.to_string(),
        source,
    })
}

/// Installs the stderr subscriber so command output on stdout stays pipeable.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(config, rust_log.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(config.environment == AppEnvironment::Development)
        .with_ansi(config.environment == AppEnvironment::Development)
        .compact()
        .try_init()
        .map_err(TelemetryError::Subscriber)
}
