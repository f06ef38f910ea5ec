use chrono::NaiveDate;
use std::sync::Arc;
use talent_desk::api::HttpHrApi;
use talent_desk::config::AppConfig;
use talent_desk::error::AppError;
use talent_desk::telemetry;
use tracing::info;

/// Loaded configuration plus the client every command talks through.
pub(crate) struct Console {
    pub(crate) config: AppConfig,
    pub(crate) api: Arc<HttpHrApi>,
}

impl Console {
    pub(crate) fn connect() -> Result<Self, AppError> {
        let config = AppConfig::load()?;
        telemetry::init(&config.telemetry)?;

        let api = Arc::new(HttpHrApi::new(&config.api)?);
        info!(?config.environment, base_url = %config.api.base_url, "hr api client ready");

        Ok(Self { config, api })
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
