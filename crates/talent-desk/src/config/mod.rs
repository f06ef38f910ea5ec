use std::env;
use std::fmt;
use std::time::Duration;

use url::Url;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

/// Distinguishes runtime behavior for different stages of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the client and workflows.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub api: ApiConfig,
    pub review: ReviewConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let base_url = env::var("HR_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout_secs = parse_var("HR_API_TIMEOUT_SECS", 30u64)?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidNumber {
                name: "HR_API_TIMEOUT_SECS",
            });
        }
        let page_size = parse_var("HR_PAGE_SIZE", 10usize)?;
        if page_size == 0 {
            return Err(ConfigError::InvalidNumber {
                name: "HR_PAGE_SIZE",
            });
        }
        let poll_interval_secs = parse_var("HR_VERIFICATION_POLL_SECS", 5u64)?;
        let poll_attempts = parse_var("HR_VERIFICATION_POLL_ATTEMPTS", 6u32)?;

        let log_level = env::var("APP_LOG_LEVEL")
            .ok()
            .filter(|value| !value.trim().is_empty());

        Ok(Self {
            environment,
            api: ApiConfig::new(&base_url, Duration::from_secs(timeout_secs))?,
            review: ReviewConfig {
                page_size,
                poll_interval: Duration::from_secs(poll_interval_secs),
                poll_attempts,
            },
            telemetry: TelemetryConfig {
                environment,
                log_level,
            },
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { name }),
        Err(_) => Ok(default),
    }
}

/// Settings for reaching the remote HR API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl ApiConfig {
    /// Validates that `base_url` is an absolute http(s) URL.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ConfigError> {
        let parsed = Url::parse(base_url.trim()).map_err(|source| ConfigError::InvalidBaseUrl {
            value: base_url.to_string(),
            source: Some(source),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                value: base_url.to_string(),
                source: None,
            });
        }

        Ok(Self {
            base_url: parsed,
            timeout,
        })
    }
}

/// Knobs for candidate lists and verification polling.
#[derive(Debug, Clone)]
pub struct ReviewConfig {
    pub page_size: usize,
    pub poll_interval: Duration,
    pub poll_attempts: u32,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            poll_interval: Duration::from_secs(5),
            poll_attempts: 6,
        }
    }
}

/// Tracing controls. Without an explicit level the filter follows the
/// environment.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub environment: AppEnvironment,
    pub log_level: Option<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidBaseUrl {
        value: String,
        source: Option<url::ParseError>,
    },
    InvalidNumber {
        name: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBaseUrl { value, .. } => {
                write!(f, "HR_API_BASE_URL must be an absolute http(s) URL, got '{value}'")
            }
            ConfigError::InvalidNumber { name } => {
                write!(f, "{name} must be a positive integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidBaseUrl {
                source: Some(source),
                ..
            } => Some(source),
            _ => None,
        }
    }
}
