use clap::{Args, ValueEnum};
use std::path::PathBuf;

pub const API_URL_ENV: &str = "VOLUNTEER_HUB_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Clone, Debug, Args)]
pub struct Config {
    #[command(flatten)]
    pub api: ApiConfig,

    #[command(flatten)]
    pub session: SessionConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Debug, Args)]
pub struct ApiConfig {
    /// Base address of the backend server
    #[arg(long = "api-url", env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_API_URL.to_string() }
    }
}

impl ApiConfig {
    /// Uses the override when it is set and non-empty, otherwise the local default.
    pub fn resolve(override_url: Option<String>) -> Self {
        match override_url {
            Some(url) if !url.trim().is_empty() => Self { base_url: url },
            _ => Self::default(),
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct SessionConfig {
    /// File holding the persisted session (token, role and display name)
    #[arg(long, env = "VOLUNTEER_HUB_SESSION_FILE", default_value = ".volunteer-hub/session.json")]
    pub session_file: PathBuf,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Args)]
pub struct TelemetryConfig {
    /// Log output format
    #[arg(long, env = "VOLUNTEER_HUB_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}
