use std::env;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_PRACTICUM_ENDPOINT: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(600);

const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// How the poll cursor moves forward after a notification is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampPolicy {
    /// Advance to the wall-clock time at which the message was sent.
    #[default]
    WallClock,
    /// Advance to the `date_updated` of the reported submission, falling back
    /// to wall-clock time when the record carries no usable timestamp.
    RecordUpdated,
}

impl TimestampPolicy {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "wall_clock" | "now" => Some(Self::WallClock),
            "record_updated" | "date_updated" => Some(Self::RecordUpdated),
            _ => None,
        }
    }
}

/// Credential wrapper that keeps tokens out of `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Top-level configuration for the watcher.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub practicum: PracticumConfig,
    pub telegram: TelegramConfig,
    pub polling: PollingConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Reads `.env` (if present) into the process environment, then loads.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Loads from the process environment only.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source. Blank values
    /// are treated the same as absent ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let practicum_token = lookup(PRACTICUM_TOKEN);
        let telegram_token = lookup(TELEGRAM_TOKEN);
        let chat_id = lookup(TELEGRAM_CHAT_ID);

        let missing = missing_required(&[
            (PRACTICUM_TOKEN, practicum_token.as_deref()),
            (TELEGRAM_TOKEN, telegram_token.as_deref()),
            (TELEGRAM_CHAT_ID, chat_id.as_deref()),
        ]);
        let (Some(practicum_token), Some(telegram_token), Some(chat_id)) =
            (practicum_token, telegram_token, chat_id)
        else {
            return Err(ConfigError::MissingVariables(missing));
        };

        let interval = match lookup("POLL_INTERVAL_SECS") {
            Some(raw) => parse_interval(&raw)?,
            None => DEFAULT_POLL_INTERVAL,
        };

        let timestamp_policy = match lookup("TIMESTAMP_POLICY") {
            Some(raw) => TimestampPolicy::parse(&raw)
                .ok_or(ConfigError::InvalidTimestampPolicy { value: raw })?,
            None => TimestampPolicy::default(),
        };

        Ok(Self {
            practicum: PracticumConfig {
                endpoint: lookup("PRACTICUM_ENDPOINT")
                    .unwrap_or_else(|| DEFAULT_PRACTICUM_ENDPOINT.to_string()),
                token: Secret::new(practicum_token),
            },
            telegram: TelegramConfig {
                api_url: lookup("TELEGRAM_API_URL")
                    .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
                token: Secret::new(telegram_token),
                chat_id,
            },
            polling: PollingConfig {
                interval,
                timestamp_policy,
            },
            telemetry: TelemetryConfig::from_lookup(lookup),
        })
    }
}

/// Returns the names whose value is absent, preserving the input order.
pub fn missing_required(values: &[(&'static str, Option<&str>)]) -> Vec<&'static str> {
    values
        .iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| *name)
        .collect()
}

fn parse_interval(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidInterval {
            value: raw.to_string(),
        }),
    }
}

/// Connection details for the homework status API.
#[derive(Debug, Clone)]
pub struct PracticumConfig {
    pub endpoint: String,
    pub token: Secret,
}

/// Bot credentials and the destination chat.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub api_url: String,
    pub token: Secret,
    pub chat_id: String,
}

#[derive(Debug, Clone)]
pub struct PollingConfig {
    pub interval: Duration,
    pub timestamp_policy: TimestampPolicy,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl TelemetryConfig {
    /// Reads only the logging settings so that logging can come up before the
    /// required credentials are checked.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = lookup("APP_LOG_LEVEL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "info".to_string());
        Self { log_level }
    }

    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingVariables(Vec<&'static str>),
    InvalidInterval { value: String },
    InvalidTimestampPolicy { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingVariables(names) => write!(
                f,
                "missing required environment variables: {}",
                names.join(", ")
            ),
            ConfigError::InvalidInterval { value } => write!(
                f,
                "POLL_INTERVAL_SECS must be a positive number of seconds, got '{}'",
                value
            ),
            ConfigError::InvalidTimestampPolicy { value } => write!(
                f,
                "TIMESTAMP_POLICY must be 'wall_clock' or 'record_updated', got '{}'",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
