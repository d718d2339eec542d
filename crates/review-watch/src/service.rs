use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use crate::clients::{PracticumClient, TelegramNotifier};
use crate::config::{AppConfig, ConfigError};
use crate::error::AppError;
use crate::review::PollLoop;

/// Poll loop wired to the real HTTP collaborators.
pub type Watcher = PollLoop<PracticumClient, TelegramNotifier>;

/// Command-line overrides applied on top of the loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct WatchOverrides {
    pub interval: Option<Duration>,
    pub from_date: Option<i64>,
}

/// Builds the watcher from [`AppConfig::load`] (`.env` plus the process
/// environment).
pub fn prepare_from_env(overrides: &WatchOverrides) -> Result<Watcher, AppError> {
    build(checked(AppConfig::load())?, overrides)
}

/// Builds the watcher from an arbitrary variable source. Missing credentials
/// are logged by name and returned before any client is created.
pub fn prepare<F>(lookup: F, overrides: &WatchOverrides) -> Result<Watcher, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    build(checked(AppConfig::from_lookup(lookup))?, overrides)
}

fn checked(loaded: Result<AppConfig, ConfigError>) -> Result<AppConfig, AppError> {
    loaded.map_err(|err| {
        if let ConfigError::MissingVariables(names) = &err {
            for name in names {
                error!(variable = *name, "required environment variable is missing");
            }
        }
        err.into()
    })
}

fn build(mut config: AppConfig, overrides: &WatchOverrides) -> Result<Watcher, AppError> {
    if let Some(interval) = overrides.interval {
        config.polling.interval = interval;
    }

    let api = Arc::new(PracticumClient::new(&config.practicum)?);
    let notifier = Arc::new(TelegramNotifier::new(&config.telegram)?);

    info!(
        endpoint = %config.practicum.endpoint,
        policy = ?config.polling.timestamp_policy,
        "review watcher configured"
    );

    Ok(PollLoop::new(api, notifier, &config.polling).starting_from(overrides.from_date))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_pass_through_unchanged() {
        let result = checked(Err(ConfigError::MissingVariables(vec!["TELEGRAM_CHAT_ID"])));
        match result {
            Err(AppError::Config(ConfigError::MissingVariables(names))) => {
                assert_eq!(names, vec!["TELEGRAM_CHAT_ID"]);
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn overrides_replace_interval_and_seed_cursor() {
        let config = AppConfig::from_lookup(|name| match name {
            "PRACTICUM_TOKEN" => Some("p".to_string()),
            "TELEGRAM_TOKEN" => Some("t".to_string()),
            "TELEGRAM_CHAT_ID" => Some("1".to_string()),
            _ => None,
        })
        .expect("config loads");
        let overrides = WatchOverrides {
            interval: Some(Duration::from_secs(3)),
            from_date: Some(42),
        };

        let Ok(watcher) = build(config, &overrides) else {
            panic!("watcher builds");
        };
        assert_eq!(watcher.interval(), Duration::from_secs(3));
        assert_eq!(watcher.state().current_timestamp, Some(42));
    }
}
