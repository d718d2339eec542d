//! HTTP implementations of the review API and chat notifier.

mod practicum;
mod telegram;

use std::time::Duration;

pub use practicum::PracticumClient;
pub use telegram::TelegramNotifier;

const USER_AGENT: &str = concat!("review-watch/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("unable to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

fn http_client() -> Result<reqwest::Client, ClientError> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    Ok(client)
}
