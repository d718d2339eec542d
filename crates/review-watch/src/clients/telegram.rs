use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{http_client, ClientError};
use crate::config::TelegramConfig;
use crate::review::{DeliveryError, Notifier};

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends plain-text messages to one chat through the Bot API.
pub struct TelegramNotifier {
    http: reqwest::Client,
    // Contains the bot token.
    send_url: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig) -> Result<Self, ClientError> {
        let send_url = format!(
            "{}/bot{}/sendMessage",
            config.api_url.trim_end_matches('/'),
            config.token.expose()
        );
        Ok(Self {
            http: http_client()?,
            send_url,
            chat_id: config.chat_id.clone(),
        })
    }
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), DeliveryError> {
        let payload = SendMessage {
            chat_id: &self.chat_id,
            text,
        };

        let response = self
            .http
            .post(&self.send_url)
            .json(&payload)
            .send()
            .await
            .map_err(|err| DeliveryError::Transport(err.without_url().to_string()))?;

        let status = response.status();
        let body = response.json::<BotApiResponse>().await.ok();
        match body {
            Some(BotApiResponse { ok: true, .. }) if status.is_success() => Ok(()),
            other => Err(DeliveryError::Rejected {
                status: status.as_u16(),
                description: other
                    .and_then(|body| body.description)
                    .unwrap_or_else(|| "no description".to_string()),
            }),
        }
    }
}
