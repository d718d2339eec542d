use async_trait::async_trait;
use serde_json::Value;

/// Errors raised while fetching homework statuses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Сбой запроса к эндпоинту {endpoint}: {reason}")]
    Transport { endpoint: String, reason: String },
    #[error("Эндпоинт {endpoint} недоступен. Код ответа API: {status}")]
    Status { endpoint: String, status: u16 },
    #[error("Эндпоинт {endpoint} вернул некорректный JSON: {reason}")]
    Decode { endpoint: String, reason: String },
}

/// Errors raised while delivering a chat message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    #[error("Сбой при отправке сообщения в Telegram: {0}")]
    Transport(String),
    #[error("Сбой при отправке сообщения в Telegram: код {status}, {description}")]
    Rejected { status: u16, description: String },
}

/// Source of raw homework status payloads.
#[async_trait]
pub trait ReviewApi: Send + Sync {
    /// Returns statuses changed since `from_date` (unix seconds).
    async fn homework_statuses(&self, from_date: i64) -> Result<Value, FetchError>;
}

/// Outbound chat channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), DeliveryError>;
}
