use super::gateway::{DeliveryError, FetchError};
use super::response::SchemaError;
use super::verdict::UnknownStatusError;

/// Any recoverable failure of a poll cycle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PollFailure {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    UnknownStatus(#[from] UnknownStatusError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

impl PollFailure {
    /// Text reported to the chat when a cycle fails.
    pub fn report(&self) -> String {
        format!("Сбой в работе программы: {self}")
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PollFailure::Fetch(_) => "fetch",
            PollFailure::Schema(_) => "schema",
            PollFailure::UnknownStatus(_) => "unknown_status",
            PollFailure::Delivery(_) => "delivery",
        }
    }
}
