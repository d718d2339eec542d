/// Query fragment after which failure text carries the polled timestamp.
pub const SIGNATURE_MARKER: &str = "from_date";

/// Suppresses repeated notifications for the same failure.
///
/// Only the most recent signature is remembered, so a failure that recurs after
/// a different one is reported again.
#[derive(Debug, Clone, Default)]
pub struct ErrorDeduplicator {
    last_signature: Option<String>,
}

impl ErrorDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strips everything from the marker onward.
    pub fn signature(message: &str) -> &str {
        match message.find(SIGNATURE_MARKER) {
            Some(position) => &message[..position],
            None => message,
        }
    }

    /// Returns whether `signature` differs from the last one seen. The stored
    /// signature is replaced either way.
    pub fn should_notify(&mut self, signature: &str) -> bool {
        let notify = self.last_signature.as_deref() != Some(signature);
        self.last_signature = Some(signature.to_string());
        notify
    }

    /// Signs `message` and checks it in one step.
    pub fn observe(&mut self, message: &str) -> bool {
        self.should_notify(Self::signature(message))
    }

    pub fn last_signature(&self) -> Option<&str> {
        self.last_signature.as_deref()
    }
}
