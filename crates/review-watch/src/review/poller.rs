use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use super::catalog::StatusCatalog;
use super::dedup::ErrorDeduplicator;
use super::failure::PollFailure;
use super::gateway::{Notifier, ReviewApi};
use super::response::{ResponseValidator, SubmissionRecord};
use super::verdict::VerdictFormatter;
use crate::config::{PollingConfig, TimestampPolicy};

/// Wall-clock source in unix seconds.
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Mutable state carried between cycles.
#[derive(Debug, Clone, Default)]
pub struct PollState {
    pub current_timestamp: Option<i64>,
    pub failures: ErrorDeduplicator,
}

/// What a single cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    NoChange,
    Notified { message: String },
    Failed { failure: PollFailure, notified: bool },
}

/// Drives the fetch, validate, notify, sleep cadence.
pub struct PollLoop<A, N> {
    api: Arc<A>,
    notifier: Arc<N>,
    clock: Arc<dyn Clock>,
    validator: ResponseValidator,
    formatter: VerdictFormatter,
    interval: Duration,
    policy: TimestampPolicy,
    state: PollState,
}

impl<A, N> PollLoop<A, N>
where
    A: ReviewApi + 'static,
    N: Notifier + 'static,
{
    pub fn new(api: Arc<A>, notifier: Arc<N>, polling: &PollingConfig) -> Self {
        let catalog = StatusCatalog::standard();
        Self {
            api,
            notifier,
            clock: Arc::new(SystemClock),
            validator: ResponseValidator::new(catalog),
            formatter: VerdictFormatter::new(catalog),
            interval: polling.interval,
            policy: polling.timestamp_policy,
            state: PollState::default(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Seeds the cursor instead of starting from the current time.
    pub fn starting_from(mut self, timestamp: Option<i64>) -> Self {
        self.state.current_timestamp = timestamp;
        self
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Runs cycles until `shutdown` is cancelled. Cancellation is observed
    /// before each cycle and during the sleep between cycles.
    pub async fn run(&mut self, shutdown: CancellationToken) {
        let clock = Arc::clone(&self.clock);
        self.state
            .current_timestamp
            .get_or_insert_with(|| clock.now());
        info!(
            interval_secs = self.interval.as_secs(),
            from_date = ?self.state.current_timestamp,
            "homework status watch started"
        );

        while !shutdown.is_cancelled() {
            self.run_cycle().await;

            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        info!("homework status watch stopped");
    }

    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.poll().await {
            Ok(Some(message)) => CycleOutcome::Notified { message },
            Ok(None) => CycleOutcome::NoChange,
            Err(failure) => self.handle_failure(failure).await,
        }
    }

    async fn poll(&mut self) -> Result<Option<String>, PollFailure> {
        let from_date = self.query_timestamp();
        let payload = self.api.homework_statuses(from_date).await?;
        let records = self.validator.validate(&payload)?;

        let Some(latest) = records.first() else {
            debug!(from_date, "no change in homework status");
            return Ok(None);
        };

        let message = self.formatter.format(latest)?;
        self.notifier.send(&message).await?;
        info!(%message, "bot sent message");

        self.advance(latest);
        Ok(Some(message))
    }

    async fn handle_failure(&mut self, failure: PollFailure) -> CycleOutcome {
        let report = failure.report();
        let mut notified = false;

        if self.state.failures.observe(&report) {
            // A failed failure report is only logged; the next cycle retries.
            match self.notifier.send(&report).await {
                Ok(()) => notified = true,
                Err(err) => error!(error = %err, "unable to deliver failure report"),
            }
        }

        error!(kind = failure.kind(), notified, "{report}");
        CycleOutcome::Failed { failure, notified }
    }

    fn query_timestamp(&self) -> i64 {
        self.state
            .current_timestamp
            .filter(|timestamp| *timestamp > 0)
            .unwrap_or_else(|| self.clock.now())
    }

    fn advance(&mut self, latest: &SubmissionRecord) {
        let candidate = match self.policy {
            TimestampPolicy::WallClock => self.clock.now(),
            TimestampPolicy::RecordUpdated => latest
                .updated_at()
                .map(|updated| updated.timestamp())
                .unwrap_or_else(|| self.clock.now()),
        };
        let next = match self.state.current_timestamp {
            Some(current) => current.max(candidate),
            None => candidate,
        };
        self.state.current_timestamp = Some(next);
    }
}
