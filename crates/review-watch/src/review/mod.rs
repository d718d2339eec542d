//! Homework review polling: status catalog, payload validation, message
//! formatting, failure deduplication, and the loop that ties them together.

pub mod catalog;
pub mod dedup;
pub mod failure;
pub mod gateway;
pub mod poller;
pub mod response;
pub mod verdict;

pub use catalog::{ReviewStatus, StatusCatalog};
pub use dedup::{ErrorDeduplicator, SIGNATURE_MARKER};
pub use failure::PollFailure;
pub use gateway::{DeliveryError, FetchError, Notifier, ReviewApi};
pub use poller::{Clock, CycleOutcome, PollLoop, PollState, SystemClock};
pub use response::{ResponseValidator, SchemaError, SubmissionRecord};
pub use verdict::{UnknownStatusError, VerdictFormatter};
