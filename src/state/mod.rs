pub mod coordinator;
pub mod stats;

pub use coordinator::Coordinator;
pub use stats::Statistics;

/// Identifier handed back to the submitter. Issued as 1, 2, 3, …
pub type RequestId = u64;

/// Internal consistency violations. None of these are caller errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StateError {
    #[error("request {id} already has a different digest stored")]
    DigestConflict { id: RequestId },
}
