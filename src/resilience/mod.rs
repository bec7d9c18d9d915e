//! Resilience layer for the LuvToSearch client.
//!
//! Provides sliding-window admission control and the rate-limit retry policy
//! the request governor composes around every cache miss.

mod admission;
mod retry;

pub use admission::{AdmissionConfig, AdmissionController};
pub use retry::{RetryConfig, RetryPolicy};
