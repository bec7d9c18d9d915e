//! HTTP transport layer for the LuvToSearch client.
//!
//! Provides the transport abstraction the search service talks through, so
//! tests can substitute a mock without touching the network.

mod http;

pub use http::{HttpRequest, HttpResponse, HttpTransport, HttpTransportImpl};

use std::time::Duration;

/// Transport error types.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection error.
    #[error("Connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Timeout error.
    #[error("Timeout after {timeout:?}")]
    Timeout {
        /// Timeout duration.
        timeout: Duration,
    },

    /// Invalid response.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Error message.
        message: String,
    },
}
