//! Error types for the GridLedger client

use thiserror::Error;

use crate::transport::TransportError;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client error kinds
///
/// `InvalidInput` and `NotConnected` are resolved locally and never reach
/// the ledger. The other three always surface on the dashboard banner.
/// Nothing retries automatically; every failure requires explicit user
/// re-initiation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No wallet runtime is present in the host environment, or the
    /// runtime refused the connection request
    #[error("wallet provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// A signing action was attempted before a session was established
    #[error("wallet session not connected")]
    NotConnected,

    /// Client-side validation failed; no ledger call was issued
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A ledger read failed
    #[error("ledger read failed: {0}")]
    Read(#[source] TransportError),

    /// A submitted mutation was rejected, reverted, or undeliverable
    #[error("transaction failed: {0}")]
    Transaction(#[source] TransportError),
}
