//! Contract transport capability
//!
//! The wallet/provider runtime and the remote ledger it talks to are
//! reached exclusively through this seam. The SDK never touches ambient
//! global state; the host injects an implementation at construction and
//! tests substitute an in-memory fake.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::provider::Signer;

/// Opaque failure reported by the wallet/ledger runtime
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The user declined the call in the provider's own UI
    #[error("rejected by signer: {0}")]
    Rejected(String),

    /// The ledger accepted delivery but rejected execution
    #[error("execution reverted: {0}")]
    Reverted(String),

    /// The call could not be delivered, or the response was unusable
    #[error("transport failure: {0}")]
    Connection(String),
}

/// One invocation against the remote contract interface
#[derive(Debug, Clone)]
pub struct ContractCall {
    /// Target contract address
    pub contract: String,
    /// Method name from the interface description
    pub method: String,
    /// Positional arguments, JSON-encoded
    pub args: Vec<Value>,
}

impl ContractCall {
    pub fn new(
        contract: impl Into<String>,
        method: impl Into<String>,
        args: Vec<Value>,
    ) -> Self {
        Self {
            contract: contract.into(),
            method: method.into(),
            args,
        }
    }
}

/// Receipt returned when a mutating call settles on the ledger
#[derive(Debug, Clone)]
pub struct TxReceipt {
    /// Ledger-assigned transaction hash
    pub tx_hash: String,
}

/// Access to the remote contract through the host's provider runtime.
///
/// `call` performs an unsigned read. `send` dispatches a signed mutation
/// and resolves only when the ledger settles it. Neither imposes a
/// timeout: a hung provider prompt or a slow read stays pending until it
/// resolves or the host tears the page down, and the only cancellation
/// path is the provider's own user-facing rejection.
#[async_trait]
pub trait ContractTransport: Send + Sync {
    /// Execute a read-only method and return its raw result
    async fn call(&self, call: ContractCall) -> std::result::Result<Value, TransportError>;

    /// Dispatch a signed mutating call and await settlement
    async fn send(
        &self,
        signer: &Signer,
        call: ContractCall,
    ) -> std::result::Result<TxReceipt, TransportError>;
}
