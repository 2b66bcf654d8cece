//! GridLedger client SDK
//!
//! Ledger client and transaction-lifecycle layer for the GridLedger
//! power-plant registry: wallet sessions, wholesale ledger reads,
//! mutation submission with `Submitted -> Confirmed/Failed` tracking,
//! and the observable dashboard model the presentation layer renders.
//!
//! # Architecture
//!
//! - [`ProviderSession`] connects to the host's wallet runtime and holds
//!   the signing identity. It must succeed before any mutation.
//! - [`LedgerReader`] queries the registry read-only (no signer) and
//!   reshapes raw records into display-ready aggregates and series.
//! - [`TransactionSubmitter`] validates form input, dispatches signed
//!   calls, and tracks each through its lifecycle. Failures are terminal
//!   and never retried automatically.
//! - [`GridClient`] merges reader output and submitter outcomes into the
//!   [`DashboardModel`], re-reading the ledger after every confirmed
//!   mutation so displayed data stays consistent with chain state.
//!
//! The wallet runtime and the ledger transport are injected capabilities
//! ([`WalletProvider`], [`ContractTransport`]); tests drive the full
//! client against in-memory fakes.
//!
//! # Example
//!
//! ```rust,ignore
//! use gridledger_sdk::{ClientConfig, GenerationInput, GridClient, RegisterInput};
//!
//! let client = GridClient::new(provider, transport, ClientConfig::default());
//! let model = client.subscribe();
//!
//! client.connect().await?;
//! client.refresh().await?;
//!
//! client.register_plant(RegisterInput {
//!     name: "SolarFarm1".into(),
//!     category: "solar".into(),
//! }).await?;
//!
//! client.record_generation(GenerationInput {
//!     energy: "100".into(),
//!     carbon: "5".into(),
//! }).await?;
//! ```

pub mod client;
pub mod contract;
pub mod error;
pub mod provider;
pub mod reader;
pub mod schema;
pub mod submitter;
pub mod transport;
pub mod types;
pub mod view;

// Re-export the public surface
pub use client::GridClient;
pub use contract::{ContractClient, PlantFields};
pub use error::{ClientError, Result};
pub use provider::{ProviderSession, Signer, WalletProvider};
pub use reader::{aggregate, chart_series, LedgerReader};
pub use schema::{ClientConfig, ContractSchema};
pub use submitter::{GenerationInput, RegisterInput, TransactionSubmitter};
pub use transport::{ContractCall, ContractTransport, TransportError, TxReceipt};
pub use types::{
    GenerationRecord, PendingTransaction, Plant, PlantAggregate, PlantSeries, SeriesPoint,
    SessionStatus, TxKind, TxState,
};
pub use view::DashboardModel;
