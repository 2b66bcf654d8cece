//! Dashboard client facade
//!
//! Wires the wallet session, ledger reader, and transaction submitter
//! behind one observable view model. The presentation layer observes
//! `DashboardModel` through `subscribe()` and invokes only the
//! operations exposed here.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::contract::ContractClient;
use crate::error::{ClientError, Result};
use crate::provider::{ProviderSession, WalletProvider};
use crate::reader::{aggregate, chart_series, LedgerReader};
use crate::schema::ClientConfig;
use crate::submitter::{GenerationInput, RegisterInput, TransactionSubmitter};
use crate::transport::ContractTransport;
use crate::types::{PendingTransaction, SessionStatus};
use crate::view::{DashboardModel, ViewState};

/// Client for the GridLedger dashboard.
///
/// Constructed from the two host capabilities (wallet runtime, contract
/// transport) and the contract configuration. All operations take
/// `&self`; ledger calls are issued one at a time from the caller's
/// logical thread of control, and nothing here imposes timeouts or
/// retries.
///
/// # Example
///
/// ```rust,ignore
/// use gridledger_sdk::{ClientConfig, GridClient, RegisterInput};
///
/// let client = GridClient::new(provider, transport, ClientConfig::default());
/// let model = client.subscribe();
///
/// client.connect().await?;
/// client.refresh().await?;
/// client.register_plant(RegisterInput {
///     name: "SolarFarm1".into(),
///     category: "solar".into(),
/// }).await?;
///
/// // model.borrow() now includes the confirmed plant
/// ```
pub struct GridClient {
    session: ProviderSession,
    reader: LedgerReader,
    submitter: TransactionSubmitter,
    view: ViewState,
}

impl GridClient {
    /// Build a client from the injected capabilities and configuration
    pub fn new(
        provider: Arc<dyn WalletProvider>,
        transport: Arc<dyn ContractTransport>,
        config: ClientConfig,
    ) -> Self {
        let contract = Arc::new(ContractClient::new(transport, config));
        Self {
            session: ProviderSession::new(provider),
            reader: LedgerReader::new(Arc::clone(&contract)),
            submitter: TransactionSubmitter::new(contract),
            view: ViewState::new(),
        }
    }

    /// Observe the dashboard model
    pub fn subscribe(&self) -> watch::Receiver<DashboardModel> {
        self.view.subscribe()
    }

    /// Current model snapshot
    pub fn model(&self) -> DashboardModel {
        self.view.snapshot()
    }

    // ==================== Session ====================

    /// Connect the wallet session and derive the signing address.
    ///
    /// A failure surfaces on the banner and is returned; session state
    /// is untouched on failure.
    pub async fn connect(&self) -> Result<SessionStatus> {
        match self.session.connect().await {
            Ok(status) => {
                self.view.update(|model| model.session = status.clone());
                Ok(status)
            }
            Err(err) => {
                self.view.set_banner(err.to_string());
                Err(err)
            }
        }
    }

    /// Reset the wallet session (provider disconnect)
    pub async fn disconnect(&self) {
        self.session.disconnect().await;
        let status = self.session.status().await;
        self.view.update(|model| model.session = status);
    }

    /// Apply a provider account-change event
    pub async fn accounts_changed(&self, accounts: &[String]) {
        self.session.accounts_changed(accounts).await;
        let status = self.session.status().await;
        self.view.update(|model| model.session = status);
    }

    // ==================== Reads ====================

    /// Re-read the full plant set and replace the displayed
    /// plants/aggregates/series wholesale.
    ///
    /// On failure the previously displayed data stays in place and the
    /// error reaches the banner; on success the banner clears.
    pub async fn refresh(&self) -> Result<()> {
        match self.reader.list_plants().await {
            Ok(plants) => {
                let aggregates = aggregate(&plants);
                let series = chart_series(&plants);
                self.view.update(|model| {
                    model.plants = plants;
                    model.aggregates = aggregates;
                    model.series = series;
                    model.banner = None;
                });
                Ok(())
            }
            Err(err) => {
                self.view.set_banner(err.to_string());
                Err(err)
            }
        }
    }

    // ==================== Mutations ====================

    /// Register a plant scoped to the connected account.
    ///
    /// Requires a connected session. On confirmation the client re-reads
    /// the ledger so the new plant becomes visible without a manual
    /// refresh.
    pub async fn register_plant(&self, input: RegisterInput) -> Result<PendingTransaction> {
        let signer = self.session.signer().await?;
        self.view.update(|model| model.tx_pending = true);
        let result = self.submitter.submit_register(&signer, &input).await;
        self.finish_submit(result).await
    }

    /// Append a generation record to the connected account's plant.
    ///
    /// Energy and carbon arrive as form strings and are validated before
    /// any ledger call is issued.
    pub async fn record_generation(&self, input: GenerationInput) -> Result<PendingTransaction> {
        let signer = self.session.signer().await?;
        self.view.update(|model| model.tx_pending = true);
        let result = self.submitter.submit_generation(&signer, &input).await;
        self.finish_submit(result).await
    }

    /// All transactions this client has dispatched, oldest first
    pub fn transactions(&self) -> Vec<PendingTransaction> {
        self.submitter.transactions()
    }

    /// Whether a dispatched transaction is still awaiting settlement
    pub fn has_submitted(&self) -> bool {
        self.submitter.has_submitted()
    }

    /// Settlement is observed before the re-read begins; while the
    /// re-read is in flight the previous plant data remains displayed.
    async fn finish_submit(
        &self,
        result: Result<PendingTransaction>,
    ) -> Result<PendingTransaction> {
        match result {
            Ok(tx) => {
                self.view.update(|model| {
                    model.tx_pending = false;
                    model.banner = None;
                });
                if let Err(err) = self.refresh().await {
                    // refresh() already put the failure on the banner
                    debug!(error = %err, "post-settlement refresh failed");
                }
                Ok(tx)
            }
            Err(err) => {
                self.view.update(|model| model.tx_pending = false);
                if matches!(err, ClientError::Transaction(_)) {
                    self.view.set_banner(err.to_string());
                }
                Err(err)
            }
        }
    }
}
