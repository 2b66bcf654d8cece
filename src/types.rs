//! Domain types for the plant registry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered power plant with its generation history.
///
/// Created by a successful register transaction, immutable afterwards
/// except for its append-only record sequence, never deleted. Instances
/// are always derived fresh from the ledger and never mutated locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plant {
    /// Ledger-assigned address identifying the plant
    pub address: String,
    pub name: String,
    /// Free-form category ("solar", "wind", ...)
    pub category: String,
    /// Address of the registering account
    pub owner: String,
    /// Generation records in ledger emission order (chronological)
    pub records: Vec<GenerationRecord>,
}

/// One timestamped generation measurement, owned by exactly one plant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Ledger-assigned timestamp, seconds since epoch
    pub timestamp: u64,
    /// Energy generated, ledger-native units
    pub energy_generated: u64,
    /// Carbon emitted, ledger-native units
    pub carbon_emission: u64,
}

impl GenerationRecord {
    /// Date label for chart axes (UTC)
    pub fn display_date(&self) -> String {
        DateTime::from_timestamp(self.timestamp as i64, 0)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| self.timestamp.to_string())
    }
}

/// Per-plant totals for the dashboard bar charts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantAggregate {
    pub address: String,
    pub name: String,
    /// Sum of energy across the plant's record sequence
    pub total_energy: u64,
    /// Sum of carbon across the plant's record sequence
    pub total_carbon: u64,
}

/// Per-plant time series for the history charts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantSeries {
    pub address: String,
    pub name: String,
    pub points: Vec<SeriesPoint>,
}

/// One dated chart point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: String,
    pub energy: u64,
    pub carbon: u64,
}

/// Wallet session snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub connected: bool,
    pub address: Option<String>,
}

impl SessionStatus {
    /// Truncated address for the connected-account banner ("0x5FbDB2…")
    pub fn short_address(&self) -> Option<String> {
        self.address.as_ref().map(|a| match a.get(..8) {
            Some(head) if a.len() > 8 => format!("{head}…"),
            _ => a.clone(),
        })
    }
}

/// Kind of mutating ledger call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxKind {
    /// Register a new plant
    Register,
    /// Append a generation record
    RecordGeneration,
}

/// Transaction lifecycle state.
///
/// `Submitted -> {Confirmed, Failed}`; both outcomes are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxState {
    Submitted,
    Confirmed,
    Failed,
}

/// Client-side tracking record for one in-flight mutating ledger call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingTransaction {
    /// Unique id ("tx_<uuid>")
    pub id: String,
    pub kind: TxKind,
    /// When the call was dispatched
    pub submitted_at: DateTime<Utc>,
    pub state: TxState,
    /// Failure detail from the underlying runtime, populated when Failed
    pub error_detail: Option<String>,
    /// Ledger transaction hash, populated when Confirmed
    pub tx_hash: Option<String>,
}

impl PendingTransaction {
    pub(crate) fn new(kind: TxKind) -> Self {
        Self {
            id: format!("tx_{}", uuid::Uuid::new_v4()),
            kind,
            submitted_at: Utc::now(),
            state: TxState::Submitted,
            error_detail: None,
            tx_hash: None,
        }
    }

    /// Whether the transaction reached a terminal state
    pub fn is_settled(&self) -> bool {
        matches!(self.state, TxState::Confirmed | TxState::Failed)
    }
}
