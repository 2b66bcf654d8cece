//! Ledger reader
//!
//! Reads the full plant set from the ledger and reshapes it for display.
//! Reads are re-executed wholesale rather than incrementally patched:
//! per-plant record counts are small, the ledger is the sole source of
//! truth, and incremental patching would risk divergence after a failed
//! or reorganized transaction.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::contract::ContractClient;
use crate::error::{ClientError, Result};
use crate::transport::TransportError;
use crate::types::{Plant, PlantAggregate, PlantSeries, SeriesPoint};

/// Read-only view of the registry. Requires no signer.
pub struct LedgerReader {
    contract: Arc<ContractClient>,
}

impl LedgerReader {
    pub fn new(contract: Arc<ContractClient>) -> Self {
        Self { contract }
    }

    /// Fetch the full set of registered plants with their record
    /// sequences, via sequential per-plant queries in ledger enumeration
    /// order.
    ///
    /// Any failing query fails the whole read with `ClientError::Read`;
    /// callers keep the previous successfully-read state for display
    /// rather than discarding it.
    pub async fn list_plants(&self) -> Result<Vec<Plant>> {
        let count = self.contract.plant_count().await.map_err(read_failure)?;

        let mut plants = Vec::with_capacity(count as usize);
        for index in 0..count {
            let address = self
                .contract
                .plant_address(index)
                .await
                .map_err(read_failure)?;
            let fields = self
                .contract
                .plant_fields(&address)
                .await
                .map_err(read_failure)?;
            let records = self
                .contract
                .plant_records(&address)
                .await
                .map_err(read_failure)?;

            plants.push(Plant {
                address,
                name: fields.name,
                category: fields.category,
                owner: fields.owner,
                records,
            });
        }

        debug!(plants = plants.len(), "ledger read complete");
        Ok(plants)
    }
}

fn read_failure(err: TransportError) -> ClientError {
    warn!(error = %err, "ledger read failed");
    ClientError::Read(err)
}

/// Per-plant energy and carbon totals, one row per plant in input order.
///
/// Pure and deterministic. Plants with empty record sequences appear
/// with sums of 0.
pub fn aggregate(plants: &[Plant]) -> Vec<PlantAggregate> {
    plants
        .iter()
        .map(|plant| PlantAggregate {
            address: plant.address.clone(),
            name: plant.name.clone(),
            total_energy: plant.records.iter().map(|r| r.energy_generated).sum(),
            total_carbon: plant.records.iter().map(|r| r.carbon_emission).sum(),
        })
        .collect()
}

/// Dated chart points per plant, one point per record in ledger order
pub fn chart_series(plants: &[Plant]) -> Vec<PlantSeries> {
    plants
        .iter()
        .map(|plant| PlantSeries {
            address: plant.address.clone(),
            name: plant.name.clone(),
            points: plant
                .records
                .iter()
                .map(|record| SeriesPoint {
                    date: record.display_date(),
                    energy: record.energy_generated,
                    carbon: record.carbon_emission,
                })
                .collect(),
        })
        .collect()
}
