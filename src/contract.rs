//! Typed client for the plant registry contract
//!
//! Builds calls from the configured interface schema and decodes the raw
//! JSON results into domain types. Each wrapper issues exactly one
//! transport invocation; a malformed response is reported as a transport
//! failure, never a panic.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::provider::Signer;
use crate::schema::ClientConfig;
use crate::transport::{ContractCall, ContractTransport, TransportError, TxReceipt};
use crate::types::GenerationRecord;

/// Descriptive fields of one plant as stored on the ledger
#[derive(Debug, Clone)]
pub struct PlantFields {
    pub name: String,
    pub category: String,
    pub owner: String,
}

/// Schema-driven wrapper over the contract transport
pub struct ContractClient {
    config: ClientConfig,
    transport: Arc<dyn ContractTransport>,
}

impl ContractClient {
    pub fn new(transport: Arc<dyn ContractTransport>, config: ClientConfig) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ==================== Read methods ====================

    /// Number of registered plants
    pub async fn plant_count(&self) -> Result<u64, TransportError> {
        let value = self
            .transport
            .call(self.call_for(&self.config.schema.plant_count, vec![]))
            .await?;
        as_u64(&value).ok_or_else(|| malformed("plant count", &value))
    }

    /// Registered plant address at the given enumeration index
    pub async fn plant_address(&self, index: u64) -> Result<String, TransportError> {
        let value = self
            .transport
            .call(self.call_for(&self.config.schema.plant_by_index, vec![json!(index)]))
            .await?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| malformed("plant address", &value))
    }

    /// Descriptive fields of one plant
    pub async fn plant_fields(&self, address: &str) -> Result<PlantFields, TransportError> {
        let value = self
            .transport
            .call(self.call_for(&self.config.schema.plant_fields, vec![json!(address)]))
            .await?;
        decode_fields(&value).ok_or_else(|| malformed("plant fields", &value))
    }

    /// Ordered generation records of one plant
    pub async fn plant_records(
        &self,
        address: &str,
    ) -> Result<Vec<GenerationRecord>, TransportError> {
        let value = self
            .transport
            .call(self.call_for(&self.config.schema.plant_records, vec![json!(address)]))
            .await?;
        decode_records(&value).ok_or_else(|| malformed("plant records", &value))
    }

    // ==================== Write methods ====================

    /// Register a plant scoped to the signing account; resolves at
    /// settlement
    pub async fn register_plant(
        &self,
        signer: &Signer,
        name: &str,
        category: &str,
    ) -> Result<TxReceipt, TransportError> {
        self.transport
            .send(
                signer,
                self.call_for(
                    &self.config.schema.register_plant,
                    vec![json!(name), json!(category)],
                ),
            )
            .await
    }

    /// Append a generation record scoped to the signer's own plant;
    /// resolves at settlement
    pub async fn record_generation(
        &self,
        signer: &Signer,
        energy: u64,
        carbon: u64,
    ) -> Result<TxReceipt, TransportError> {
        self.transport
            .send(
                signer,
                self.call_for(
                    &self.config.schema.record_generation,
                    vec![json!(energy), json!(carbon)],
                ),
            )
            .await
    }

    fn call_for(&self, method: &str, args: Vec<Value>) -> ContractCall {
        ContractCall::new(&self.config.contract_address, method, args)
    }
}

// =============================================================================
// Decode helpers
// =============================================================================

fn malformed(what: &str, value: &Value) -> TransportError {
    TransportError::Connection(format!("unexpected {what} response: {value}"))
}

/// Ledger integers arrive either as JSON numbers or as decimal strings
/// (large word-sized values are commonly string-encoded).
fn as_u64(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}

fn decode_fields(value: &Value) -> Option<PlantFields> {
    let obj = value.as_object()?;
    Some(PlantFields {
        name: obj.get("name")?.as_str()?.to_string(),
        category: obj.get("plantType")?.as_str()?.to_string(),
        owner: obj.get("owner")?.as_str()?.to_string(),
    })
}

fn decode_records(value: &Value) -> Option<Vec<GenerationRecord>> {
    let items = value.as_array()?;
    let mut records = Vec::with_capacity(items.len());
    for item in items {
        let obj = item.as_object()?;
        records.push(GenerationRecord {
            timestamp: as_u64(obj.get("timestamp")?)?,
            energy_generated: as_u64(obj.get("energyGenerated")?)?,
            carbon_emission: as_u64(obj.get("carbonEmission")?)?,
        });
    }
    Some(records)
}
