//! Contract interface description
//!
//! The registry contract's method names are externally supplied
//! configuration (an ABI-equivalent schema). This crate consumes the
//! schema; it never generates one.

use serde::{Deserialize, Serialize};

/// Method names of the plant registry contract.
///
/// The default is the reference shape of the deployed registry. Hosts
/// targeting a contract with renamed methods override the fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractSchema {
    /// Read: number of registered plants
    pub plant_count: String,
    /// Read: registered plant address by enumeration index
    pub plant_by_index: String,
    /// Read: one plant's descriptive fields
    pub plant_fields: String,
    /// Read: one plant's ordered generation records
    pub plant_records: String,
    /// Write: register a plant (name, category), scoped to the caller
    pub register_plant: String,
    /// Write: append a generation record, scoped to the caller's plant
    pub record_generation: String,
}

impl Default for ContractSchema {
    fn default() -> Self {
        Self {
            plant_count: "getPlantCount".to_string(),
            plant_by_index: "registeredPlants".to_string(),
            plant_fields: "plants".to_string(),
            plant_records: "getPlantRecords".to_string(),
            register_plant: "registerPlant".to_string(),
            record_generation: "recordGeneration".to_string(),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Address of the deployed registry contract
    pub contract_address: String,
    /// Method-name schema of the contract interface
    pub schema: ContractSchema,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            contract_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
            schema: ContractSchema::default(),
        }
    }
}
