//! Transaction submitter
//!
//! Validates form input, dispatches signed mutations, and tracks each
//! call through `Submitted -> Confirmed/Failed`. Both outcomes are
//! terminal; nothing is retried automatically, and a failed transaction
//! requires explicit user re-initiation.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{info, warn};

use crate::contract::ContractClient;
use crate::error::{ClientError, Result};
use crate::provider::Signer;
use crate::transport::{TransportError, TxReceipt};
use crate::types::{PendingTransaction, TxKind, TxState};

/// Form input for registering a plant
#[derive(Debug, Clone, Default)]
pub struct RegisterInput {
    pub name: String,
    pub category: String,
}

impl RegisterInput {
    /// Validate before any ledger call is issued
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ClientError::InvalidInput(
                "plant name must not be empty".to_string(),
            ));
        }
        if self.category.trim().is_empty() {
            return Err(ClientError::InvalidInput(
                "plant category must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Form input for recording generation. Values arrive as the raw
/// strings typed into the dashboard form.
#[derive(Debug, Clone, Default)]
pub struct GenerationInput {
    pub energy: String,
    pub carbon: String,
}

impl GenerationInput {
    /// Parse both fields as non-negative integers, rejecting anything
    /// else before any ledger call is issued.
    pub fn parse(&self) -> Result<(u64, u64)> {
        let energy = parse_amount("energy", &self.energy)?;
        let carbon = parse_amount("carbon", &self.carbon)?;
        Ok((energy, carbon))
    }
}

fn parse_amount(field: &str, raw: &str) -> Result<u64> {
    raw.trim().parse::<u64>().map_err(|_| {
        ClientError::InvalidInput(format!(
            "{field} must be a non-negative integer, got {raw:?}"
        ))
    })
}

/// Dispatches mutating calls and tracks their lifecycle.
///
/// The log keeps every transaction this client instance has dispatched.
/// Enforcing "one outstanding submission per action slot" is the
/// caller's job (submit controls are disabled while `has_submitted()`
/// is true); this layer serializes nothing on its own.
pub struct TransactionSubmitter {
    contract: Arc<ContractClient>,
    log: DashMap<String, PendingTransaction>,
}

impl TransactionSubmitter {
    pub fn new(contract: Arc<ContractClient>) -> Self {
        Self {
            contract,
            log: DashMap::new(),
        }
    }

    /// Dispatch a plant registration and await settlement
    pub async fn submit_register(
        &self,
        signer: &Signer,
        input: &RegisterInput,
    ) -> Result<PendingTransaction> {
        input.validate()?;
        let tx = self.begin(TxKind::Register);
        let outcome = self
            .contract
            .register_plant(signer, &input.name, &input.category)
            .await;
        self.settle(tx, outcome)
    }

    /// Dispatch a generation record and await settlement
    pub async fn submit_generation(
        &self,
        signer: &Signer,
        input: &GenerationInput,
    ) -> Result<PendingTransaction> {
        let (energy, carbon) = input.parse()?;
        let tx = self.begin(TxKind::RecordGeneration);
        let outcome = self
            .contract
            .record_generation(signer, energy, carbon)
            .await;
        self.settle(tx, outcome)
    }

    /// Whether any transaction is still awaiting settlement
    pub fn has_submitted(&self) -> bool {
        self.log.iter().any(|tx| tx.state == TxState::Submitted)
    }

    /// All tracked transactions, oldest first
    pub fn transactions(&self) -> Vec<PendingTransaction> {
        let mut all: Vec<PendingTransaction> =
            self.log.iter().map(|entry| entry.value().clone()).collect();
        all.sort_by(|a, b| a.submitted_at.cmp(&b.submitted_at));
        all
    }

    /// Look up one transaction by id
    pub fn get(&self, id: &str) -> Option<PendingTransaction> {
        self.log.get(id).map(|entry| entry.value().clone())
    }

    fn begin(&self, kind: TxKind) -> PendingTransaction {
        let tx = PendingTransaction::new(kind);
        self.log.insert(tx.id.clone(), tx.clone());
        info!(id = %tx.id, kind = ?kind, "transaction submitted");
        tx
    }

    fn settle(
        &self,
        mut tx: PendingTransaction,
        outcome: std::result::Result<TxReceipt, TransportError>,
    ) -> Result<PendingTransaction> {
        match outcome {
            Ok(receipt) => {
                tx.state = TxState::Confirmed;
                tx.tx_hash = Some(receipt.tx_hash);
                self.log.insert(tx.id.clone(), tx.clone());
                info!(id = %tx.id, hash = ?tx.tx_hash, "transaction confirmed");
                Ok(tx)
            }
            Err(err) => {
                tx.state = TxState::Failed;
                tx.error_detail = Some(err.to_string());
                self.log.insert(tx.id.clone(), tx.clone());
                warn!(id = %tx.id, error = %err, "transaction failed");
                Err(ClientError::Transaction(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ClientConfig;
    use crate::transport::{ContractCall, ContractTransport};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeTransport {
        reject: bool,
        sends: AtomicUsize,
    }

    impl FakeTransport {
        fn accepting() -> Self {
            Self {
                reject: false,
                sends: AtomicUsize::new(0),
            }
        }

        fn rejecting() -> Self {
            Self {
                reject: true,
                sends: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ContractTransport for FakeTransport {
        async fn call(&self, _call: ContractCall) -> std::result::Result<Value, TransportError> {
            Err(TransportError::Connection("reads unsupported".to_string()))
        }

        async fn send(
            &self,
            _signer: &Signer,
            _call: ContractCall,
        ) -> std::result::Result<TxReceipt, TransportError> {
            self.sends.fetch_add(1, Ordering::SeqCst);
            if self.reject {
                return Err(TransportError::Rejected(
                    "user denied transaction signature".to_string(),
                ));
            }
            Ok(TxReceipt {
                tx_hash: "0xfeed".to_string(),
            })
        }
    }

    fn submitter(transport: Arc<FakeTransport>) -> TransactionSubmitter {
        let contract = Arc::new(ContractClient::new(transport, ClientConfig::default()));
        TransactionSubmitter::new(contract)
    }

    fn signer() -> Signer {
        Signer {
            address: "0xabc".to_string(),
        }
    }

    #[test]
    fn test_generation_input_rejects_negative_and_non_numeric() {
        let negative = GenerationInput {
            energy: "-1".to_string(),
            carbon: "5".to_string(),
        };
        assert!(matches!(
            negative.parse().unwrap_err(),
            ClientError::InvalidInput(_)
        ));

        let non_numeric = GenerationInput {
            energy: "100".to_string(),
            carbon: "abc".to_string(),
        };
        assert!(matches!(
            non_numeric.parse().unwrap_err(),
            ClientError::InvalidInput(_)
        ));

        let ok = GenerationInput {
            energy: " 100 ".to_string(),
            carbon: "0".to_string(),
        };
        assert_eq!(ok.parse().unwrap(), (100, 0));
    }

    #[test]
    fn test_register_input_rejects_blank_fields() {
        let blank_name = RegisterInput {
            name: "  ".to_string(),
            category: "solar".to_string(),
        };
        assert!(matches!(
            blank_name.validate().unwrap_err(),
            ClientError::InvalidInput(_)
        ));

        let blank_category = RegisterInput {
            name: "SolarFarm1".to_string(),
            category: String::new(),
        };
        assert!(blank_category.validate().is_err());
    }

    #[tokio::test]
    async fn test_invalid_input_issues_no_transport_call() {
        let transport = Arc::new(FakeTransport::accepting());
        let submitter = submitter(Arc::clone(&transport));

        let input = GenerationInput {
            energy: "-1".to_string(),
            carbon: "abc".to_string(),
        };
        let err = submitter
            .submit_generation(&signer(), &input)
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::InvalidInput(_)));
        assert_eq!(transport.sends.load(Ordering::SeqCst), 0);
        assert!(submitter.transactions().is_empty());
    }

    #[tokio::test]
    async fn test_accepted_submission_confirms() {
        let submitter = submitter(Arc::new(FakeTransport::accepting()));

        let input = RegisterInput {
            name: "SolarFarm1".to_string(),
            category: "solar".to_string(),
        };
        let tx = submitter.submit_register(&signer(), &input).await.unwrap();

        assert_eq!(tx.state, TxState::Confirmed);
        assert_eq!(tx.tx_hash.as_deref(), Some("0xfeed"));
        assert!(tx.is_settled());
        assert!(!submitter.has_submitted());
        assert_eq!(submitter.get(&tx.id).unwrap().state, TxState::Confirmed);
    }

    #[tokio::test]
    async fn test_rejected_submission_fails_with_detail() {
        let submitter = submitter(Arc::new(FakeTransport::rejecting()));

        let input = GenerationInput {
            energy: "100".to_string(),
            carbon: "5".to_string(),
        };
        let err = submitter
            .submit_generation(&signer(), &input)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Transaction(_)));

        let log = submitter.transactions();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].state, TxState::Failed);
        assert!(log[0]
            .error_detail
            .as_deref()
            .unwrap()
            .contains("user denied"));
        assert!(log[0].tx_hash.is_none());
    }

    #[tokio::test]
    async fn test_log_orders_by_submission_time() {
        let submitter = submitter(Arc::new(FakeTransport::accepting()));

        let first = RegisterInput {
            name: "SolarFarm1".to_string(),
            category: "solar".to_string(),
        };
        let second = GenerationInput {
            energy: "100".to_string(),
            carbon: "5".to_string(),
        };
        submitter.submit_register(&signer(), &first).await.unwrap();
        submitter
            .submit_generation(&signer(), &second)
            .await
            .unwrap();

        let log = submitter.transactions();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].kind, TxKind::Register);
        assert_eq!(log[1].kind, TxKind::RecordGeneration);
        assert!(log[0].submitted_at <= log[1].submitted_at);
    }
}
