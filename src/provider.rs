//! Wallet provider session
//!
//! Establishes and holds the connection to the host's wallet runtime and
//! the active signing identity. The provider is an explicitly passed
//! capability rather than ambient global state, so tests substitute an
//! in-memory fake.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::error::{ClientError, Result};
use crate::transport::TransportError;
use crate::types::SessionStatus;

/// The host environment's wallet runtime
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Whether a wallet runtime is injected into the host environment
    fn is_available(&self) -> bool;

    /// Request account access.
    ///
    /// May prompt the user through the provider's own UI and remain
    /// pending until they respond. Callers must treat it as cancellable
    /// by user inaction or rejection, never by a timeout this layer
    /// enforces.
    async fn request_accounts(&self) -> std::result::Result<Vec<String>, TransportError>;
}

/// Active signing handle derived from the connected account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signer {
    /// Address of the signing account
    pub address: String,
}

/// The client's wallet connection.
///
/// At most one session exists per client instance. The session slot is
/// the only mutable shared state in the SDK; it is read by the reader
/// and submitter but mutated only here, on connect, disconnect, and
/// provider account-change events.
pub struct ProviderSession {
    provider: Arc<dyn WalletProvider>,
    state: RwLock<SessionStatus>,
}

impl ProviderSession {
    pub fn new(provider: Arc<dyn WalletProvider>) -> Self {
        Self {
            provider,
            state: RwLock::new(SessionStatus::default()),
        }
    }

    /// Connect to the wallet runtime and derive the signing address.
    ///
    /// Fails with `ProviderUnavailable` when no runtime is present or it
    /// refuses the request; session state is left untouched on failure.
    pub async fn connect(&self) -> Result<SessionStatus> {
        if !self.provider.is_available() {
            return Err(ClientError::ProviderUnavailable(
                "no wallet runtime injected into the host environment".to_string(),
            ));
        }

        let accounts = self
            .provider
            .request_accounts()
            .await
            .map_err(|e| ClientError::ProviderUnavailable(e.to_string()))?;

        let address = accounts.into_iter().next().ok_or_else(|| {
            ClientError::ProviderUnavailable("provider returned no accounts".to_string())
        })?;

        let status = SessionStatus {
            connected: true,
            address: Some(address.clone()),
        };
        *self.state.write().await = status.clone();
        info!(address = %address, "wallet session connected");

        Ok(status)
    }

    /// Active signing handle, or `NotConnected` before a successful
    /// `connect`. Never mutates session state.
    pub async fn signer(&self) -> Result<Signer> {
        let state = self.state.read().await;
        state
            .address
            .as_ref()
            .filter(|_| state.connected)
            .map(|address| Signer {
                address: address.clone(),
            })
            .ok_or(ClientError::NotConnected)
    }

    /// Current session snapshot
    pub async fn status(&self) -> SessionStatus {
        self.state.read().await.clone()
    }

    /// Reset the session (provider disconnect)
    pub async fn disconnect(&self) {
        *self.state.write().await = SessionStatus::default();
        info!("wallet session disconnected");
    }

    /// Apply a provider account-change event: an empty account list
    /// resets the session, otherwise the signer follows the new first
    /// account.
    pub async fn accounts_changed(&self, accounts: &[String]) {
        match accounts.first() {
            Some(address) => {
                let mut state = self.state.write().await;
                state.connected = true;
                state.address = Some(address.clone());
                info!(address = %address, "wallet account changed");
            }
            None => {
                warn!("provider reported no accounts, resetting session");
                self.disconnect().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeWallet {
        available: bool,
        accounts: Vec<String>,
        deny: bool,
    }

    #[async_trait]
    impl WalletProvider for FakeWallet {
        fn is_available(&self) -> bool {
            self.available
        }

        async fn request_accounts(&self) -> std::result::Result<Vec<String>, TransportError> {
            if self.deny {
                return Err(TransportError::Rejected(
                    "user denied account access".to_string(),
                ));
            }
            Ok(self.accounts.clone())
        }
    }

    fn session(available: bool, accounts: Vec<&str>, deny: bool) -> ProviderSession {
        ProviderSession::new(Arc::new(FakeWallet {
            available,
            accounts: accounts.into_iter().map(String::from).collect(),
            deny,
        }))
    }

    #[tokio::test]
    async fn test_connect_derives_first_account() {
        let session = session(true, vec!["0xabc", "0xdef"], false);
        let status = session.connect().await.unwrap();

        assert!(status.connected);
        assert_eq!(status.address.as_deref(), Some("0xabc"));
        assert_eq!(session.signer().await.unwrap().address, "0xabc");
    }

    #[tokio::test]
    async fn test_connect_without_runtime_does_not_mutate_state() {
        let session = session(false, vec![], false);

        let err = session.connect().await.unwrap_err();
        assert!(matches!(err, ClientError::ProviderUnavailable(_)));
        assert_eq!(session.status().await, SessionStatus::default());
    }

    #[tokio::test]
    async fn test_connect_denied_does_not_mutate_state() {
        let session = session(true, vec!["0xabc"], true);

        let err = session.connect().await.unwrap_err();
        assert!(matches!(err, ClientError::ProviderUnavailable(_)));
        assert_eq!(session.status().await, SessionStatus::default());
    }

    #[tokio::test]
    async fn test_signer_before_connect_is_not_connected() {
        let session = session(true, vec!["0xabc"], false);

        assert!(matches!(
            session.signer().await.unwrap_err(),
            ClientError::NotConnected
        ));
        assert_eq!(session.status().await, SessionStatus::default());
    }

    #[tokio::test]
    async fn test_accounts_changed_follows_new_account() {
        let session = session(true, vec!["0xabc"], false);
        session.connect().await.unwrap();

        session.accounts_changed(&["0xdef".to_string()]).await;
        assert_eq!(session.signer().await.unwrap().address, "0xdef");
    }

    #[tokio::test]
    async fn test_accounts_changed_empty_resets_session() {
        let session = session(true, vec!["0xabc"], false);
        session.connect().await.unwrap();

        session.accounts_changed(&[]).await;
        assert_eq!(session.status().await, SessionStatus::default());
        assert!(session.signer().await.is_err());
    }
}
