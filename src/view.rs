//! Dashboard view model
//!
//! The single observable surface the presentation layer renders. State
//! is published through a watch channel; every mutation goes through
//! one sender, so renders never observe a partial merge.

use serde::Serialize;
use tokio::sync::watch;

use crate::types::{Plant, PlantAggregate, PlantSeries, SessionStatus};

/// Everything the dashboard renders
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardModel {
    /// Wallet connection status
    pub session: SessionStatus,
    /// Registered plants, ledger enumeration order
    pub plants: Vec<Plant>,
    /// Per-plant totals, same order
    pub aggregates: Vec<PlantAggregate>,
    /// Per-plant chart series, same order
    pub series: Vec<PlantSeries>,
    /// Most recent error message; cleared by the next successful read or
    /// settlement
    pub banner: Option<String>,
    /// True while a submit attempt is in flight; the UI disables submit
    /// controls on it
    pub tx_pending: bool,
}

/// Publishes model updates to any number of observers
pub(crate) struct ViewState {
    tx: watch::Sender<DashboardModel>,
}

impl ViewState {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(DashboardModel::default());
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardModel> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> DashboardModel {
        self.tx.borrow().clone()
    }

    /// Apply one mutation and publish the result
    pub fn update(&self, apply: impl FnOnce(&mut DashboardModel)) {
        self.tx.send_modify(apply);
    }

    /// Surface the most recent error. Previously displayed plant data
    /// stays in place.
    pub fn set_banner(&self, message: String) {
        self.update(|model| model.banner = Some(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_updates_are_observed() {
        let view = ViewState::new();
        let rx = view.subscribe();

        view.update(|model| model.tx_pending = true);
        assert!(rx.borrow().tx_pending);
        assert!(view.snapshot().tx_pending);
    }

    #[test]
    fn test_banner_keeps_plant_data() {
        let view = ViewState::new();
        view.update(|model| {
            model.plants = vec![Plant {
                address: "0xa".to_string(),
                name: "SolarFarm1".to_string(),
                category: "solar".to_string(),
                owner: "0xa".to_string(),
                records: vec![],
            }];
        });

        view.set_banner("ledger read failed: transport failure".to_string());

        let model = view.snapshot();
        assert_eq!(model.plants.len(), 1);
        assert!(model.banner.is_some());
    }

    #[test]
    fn test_banner_holds_single_most_recent_message() {
        let view = ViewState::new();
        view.set_banner("first".to_string());
        view.set_banner("second".to_string());

        assert_eq!(view.snapshot().banner.as_deref(), Some("second"));
    }
}
