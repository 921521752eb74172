//! The immutable inventory snapshot every export operates on.

use serde::{Deserialize, Serialize};

use crate::model::category::Category;
use crate::model::item::{
    BackupJob, Endpoint, NetworkDevice, Peripheral, Server, SoftwareItem, VoipService,
};

/// One organization's complete inventory at a point in time.
///
/// Callers assemble a snapshot from their store, then hand it to the
/// export engine by shared reference. Exports never mutate it, so a single
/// snapshot can back several artifacts in a row and they will all agree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Organization display name, used in headers and artifact filenames.
    pub organization: String,
    pub network_devices: Vec<NetworkDevice>,
    pub endpoints: Vec<Endpoint>,
    pub servers: Vec<Server>,
    pub peripherals: Vec<Peripheral>,
    pub backups: Vec<BackupJob>,
    pub software: Vec<SoftwareItem>,
    pub voip_services: Vec<VoipService>,
}

impl Snapshot {
    pub fn new(organization: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            ..Default::default()
        }
    }

    /// Item count for one category.
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Network => self.network_devices.len(),
            Category::Endpoints => self.endpoints.len(),
            Category::Servers => self.servers.len(),
            Category::Peripherals => self.peripherals.len(),
            Category::Backups => self.backups.len(),
            Category::Software => self.software.len(),
            Category::Voip => self.voip_services.len(),
        }
    }

    /// Total item count across all categories.
    pub fn total(&self) -> usize {
        Category::ORDER.iter().map(|&c| self.count(c)).sum()
    }

    /// True when no category holds any items. An empty snapshot still
    /// produces a valid artifact (headers plus placeholder sections).
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
