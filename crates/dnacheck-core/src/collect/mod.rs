//! The collected-parameters document and the steps that fill it.

mod collector;
mod counts;
mod validation;

use indexmap::IndexMap;
use serde::Serialize;

use crate::fabric::{FabricInventory, FabricSite, RoleLists};
use crate::job::DownloadedFile;

pub use collector::Collector;
pub use counts::{DevicesInventory, HealthCounts, HostCounts};
pub use validation::{SiteCounters, ValidationSummary};

/// Who ran the collection, and with what build.
#[derive(Debug, Clone, Default)]
pub struct Identity {
    pub executer_name: String,
    pub executer_cco: String,
    /// SHA-256 of the collecting executable, or an error note.
    pub sha256: String,
}

/// Which steps to attempt. Each one is still subject to confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct CollectionPlan {
    pub hosts: bool,
    pub inventory: bool,
    pub fabric: bool,
    pub fabric_inventory: bool,
    pub show_commands: bool,
    pub images: bool,
    pub upgrade_report: bool,
    pub image_updates: bool,
}

impl Default for CollectionPlan {
    fn default() -> Self {
        Self {
            hosts: true,
            inventory: true,
            fabric: true,
            fabric_inventory: true,
            show_commands: true,
            images: true,
            upgrade_report: false,
            image_updates: true,
        }
    }
}

/// Every parameter a run collected, keyed the way it is persisted.
/// Steps that did not run are left out.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Collection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executer_cco: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub wired_hosts_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wireless_hosts_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wired_hosts_count_via_healthcheck: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wireless_hosts_count_via_healthcheck: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub devices_inventory: Option<DevicesInventory>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fabric_lans_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fabric_sites_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transits_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fabric: Option<IndexMap<String, FabricSite>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_fabric_devices: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_fabric_edge: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_fabric_control: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_fabric_border: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub golden_images_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrade_readiness_report: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrade_images_count: Option<usize>,
}

impl Collection {
    pub fn with_identity(identity: Identity) -> Self {
        Self {
            executer_name: Some(identity.executer_name),
            executer_cco: Some(identity.executer_cco),
            sha256: Some(identity.sha256),
            ..Self::default()
        }
    }

    pub fn set_hosts(&mut self, hosts: HostCounts) {
        self.wired_hosts_count = Some(hosts.wired);
        self.wireless_hosts_count = Some(hosts.wireless);
    }

    pub fn set_health(&mut self, health: HealthCounts) {
        self.wired_hosts_count_via_healthcheck = health.wired;
        self.wireless_hosts_count_via_healthcheck = health.wireless;
    }

    pub fn set_fabric(&mut self, inventory: FabricInventory) {
        self.fabric_lans_count = Some(inventory.fabric_lans_count);
        self.fabric_sites_count = Some(inventory.fabric_sites_count);
        self.transits_count = Some(inventory.transits_count);
        self.fabric = Some(inventory.sites);
    }

    pub fn set_global_fabric(&mut self, lists: RoleLists) {
        self.global_fabric_devices = Some(lists.devices);
        self.global_fabric_edge = Some(lists.edge);
        self.global_fabric_control = Some(lists.control);
        self.global_fabric_border = Some(lists.border);
    }
}

/// A finished run: the document plus the report download, if one was made.
#[derive(Debug, Clone)]
pub struct CollectionOutcome {
    pub collection: Collection,
    pub report: Option<DownloadedFile>,
}
