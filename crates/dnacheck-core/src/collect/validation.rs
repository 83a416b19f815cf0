// Counters-only extract for submission
//
// Drops everything identifying about the network except fabric site
// names: pools, device ids and command output are reduced to counts.

use serde::Serialize;

use super::{Collection, DevicesInventory};
use crate::fabric::{DomainType, FabricSite};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteCounters {
    pub name: String,
    pub vn_count: usize,
    pub ippool: usize,
    pub devices: usize,
    pub edge: usize,
    pub control: usize,
    pub border: usize,
}

impl From<&FabricSite> for SiteCounters {
    fn from(site: &FabricSite) -> Self {
        Self {
            name: site.name().to_owned(),
            vn_count: site.vn_count(),
            ippool: site.ip_pools.len(),
            devices: site.roles.devices.len(),
            edge: site.roles.edge.len(),
            control: site.roles.control.len(),
            border: site.roles.border.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executer_cco: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devices_inventory: Option<DevicesInventory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wired_hosts_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wireless_hosts_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fabric_sites_count: Option<usize>,
    /// FABRIC_SITE records carrying at least one virtual network.
    pub fabric: Vec<SiteCounters>,
}

impl ValidationSummary {
    pub fn extract(collection: &Collection) -> Self {
        let fabric = collection
            .fabric
            .iter()
            .flat_map(|sites| sites.values())
            .filter(|site| site.domain.domain_type == DomainType::FabricSite && site.vn_count() > 0)
            .map(SiteCounters::from)
            .collect();

        Self {
            executer_name: collection.executer_name.clone(),
            executer_cco: collection.executer_cco.clone(),
            sha256: collection.sha256.clone(),
            devices_inventory: collection.devices_inventory,
            wired_hosts_count: collection.wired_hosts_count,
            wireless_hosts_count: collection.wireless_hosts_count,
            fabric_sites_count: collection.fabric_sites_count,
            fabric,
        }
    }
}
