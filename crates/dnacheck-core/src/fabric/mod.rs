//! SDA fabric topology.
//!
//! Connectivity domains are classified by type; domains bound to a site
//! become [`FabricSite`]s whose devices are sorted into role lists. The
//! edge and control lists are what the aggregator feeds to the command
//! runner.

mod aggregator;

use indexmap::IndexMap;
use serde::ser::{Serialize, Serializer};
use serde_json::Value;
use strum::IntoEnumIterator;

use dnacheck_api::{ConnectivityDomain, FabricDeviceInfo};

use crate::job::Artifact;

pub use aggregator::FabricAggregator;

// ── Domain classification ────────────────────────────────────────────

/// Controller-reported `domainType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainType {
    FabricLan,
    FabricSite,
    Transit,
    /// Anything the controller adds later.
    Other,
}

impl DomainType {
    pub fn classify(raw: &str) -> Self {
        match raw {
            "FABRIC_LAN" => Self::FabricLan,
            "FABRIC_SITE" => Self::FabricSite,
            "TRANSIT" => Self::Transit,
            _ => Self::Other,
        }
    }
}

/// A function a device performs within a fabric site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumIter)]
pub enum FabricRole {
    #[strum(serialize = "EDGENODE")]
    Edge,
    #[strum(serialize = "MAPSERVER")]
    Control,
    #[strum(serialize = "BORDERNODE")]
    Border,
}

/// Device ids sorted by fabric role.
///
/// `devices` receives an entry for every role a device matches, so a
/// device holding two roles is listed there twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleLists {
    pub devices: Vec<String>,
    pub edge: Vec<String>,
    pub control: Vec<String>,
    pub border: Vec<String>,
}

impl RoleLists {
    /// Sort fabric devices into role lists, in the order they were returned.
    /// Devices without a `roles` field are ignored.
    pub fn classify(inventory: &[FabricDeviceInfo]) -> Self {
        let mut lists = Self::default();
        for device in inventory {
            let Some(roles) = &device.roles else {
                continue;
            };
            for role in FabricRole::iter() {
                if roles.iter().any(|r| r == role.as_ref()) {
                    lists.push(role, &device.network_device_id);
                }
            }
        }
        lists
    }

    fn push(&mut self, role: FabricRole, device_id: &str) {
        self.role_mut(role).push(device_id.to_owned());
        self.devices.push(device_id.to_owned());
    }

    fn role_mut(&mut self, role: FabricRole) -> &mut Vec<String> {
        match role {
            FabricRole::Edge => &mut self.edge,
            FabricRole::Control => &mut self.control,
            FabricRole::Border => &mut self.border,
        }
    }

    pub fn role(&self, role: FabricRole) -> &[String] {
        match role {
            FabricRole::Edge => &self.edge,
            FabricRole::Control => &self.control,
            FabricRole::Border => &self.border,
        }
    }
}

// ── Domains and sites ────────────────────────────────────────────────

/// One controller-reported connectivity domain.
#[derive(Debug, Clone)]
pub struct FabricDomain {
    pub id: String,
    pub name: String,
    pub domain_type: DomainType,
    pub virtual_network_count: usize,
    pub site_id: Option<String>,
    /// The record as the controller returned it.
    pub details: ConnectivityDomain,
}

impl From<ConnectivityDomain> for FabricDomain {
    fn from(raw: ConnectivityDomain) -> Self {
        Self {
            id: raw.id.clone(),
            name: raw.name.clone(),
            domain_type: DomainType::classify(&raw.domain_type),
            virtual_network_count: raw.virtual_network.len(),
            site_id: raw.site_id.clone().filter(|s| !s.is_empty()),
            details: raw,
        }
    }
}

impl FabricDomain {
    /// Whether this domain yields a [`FabricSite`]. Transits never do,
    /// whatever they carry.
    pub fn has_site(&self) -> bool {
        self.site_id.is_some() && self.domain_type != DomainType::Transit
    }
}

/// A fabric domain bound to a site, with its pools, role lists, and the
/// output of the show commands run against it.
#[derive(Debug, Clone)]
pub struct FabricSite {
    pub domain: FabricDomain,
    pub ip_pools: Vec<Value>,
    pub roles: RoleLists,
    pub show_commands: Vec<Artifact>,
}

impl FabricSite {
    pub fn new(domain: FabricDomain, ip_pools: Vec<Value>, roles: RoleLists) -> Self {
        Self {
            domain,
            ip_pools,
            roles,
            show_commands: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.domain.name
    }

    pub fn vn_count(&self) -> usize {
        self.domain.virtual_network_count
    }
}

// Persisted layout of a site under `fabric[domainId]`.
#[derive(serde::Serialize)]
struct FabricRecord<'a> {
    name: &'a str,
    vn_count: usize,
    ippool: &'a [Value],
    devices: &'a [String],
    edge: &'a [String],
    control: &'a [String],
    border: &'a [String],
    show_commands: &'a [Artifact],
    ip_pool_count: usize,
    edge_count: usize,
    control_count: usize,
    border_count: usize,
    fabric_details: &'a ConnectivityDomain,
}

impl Serialize for FabricSite {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FabricRecord {
            name: &self.domain.name,
            vn_count: self.vn_count(),
            ippool: &self.ip_pools,
            devices: &self.roles.devices,
            edge: &self.roles.edge,
            control: &self.roles.control,
            border: &self.roles.border,
            show_commands: &self.show_commands,
            ip_pool_count: self.ip_pools.len(),
            edge_count: self.roles.edge.len(),
            control_count: self.roles.control.len(),
            border_count: self.roles.border.len(),
            fabric_details: &self.domain.details,
        }
        .serialize(serializer)
    }
}

/// Domain counts plus every site, keyed by domain id in controller order.
#[derive(Debug, Clone, Default)]
pub struct FabricInventory {
    pub fabric_lans_count: usize,
    pub fabric_sites_count: usize,
    pub transits_count: usize,
    pub sites: IndexMap<String, FabricSite>,
}

impl FabricInventory {
    /// Count every domain by type. Sites are added separately.
    pub fn counted(domains: &[FabricDomain]) -> Self {
        let count = |ty| domains.iter().filter(|d| d.domain_type == ty).count();
        Self {
            fabric_lans_count: count(DomainType::FabricLan),
            fabric_sites_count: count(DomainType::FabricSite),
            transits_count: count(DomainType::Transit),
            sites: IndexMap::new(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn device(id: &str, roles: Option<&[&str]>) -> FabricDeviceInfo {
        let mut value = json!({ "networkDeviceId": id });
        if let Some(roles) = roles {
            value["roles"] = json!(roles);
        }
        serde_json::from_value(value).unwrap()
    }

    fn domain(id: &str, ty: &str, site: Option<&str>, vns: usize) -> FabricDomain {
        let mut value = json!({
            "id": id,
            "name": format!("{id}-name"),
            "domainType": ty,
            "virtualNetwork": vec![json!({}); vns],
        });
        if let Some(site) = site {
            value["siteId"] = json!(site);
        }
        serde_json::from_value::<ConnectivityDomain>(value)
            .unwrap()
            .into()
    }

    #[test]
    fn multi_role_device_is_listed_once_per_role() {
        let lists = RoleLists::classify(&[device("d1", Some(&["EDGENODE", "BORDERNODE"]))]);
        assert_eq!(lists.edge, vec!["d1"]);
        assert_eq!(lists.border, vec!["d1"]);
        assert!(lists.control.is_empty());
        assert_eq!(lists.devices, vec!["d1", "d1"]);
    }

    #[test]
    fn devices_without_roles_are_ignored() {
        let lists = RoleLists::classify(&[
            device("d1", None),
            device("d2", Some(&[])),
            device("d3", Some(&["MAPSERVER", "INTERMEDIATE"])),
        ]);
        assert_eq!(lists.devices, vec!["d3"]);
        assert_eq!(lists.role(FabricRole::Control), ["d3"]);
    }

    #[test]
    fn role_order_follows_edge_control_border() {
        let lists =
            RoleLists::classify(&[device("d1", Some(&["BORDERNODE", "MAPSERVER", "EDGENODE"]))]);
        assert_eq!(lists.devices, vec!["d1", "d1", "d1"]);
        assert_eq!(FabricRole::Control.to_string(), "MAPSERVER");
    }

    #[test]
    fn domain_types() {
        assert_eq!(DomainType::classify("FABRIC_LAN"), DomainType::FabricLan);
        assert_eq!(DomainType::classify("FABRIC_SITE"), DomainType::FabricSite);
        assert_eq!(DomainType::classify("TRANSIT"), DomainType::Transit);
        assert_eq!(DomainType::classify("fabric_site"), DomainType::Other);
        assert_eq!(DomainType::FabricSite.to_string(), "FABRIC_SITE");
    }

    #[test]
    fn transit_never_yields_a_site() {
        let transit = domain("t1", "TRANSIT", Some("S9"), 0);
        assert!(!transit.has_site());
        let lan = domain("l1", "FABRIC_LAN", None, 1);
        assert!(!lan.has_site());
        let site = domain("s1", "FABRIC_SITE", Some("S1"), 2);
        assert!(site.has_site());
        assert_eq!(site.virtual_network_count, 2);
    }

    #[test]
    fn transits_are_counted() {
        let domains = [
            domain("l1", "FABRIC_LAN", None, 0),
            domain("s1", "FABRIC_SITE", Some("S1"), 1),
            domain("s2", "FABRIC_SITE", Some("S2"), 1),
            domain("t1", "TRANSIT", None, 0),
        ];
        let inventory = FabricInventory::counted(&domains);
        assert_eq!(inventory.fabric_lans_count, 1);
        assert_eq!(inventory.fabric_sites_count, 2);
        assert_eq!(inventory.transits_count, 1);
        assert!(inventory.sites.is_empty());
    }

    #[test]
    fn site_record_layout() {
        let roles = RoleLists::classify(&[device("d1", Some(&["EDGENODE"]))]);
        let site = FabricSite::new(
            domain("s1", "FABRIC_SITE", Some("S1"), 3),
            vec![json!({ "ipPoolName": "p1" })],
            roles,
        );
        let value = serde_json::to_value(&site).unwrap();
        assert_eq!(value["name"], "s1-name");
        assert_eq!(value["vn_count"], 3);
        assert_eq!(value["edge"], json!(["d1"]));
        assert_eq!(value["edge_count"], 1);
        assert_eq!(value["control_count"], 0);
        assert_eq!(value["ip_pool_count"], 1);
        assert_eq!(value["show_commands"], json!([]));
        assert_eq!(value["fabric_details"]["siteId"], "S1");
    }
}
