// Counting helpers for the plain list endpoints.

use serde::{Deserialize, Serialize};

use dnacheck_api::{HealthSite, ImageTask, NetworkDevice, PhysicalTopology, SoftwareImage};

const WLC_FAMILY: &str = "Wireless Controller";
const AP_FAMILY: &str = "Unified AP";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostCounts {
    pub wired: usize,
    pub wireless: usize,
}

impl HostCounts {
    pub fn from_topology(topology: &PhysicalTopology) -> Self {
        let count = |ty: &str| {
            topology
                .nodes
                .iter()
                .filter(|n| n.device_type.as_deref() == Some(ty))
                .count()
        };
        Self {
            wired: count("wired"),
            wireless: count("wireless"),
        }
    }
}

/// Unique client counts reported by site health.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HealthCounts {
    pub wired: Option<u64>,
    pub wireless: Option<u64>,
}

impl HealthCounts {
    /// The last `WIRED` and `WIRELESS` score details win.
    pub fn from_sites(sites: &[HealthSite]) -> Self {
        let mut counts = Self::default();
        for detail in sites.iter().flat_map(|s| &s.score_detail) {
            match detail.score_category.value.as_str() {
                "WIRED" => counts.wired = detail.client_unique_count.or(counts.wired),
                "WIRELESS" => counts.wireless = detail.client_unique_count.or(counts.wireless),
                _ => {}
            }
        }
        counts
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevicesInventory {
    pub inventory_total: usize,
    pub wlc_count: usize,
    pub ap_count: usize,
}

impl DevicesInventory {
    pub fn from_devices(devices: &[NetworkDevice]) -> Self {
        let family = |f: &str| {
            devices
                .iter()
                .filter(|d| d.family.as_deref() == Some(f))
                .count()
        };
        Self {
            inventory_total: devices.len(),
            wlc_count: family(WLC_FAMILY),
            ap_count: family(AP_FAMILY),
        }
    }
}

pub(crate) fn golden_images(images: &[SoftwareImage]) -> usize {
    images.iter().filter(|i| i.is_tagged_golden).count()
}

pub(crate) fn successful_activations(tasks: &[ImageTask]) -> usize {
    tasks
        .iter()
        .filter(|t| t.task_status.as_deref() == Some("success"))
        .count()
}
