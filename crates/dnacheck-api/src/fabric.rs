// SD-Access fabric endpoints
//
// Connectivity domains, per-site fabric device roles, and per-site IP
// pools. These live under the controller's `v2` data API.

use serde_json::Value;
use tracing::debug;

use crate::client::DnacClient;
use crate::error::Error;
use crate::models::{ConnectivityDomain, FabricDeviceInfo};

impl DnacClient {
    /// All fabric domains and transits.
    ///
    /// `GET /api/v2/data/customer-facing-service/ConnectivityDomain`
    pub async fn get_connectivity_domains(&self) -> Result<Vec<ConnectivityDomain>, Error> {
        debug!("retrieving fabric domains and transits");
        self.get_response("/api/v2/data/customer-facing-service/ConnectivityDomain")
            .await
    }

    /// Fabric device roles for every fabric device on the controller.
    ///
    /// `GET /api/v2/data/customer-facing-service/DeviceInfo`
    pub async fn get_fabric_devices(&self) -> Result<Vec<FabricDeviceInfo>, Error> {
        debug!("retrieving fabric device inventory");
        self.get_response("/api/v2/data/customer-facing-service/DeviceInfo")
            .await
    }

    /// Fabric device roles within one site.
    ///
    /// `GET /api/v2/data/customer-facing-service/DeviceInfo?siteDeviceList={site_id}`
    pub async fn get_fabric_devices_by_site(
        &self,
        site_id: &str,
    ) -> Result<Vec<FabricDeviceInfo>, Error> {
        debug!(site_id, "retrieving fabric device inventory by site");
        let path = format!(
            "/api/v2/data/customer-facing-service/DeviceInfo?siteDeviceList={}",
            encode(site_id)
        );
        self.get_response(&path).await
    }

    /// IP pools bound to one site. Returned loosely typed: the pool schema
    /// differs between controller releases and is only counted or stored.
    ///
    /// `GET /api/v2/ippool?contextvalue={site_id}`
    pub async fn get_ip_pools_by_site(&self, site_id: &str) -> Result<Vec<Value>, Error> {
        debug!(site_id, "retrieving fabric ip pools by site");
        let path = format!("/api/v2/ippool?contextvalue={}", encode(site_id));
        self.get_response(&path).await
    }
}

fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
