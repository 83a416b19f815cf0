// Inventory and host topology endpoints

use tracing::debug;

use crate::client::DnacClient;
use crate::error::Error;
use crate::models::{NetworkDevice, PhysicalTopology};

impl DnacClient {
    /// Wired and wireless hosts known to the controller.
    ///
    /// `GET /api/v1/topology/physical-topology?nodeType=HOST`
    pub async fn get_hosts(&self) -> Result<PhysicalTopology, Error> {
        debug!("retrieving system hosts");
        self.get_response("/api/v1/topology/physical-topology?nodeType=HOST")
            .await
    }

    /// Network device inventory.
    ///
    /// `GET /api/v1/network-device/`
    pub async fn get_network_devices(&self) -> Result<Vec<NetworkDevice>, Error> {
        debug!("retrieving network device inventory");
        self.get_response("/api/v1/network-device/").await
    }
}
