// Fabric aggregation
//
// Walks connectivity domains in controller order, builds a site for each
// domain bound to one, and runs the show-command jobs per site. Edge
// commands are always submitted before control commands.

use dnacheck_api::DnacClient;
use tracing::{debug, info};

use super::{FabricDomain, FabricInventory, FabricRole, FabricSite, RoleLists};
use crate::confirm::ConfirmationPolicy;
use crate::error::CoreError;
use crate::job::JobRunner;

const EDGE_COMMANDS: &[&str] = &["show vrf", "show vlan"];
const CONTROL_COMMANDS: &[&str] = &["show lisp site summary", "show lisp session"];

pub struct FabricAggregator<'a> {
    client: &'a DnacClient,
    runner: JobRunner<'a>,
    confirm: &'a dyn ConfirmationPolicy,
}

impl<'a> FabricAggregator<'a> {
    pub fn new(
        client: &'a DnacClient,
        runner: JobRunner<'a>,
        confirm: &'a dyn ConfirmationPolicy,
    ) -> Self {
        Self {
            client,
            runner,
            confirm,
        }
    }

    pub async fn load_domains(&self) -> Result<Vec<FabricDomain>, CoreError> {
        let domains: Vec<FabricDomain> = self
            .client
            .get_connectivity_domains()
            .await?
            .into_iter()
            .map(FabricDomain::from)
            .collect();
        debug!(count = domains.len(), "loaded connectivity domains");
        Ok(domains)
    }

    /// Fetch pools and role lists for a domain. `None` when the domain is
    /// not bound to a site.
    pub async fn build_site(&self, domain: FabricDomain) -> Result<Option<FabricSite>, CoreError> {
        if !domain.has_site() {
            return Ok(None);
        }
        let Some(site_id) = domain.site_id.as_deref() else {
            return Ok(None);
        };

        let ip_pools = self.client.get_ip_pools_by_site(site_id).await?;
        let inventory = self.client.get_fabric_devices_by_site(site_id).await?;
        let roles = RoleLists::classify(&inventory);
        debug!(
            site = %domain.name,
            pools = ip_pools.len(),
            edge = roles.edge.len(),
            control = roles.control.len(),
            border = roles.border.len(),
            "built fabric site"
        );
        Ok(Some(FabricSite::new(domain, ip_pools, roles)))
    }

    /// Run the edge and control show commands for one site, appending each
    /// artifact to the site. Empty role lists submit nothing.
    pub async fn run_show_commands(&self, site: &mut FabricSite) -> Result<(), CoreError> {
        for (role, commands) in [
            (FabricRole::Edge, EDGE_COMMANDS),
            (FabricRole::Control, CONTROL_COMMANDS),
        ] {
            let devices = site.roles.role(role);
            if devices.is_empty() {
                continue;
            }
            info!(site = %site.name(), %role, devices = devices.len(), "running show commands");
            let commands: Vec<String> = commands.iter().map(|c| (*c).to_owned()).collect();
            let artifact = self.runner.run_command(devices, &commands).await?;
            site.show_commands.push(artifact);
        }
        Ok(())
    }

    /// Count every domain and build a site for each one bound to a site.
    pub async fn aggregate(&self) -> Result<FabricInventory, CoreError> {
        let domains = self.load_domains().await?;
        let mut inventory = FabricInventory::counted(&domains);
        for domain in domains {
            let id = domain.id.clone();
            if let Some(site) = self.build_site(domain).await? {
                inventory.sites.insert(id, site);
            }
        }
        info!(
            lans = inventory.fabric_lans_count,
            sites = inventory.fabric_sites_count,
            transits = inventory.transits_count,
            "fabric domains aggregated"
        );
        Ok(inventory)
    }

    /// Run show commands for every site, in domain order.
    pub async fn collect_show_commands(
        &self,
        inventory: &mut FabricInventory,
    ) -> Result<(), CoreError> {
        for site in inventory.sites.values_mut() {
            self.run_show_commands(site).await?;
        }
        Ok(())
    }

    /// Role lists over the controller's whole fabric device inventory.
    pub async fn global_inventory(&self) -> Result<RoleLists, CoreError> {
        let devices = self.client.get_fabric_devices().await?;
        Ok(RoleLists::classify(&devices))
    }

    /// Gated domain step. `None` when declined.
    pub async fn domains_step(&self) -> Result<Option<FabricInventory>, CoreError> {
        if !self.confirm.confirm("Do you want to count SDA domains?") {
            return Ok(None);
        }
        self.aggregate().await.map(Some)
    }

    /// Gated global inventory step. `None` when declined.
    pub async fn inventory_step(&self) -> Result<Option<RoleLists>, CoreError> {
        if !self.confirm.confirm("Do you want to collect SDA fabric inventory?") {
            return Ok(None);
        }
        self.global_inventory().await.map(Some)
    }

    /// Gated show-command step. Returns whether it ran.
    pub async fn show_commands_step(
        &self,
        inventory: &mut FabricInventory,
    ) -> Result<bool, CoreError> {
        if !self.confirm.confirm("Do you want to execute show commands?") {
            return Ok(false);
        }
        self.collect_show_commands(inventory).await?;
        Ok(true)
    }
}
