// ── Collector ──
//
// Owns the authenticated client and runs the collection steps in order:
// hosts, device inventory, fabric domains, global fabric inventory, show
// commands, images, upgrade readiness report, image upgrades. Each step
// asks its `ConfirmationPolicy` first; a declined step leaves its
// parameters out of the document.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use dnacheck_api::DnacClient;

use super::counts::{self, DevicesInventory, HealthCounts, HostCounts};
use super::{Collection, CollectionOutcome, CollectionPlan, Identity};
use crate::config::{AuthCredentials, CollectorConfig};
use crate::confirm::{AlwaysConfirm, ConfirmationPolicy};
use crate::error::CoreError;
use crate::fabric::FabricAggregator;
use crate::job::{DownloadedFile, JobRunner};

pub struct Collector {
    client: DnacClient,
    config: CollectorConfig,
    confirm: Box<dyn ConfirmationPolicy>,
    started_at: DateTime<Utc>,
}

impl Collector {
    /// Build the client and log in.
    pub async fn connect(
        config: CollectorConfig,
        confirm: Box<dyn ConfirmationPolicy>,
    ) -> Result<Self, CoreError> {
        let mut client = DnacClient::new(config.url.clone(), &config.transport())?;
        match &config.auth {
            AuthCredentials::Credentials { username, password } => {
                client.login(username, password).await?;
                debug!("token authentication successful");
            }
            AuthCredentials::Token(token) => {
                client = client.with_token(token.clone());
                debug!("using a pre-issued token");
            }
        }
        info!(url = %config.url, "connected to controller");
        Ok(Self::from_client(client, config, confirm))
    }

    /// Wrap an already authenticated client.
    pub fn from_client(
        client: DnacClient,
        config: CollectorConfig,
        confirm: Box<dyn ConfirmationPolicy>,
    ) -> Self {
        Self {
            client,
            config,
            confirm,
            started_at: Utc::now(),
        }
    }

    /// The policy steps are gated by. Everything is approved when the
    /// configuration says not to ask.
    pub fn confirmation(&self) -> &dyn ConfirmationPolicy {
        if self.config.ask_for_permission {
            self.confirm.as_ref()
        } else {
            &AlwaysConfirm
        }
    }

    pub fn runner(&self) -> JobRunner<'_> {
        JobRunner::new(&self.client, self.config.task_policy, self.config.fetch_policy)
    }

    pub fn fabric(&self) -> FabricAggregator<'_> {
        FabricAggregator::new(&self.client, self.runner(), self.confirmation())
    }

    fn ask(&self, prompt: &str) -> bool {
        let approved = self.confirmation().confirm(prompt);
        if !approved {
            info!(prompt, "step declined");
        }
        approved
    }

    // ── Steps ────────────────────────────────────────────────────────

    pub async fn count_hosts(&self) -> Result<HostCounts, CoreError> {
        let topology = self.client.get_hosts().await?;
        Ok(HostCounts::from_topology(&topology))
    }

    /// Client counts from site health over the five minutes before the
    /// collection started.
    pub async fn count_hosts_via_health(&self) -> Result<HealthCounts, CoreError> {
        let epoch_ms = self.started_at.timestamp() * 1000;
        let sites = self.client.get_client_health(epoch_ms).await?;
        Ok(HealthCounts::from_sites(&sites))
    }

    pub async fn count_inventory(&self) -> Result<DevicesInventory, CoreError> {
        let devices = self.client.get_network_devices().await?;
        Ok(DevicesInventory::from_devices(&devices))
    }

    pub async fn count_golden_images(&self) -> Result<usize, CoreError> {
        let images = self.client.get_images().await?;
        Ok(counts::golden_images(&images))
    }

    pub async fn count_image_upgrades(&self) -> Result<usize, CoreError> {
        let tasks = self.client.get_image_activation_tasks().await?;
        Ok(counts::successful_activations(&tasks))
    }

    /// Generate the upgrade readiness report and download it.
    pub async fn upgrade_report(&self) -> Result<DownloadedFile, CoreError> {
        let artifact = self.runner().run_report().await?;
        let Some(file) = artifact.as_file() else {
            return Err(CoreError::Internal(format!(
                "report {} was not a file download",
                artifact.id
            )));
        };
        info!(file_name = %file.file_name, size = file.size, "upgrade readiness report downloaded");
        Ok(file.clone())
    }

    // ── Full run ─────────────────────────────────────────────────────

    /// Run every planned step in order. The first failing step ends the run.
    pub async fn run(
        &self,
        plan: CollectionPlan,
        identity: Identity,
    ) -> Result<CollectionOutcome, CoreError> {
        let mut collection = Collection::with_identity(identity);
        let mut report = None;

        if plan.hosts && self.ask("Do you want to count wired and wireless hosts?") {
            info!("counting system hosts");
            collection.set_hosts(self.count_hosts().await?);
            collection.set_health(self.count_hosts_via_health().await?);
        }

        if plan.inventory && self.ask("Do you want to count devices in inventory?") {
            info!("counting network devices");
            collection.devices_inventory = Some(self.count_inventory().await?);
        }

        let fabric = self.fabric();
        let mut inventory = if plan.fabric {
            fabric.domains_step().await?
        } else {
            None
        };
        let global = if plan.fabric_inventory {
            fabric.inventory_step().await?
        } else {
            None
        };
        if let Some(lists) = global {
            collection.set_global_fabric(lists);
        }
        if plan.show_commands {
            match inventory.as_mut() {
                Some(inventory) => {
                    fabric.show_commands_step(inventory).await?;
                }
                None => warn!("no fabric domains collected, skipping show commands"),
            }
        }
        if let Some(inventory) = inventory {
            collection.set_fabric(inventory);
        }

        if plan.images && self.ask("Do you want to count golden software images?") {
            info!("counting golden software images");
            collection.golden_images_count = Some(self.count_golden_images().await?);
        }

        if plan.upgrade_report && self.ask("Do you want to generate upgrade readiness report?") {
            let file = self.upgrade_report().await?;
            collection.upgrade_readiness_report = Some(file.file_name.clone());
            report = Some(file);
        }

        if plan.image_updates && self.ask("Do you want to count image upgrades?") {
            info!("counting image upgrades");
            collection.upgrade_images_count = Some(self.count_image_upgrades().await?);
        }

        Ok(CollectionOutcome { collection, report })
    }
}
