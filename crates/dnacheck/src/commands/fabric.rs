//! `dnacheck fabric`: domain and site aggregation only.

use indexmap::IndexMap;
use serde::Serialize;
use tabled::Tabled;

use dnacheck_core::{FabricInventory, FabricSite};

use crate::cli::{FabricArgs, GlobalOpts};
use crate::commands::util;
use crate::error::CliError;
use crate::output::{self, Reporter};

#[derive(Tabled)]
struct SiteRow {
    #[tabled(rename = "Domain")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "VNs")]
    vns: usize,
    #[tabled(rename = "Pools")]
    pools: usize,
    #[tabled(rename = "Edge")]
    edge: usize,
    #[tabled(rename = "Control")]
    control: usize,
    #[tabled(rename = "Border")]
    border: usize,
    #[tabled(rename = "Outputs")]
    outputs: usize,
}

impl SiteRow {
    fn new(id: &str, site: &FabricSite) -> Self {
        Self {
            id: id.to_owned(),
            name: site.name().to_owned(),
            vns: site.vn_count(),
            pools: site.ip_pools.len(),
            edge: site.roles.edge.len(),
            control: site.roles.control.len(),
            border: site.roles.border.len(),
            outputs: site.show_commands.len(),
        }
    }
}

#[derive(Serialize)]
struct FabricView<'a> {
    fabric_lans_count: usize,
    fabric_sites_count: usize,
    transits_count: usize,
    fabric: &'a IndexMap<String, FabricSite>,
}

impl<'a> From<&'a FabricInventory> for FabricView<'a> {
    fn from(inventory: &'a FabricInventory) -> Self {
        Self {
            fabric_lans_count: inventory.fabric_lans_count,
            fabric_sites_count: inventory.fabric_sites_count,
            transits_count: inventory.transits_count,
            fabric: &inventory.sites,
        }
    }
}

pub async fn handle(
    args: FabricArgs,
    global: &GlobalOpts,
    reporter: Reporter,
) -> Result<(), CliError> {
    let collector = util::connect(global, reporter, args.show_commands).await?;
    let aggregator = collector.fabric();

    reporter.step("Analyzing fabric and extracting relevant numbers");
    let mut inventory: FabricInventory = aggregator.aggregate().await?;
    if args.show_commands && !aggregator.show_commands_step(&mut inventory).await? {
        reporter.notice("Show commands skipped");
    }

    let out = output::render_list(global.output(), &FabricView::from(&inventory), || {
        inventory
            .sites
            .iter()
            .map(|(id, site)| SiteRow::new(id, site))
            .collect()
    })?;
    reporter.section(&format!(
        "{} fabric LANs, {} fabric sites, {} transits",
        inventory.fabric_lans_count, inventory.fabric_sites_count, inventory.transits_count
    ));
    output::print_output(&out, global.quiet);
    Ok(())
}
