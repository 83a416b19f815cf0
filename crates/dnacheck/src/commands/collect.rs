//! `dnacheck collect`: the full run.

use std::fmt::Write as _;

use chrono::Local;
use dialoguer::Input;

use dnacheck_core::{Collection, CollectionPlan, Identity, ValidationSummary};

use crate::cli::{CollectArgs, GlobalOpts};
use crate::commands::util;
use crate::config::{interactive, prompt_err};
use crate::error::CliError;
use crate::output::{self, Reporter};

fn identity_field(given: Option<String>, label: &str) -> Result<String, CliError> {
    match given {
        Some(value) => Ok(value),
        None if interactive() => Input::new()
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_err),
        None => Ok(String::new()),
    }
}

fn summary_detail(summary: &ValidationSummary) -> String {
    let mut out = String::new();
    let count = |v: Option<usize>| v.map_or_else(|| "-".to_owned(), |n| n.to_string());
    let _ = writeln!(out, "Wired hosts:      {}", count(summary.wired_hosts_count));
    let _ = writeln!(out, "Wireless hosts:   {}", count(summary.wireless_hosts_count));
    if let Some(inv) = summary.devices_inventory {
        let _ = writeln!(
            out,
            "Inventory:        {} devices ({} WLC, {} AP)",
            inv.inventory_total, inv.wlc_count, inv.ap_count
        );
    }
    let _ = writeln!(out, "Fabric sites:     {}", count(summary.fabric_sites_count));
    for site in &summary.fabric {
        let _ = writeln!(
            out,
            "  {}: {} VNs, {} pools, {} edge, {} control, {} border",
            site.name, site.vn_count, site.ippool, site.edge, site.control, site.border
        );
    }
    out.trim_end().to_owned()
}

pub async fn handle(
    args: CollectArgs,
    global: &GlobalOpts,
    reporter: Reporter,
) -> Result<(), CliError> {
    reporter.section("Collecting data for identification");
    let identity = Identity {
        executer_name: identity_field(args.executer_name, "Your name")?,
        executer_cco: identity_field(args.executer_cco, "Your CCO ID")?,
        sha256: util::executable_sha256(),
    };

    let collector = util::connect(global, reporter, true).await?;
    let plan = CollectionPlan {
        show_commands: !args.skip_show_commands,
        upgrade_report: args.upgrade_report,
        ..CollectionPlan::default()
    };

    reporter.section("Starting collection");
    let outcome = collector.run(plan, identity).await?;
    let collection: &Collection = &outcome.collection;

    reporter.section("Extracting data for validation [counters only]");
    let summary = ValidationSummary::extract(collection);

    let stem = util::file_stem(Local::now());
    let full = util::write_json(&args.out_dir, &format!("{stem}.json"), collection)?;
    reporter.step(&format!("COLLECTION DONE - Data saved in file {}", full.display()));
    let extracted = util::write_json(&args.out_dir, &format!("{stem}-extracted.json"), &summary)?;
    reporter.step(&format!("EXTRACTION DONE - Data saved in file {}", extracted.display()));

    if let Some(report) = &outcome.report {
        let path = util::write_download(&args.out_dir, &report.file_name, &report.bytes)?;
        reporter.step(&format!("Downloaded file {}", path.display()));
    }

    reporter.notice(&format!(
        "Please submit {} for validation. It contains only counters, \
         fabric site names and your identification.",
        extracted.display()
    ));

    let out = output::render_single(global.output(), &summary, summary_detail)?;
    output::print_output(&out, global.quiet);
    Ok(())
}
