//! Clap derive structures for the `dnacheck` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// dnacheck -- data collection for Cisco DNA Center
#[derive(Debug, Parser)]
#[command(
    name = "dnacheck",
    version,
    about = "Collect inventory, SDA fabric and command output from Cisco DNA Center",
    long_about = "Authenticates against a DNA Center controller, counts hosts, devices,\n\
        fabric sites and images, runs show commands on fabric nodes through the\n\
        command runner, and saves the results as JSON for review and submission.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Controller profile to use
    #[arg(long, short = 'p', env = "DNACHECK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Controller host name or address (overrides profile)
    #[arg(long, short = 'H', env = "DNACHECK_HOST", global = true)]
    pub host: Option<String>,

    /// Controller port; 80 is left out of URLs
    #[arg(long, env = "DNACHECK_PORT", global = true)]
    pub port: Option<u16>,

    /// API username (overrides profile)
    #[arg(long, short = 'u', env = "DNACHECK_USERNAME", global = true)]
    pub username: Option<String>,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "DNACHECK_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "DNACHECK_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Answer yes to every collection prompt
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Output format [default: table, or `defaults.output` from config]
    #[arg(long, short = 'o', env = "DNACHECK_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: auto, or `defaults.color` from config]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

impl GlobalOpts {
    pub fn output(&self) -> OutputFormat {
        self.output.unwrap_or(OutputFormat::Table)
    }

    pub fn color(&self) -> ColorMode {
        self.color.unwrap_or(ColorMode::Auto)
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full collection and save the results
    Collect(CollectArgs),

    /// Aggregate SDA fabric domains and sites
    Fabric(FabricArgs),

    /// Run CLI commands on devices through the command runner
    Run(RunArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct CollectArgs {
    /// Directory the result files are written to
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Do not run show commands on fabric nodes
    #[arg(long)]
    pub skip_show_commands: bool,

    /// Also generate and download the upgrade readiness report
    #[arg(long)]
    pub upgrade_report: bool,

    /// Your name, recorded in the results
    #[arg(long, env = "DNACHECK_EXECUTER_NAME")]
    pub executer_name: Option<String>,

    /// Your CCO id, recorded in the results
    #[arg(long, env = "DNACHECK_EXECUTER_CCO")]
    pub executer_cco: Option<String>,
}

#[derive(Debug, Args)]
pub struct FabricArgs {
    /// Run show commands on edge and control nodes
    #[arg(long)]
    pub show_commands: bool,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Device UUID (repeatable)
    #[arg(long = "device", short = 'd', required = true)]
    pub devices: Vec<String>,

    /// CLI command to run (repeatable)
    #[arg(long = "command", short = 'c', required = true)]
    pub commands: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the configuration with secrets masked
    Show,

    /// Print the config file path
    Path,

    /// Store the profile's password in the system keyring
    SetPassword,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
