mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::output::Reporter;

#[tokio::main]
async fn main() {
    let mut cli = Cli::parse();

    init_tracing(cli.global.verbose, cli.global.quiet);
    config::apply_config_defaults(&mut cli.global);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8, quiet: bool) {
    let filter = match (quiet, verbosity) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let reporter = Reporter::new(&cli.global);
    tracing::debug!(command = ?cli.command, "dispatching command");
    match cli.command {
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global, reporter),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "dnacheck", &mut std::io::stdout());
            Ok(())
        }

        Command::Collect(args) => commands::collect::handle(args, &cli.global, reporter).await,
        Command::Fabric(args) => commands::fabric::handle(args, &cli.global, reporter).await,
        Command::Run(args) => commands::run::handle(args, &cli.global, reporter).await,
    }
}
