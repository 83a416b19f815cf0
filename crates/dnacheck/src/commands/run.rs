//! `dnacheck run`: one command-runner job.

use dnacheck_core::ArtifactContent;

use crate::cli::{GlobalOpts, RunArgs};
use crate::commands::util;
use crate::error::CliError;
use crate::output::{self, Reporter};

pub async fn handle(
    args: RunArgs,
    global: &GlobalOpts,
    reporter: Reporter,
) -> Result<(), CliError> {
    let collector = util::connect(global, reporter, false).await?;

    reporter.step(&format!(
        "Running {} command(s) on {} device(s)",
        args.commands.len(),
        args.devices.len()
    ));
    let artifact = collector
        .runner()
        .run_command(&args.devices, &args.commands)
        .await?;

    let out = output::render_single(global.output(), &artifact, |a| match &a.content {
        ArtifactContent::Json(value) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        ArtifactContent::File(file) => format!("{} ({} bytes)", file.file_name, file.size),
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
