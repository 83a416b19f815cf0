//! Output formatting and the console reporter.
//!
//! Results go to stdout in the format selected by `--output`. Progress
//! lines go to stderr, colored unless `--color never` or `NO_COLOR`.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list: `Tabled` rows for tables, serde for everything else.
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &T,
    rows: impl FnOnce() -> Vec<R>,
) -> Result<String, CliError>
where
    T: serde::Serialize + ?Sized,
    R: Tabled,
{
    match format {
        OutputFormat::Table => Ok(render_table(&rows())),
        _ => render_structured(format, data),
    }
}

/// Render a single item; tables use a pre-formatted detail view.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail: impl FnOnce(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize + ?Sized,
{
    match format {
        OutputFormat::Table => Ok(detail(data)),
        _ => render_structured(format, data),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_structured<T: serde::Serialize + ?Sized>(
    format: OutputFormat,
    data: &T,
) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Yaml => serde_yaml::to_string(data)?,
        OutputFormat::Json | OutputFormat::Table => serde_json::to_string_pretty(data)?,
    })
}

// ── Reporter ─────────────────────────────────────────────────────────

/// Progress messages on stderr: green steps, yellow notices, red errors.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    color: bool,
    quiet: bool,
}

impl Reporter {
    pub fn new(global: &GlobalOpts) -> Self {
        Self {
            color: should_color(global.color()),
            quiet: global.quiet,
        }
    }

    pub fn step(&self, message: &str) {
        if self.quiet {
            return;
        }
        if self.color {
            eprintln!("{}", format!("---{message}").green());
        } else {
            eprintln!("---{message}");
        }
    }

    pub fn section(&self, message: &str) {
        if self.quiet {
            return;
        }
        if self.color {
            eprintln!("{}", format!("-{message}").cyan());
        } else {
            eprintln!("-{message}");
        }
    }

    pub fn notice(&self, message: &str) {
        if self.quiet {
            return;
        }
        if self.color {
            eprintln!("{}", format!("---{message}").yellow());
        } else {
            eprintln!("---{message}");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Tabled)]
    struct Row {
        name: String,
    }

    #[test]
    fn structured_formats() {
        let data = json!({ "a": 1 });
        assert_eq!(render_structured(OutputFormat::JsonCompact, &data).unwrap(), r#"{"a":1}"#);
        assert_eq!(render_structured(OutputFormat::Yaml, &data).unwrap().trim(), "a: 1");
        assert!(render_structured(OutputFormat::Json, &data).unwrap().contains("\n"));
    }

    #[test]
    fn table_uses_rows() {
        let data = vec![json!({ "name": "Campus" })];
        let out = render_list(OutputFormat::Table, &data, || {
            vec![Row {
                name: "Campus".into(),
            }]
        })
        .unwrap();
        assert!(out.contains("Campus"));
        assert!(out.contains("name"));
    }
}
