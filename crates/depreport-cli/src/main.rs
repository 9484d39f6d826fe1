//! CLI entry point for depreport.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, logging setup and exit
//! codes. All business logic lives in the `depreport-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use depreport_app::{
    MarkdownInput, RunInput, render_markdown, run_markdown, run_report, write_report, write_text,
};
use depreport_settings::Overrides;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "DEPREPORT_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "depreport",
    version,
    about = "Dependency reports for resolved Maven-style projects"
)]
struct Cli {
    /// Path to depreport config TOML (a missing file means defaults).
    #[arg(long, default_value = "depreport.toml", global = true)]
    config: Utf8PathBuf,

    /// Override profile (full|offline|summary).
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Skip the dependency file details section.
    #[arg(long, global = true)]
    no_details: bool,

    /// Skip the repository locations section (no network access).
    #[arg(long, global = true)]
    no_locations: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a dependency report from a resolution snapshot.
    Report {
        /// Resolution snapshot JSON (`depreport.snapshot.v1`).
        #[arg(long)]
        snapshot: Utf8PathBuf,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/depreport/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/depreport/report.md")]
        markdown_out: Utf8PathBuf,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/depreport/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let result = match &cli.cmd {
        Commands::Report {
            snapshot,
            report_out,
            write_markdown,
            markdown_out,
        } => cmd_report(&cli, snapshot, report_out, *write_markdown, markdown_out),
        Commands::Md { report, output } => cmd_md(&cli, report, output.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "depreport failed");
            eprintln!("depreport: error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// `DEPREPORT_LOG`, then `RUST_LOG`, default `warn`. Logs go to stderr.
fn init_logging() {
    let filter = std::env::var(LOG_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string());

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new("warn")))
        .try_init();
}

fn read_config(path: &Utf8Path) -> anyhow::Result<String> {
    if !path.exists() {
        tracing::debug!(config = %path, "no config file; using defaults");
        return Ok(String::new());
    }
    std::fs::read_to_string(path).with_context(|| format!("read config: {}", path))
}

fn cmd_report(
    cli: &Cli,
    snapshot: &Utf8Path,
    report_out: &Utf8Path,
    write_markdown: bool,
    markdown_out: &Utf8Path,
) -> anyhow::Result<()> {
    let cfg_text = read_config(&cli.config)?;

    let overrides = Overrides {
        profile: cli.profile.clone(),
        dependency_details: cli.no_details.then_some(false),
        dependency_locations: cli.no_locations.then_some(false),
    };

    let output = run_report(RunInput {
        snapshot_path: snapshot,
        config_text: &cfg_text,
        overrides,
    })?;

    write_report(report_out, &output.report).context("write report json")?;
    if write_markdown {
        let md = render_markdown(&output.report, &output.resolved_config.format);
        write_text(markdown_out, &md).context("write markdown")?;
    }

    tracing::info!(report = %report_out, "report written");
    Ok(())
}

fn cmd_md(cli: &Cli, report: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let cfg_text = read_config(&cli.config)?;
    let md = run_markdown(MarkdownInput {
        report_path: report,
        config_text: &cfg_text,
    })?;

    if let Some(out_path) = output {
        write_text(out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}
