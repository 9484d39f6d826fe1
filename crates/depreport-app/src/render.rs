//! Render use cases: markdown from in-memory or on-disk reports.

use anyhow::Context;
use camino::Utf8Path;
use depreport_settings::Overrides;
use depreport_types::{FormatOptions, ReportEnvelope};

use crate::report::parse_report_json;

pub fn render_markdown(report: &ReportEnvelope, format: &FormatOptions) -> String {
    depreport_render::render_markdown(report, format)
}

/// Number format configured in `config_text` (empty means English separators).
pub fn resolve_format(config_text: &str) -> anyhow::Result<FormatOptions> {
    if config_text.trim().is_empty() {
        return Ok(FormatOptions::default());
    }
    let cfg = depreport_settings::parse_config_toml(config_text).context("parse config")?;
    let resolved =
        depreport_settings::resolve_config(cfg, Overrides::default()).context("resolve config")?;
    Ok(resolved.format)
}

#[derive(Clone, Debug)]
pub struct MarkdownInput<'a> {
    pub report_path: &'a Utf8Path,
    pub config_text: &'a str,
}

/// Re-render Markdown from a JSON report written by an earlier run.
pub fn run_markdown(input: MarkdownInput<'_>) -> anyhow::Result<String> {
    let text = std::fs::read_to_string(input.report_path)
        .with_context(|| format!("read report: {}", input.report_path))?;
    let report = parse_report_json(&text)?;
    let format = resolve_format(input.config_text)?;
    tracing::debug!(report = %input.report_path, sections = report.sections.len(), "rendering markdown");
    Ok(render_markdown(&report, &format))
}
