use crate::{model::DepreportConfigV1, presets};
use anyhow::Context;
use depreport_domain::policy::{ArchiveTypes, EffectiveConfig};
use depreport_types::FormatOptions;

pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 5_000;

/// Command-line overrides; they win over config keys.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub dependency_details: Option<bool>,
    pub dependency_locations: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
    pub probe_timeout_ms: u64,
    pub format: FormatOptions,
}

pub fn resolve_config(
    cfg: DepreportConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "full".to_string());

    let mut effective = presets::preset(&profile);

    // Section toggles
    if let Some(details) = overrides.dependency_details.or(cfg.dependency_details) {
        effective.dependency_details = details;
    }
    if let Some(locations) = overrides.dependency_locations.or(cfg.dependency_locations) {
        effective.dependency_locations = locations;
    }

    if let Some(types) = cfg.archive_types.as_deref() {
        effective.archive_types = parse_archive_types(types)?;
    }

    // Probing
    if let Some(concurrency) = cfg.probe.concurrency {
        anyhow::ensure!(concurrency > 0, "probe.concurrency must be at least 1");
        effective.concurrency = concurrency as usize;
    }
    let probe_timeout_ms = cfg.probe.timeout_ms.unwrap_or(DEFAULT_PROBE_TIMEOUT_MS);
    anyhow::ensure!(probe_timeout_ms > 0, "probe.timeout_ms must be positive");

    // Number formatting
    let mut format = FormatOptions::for_locale(cfg.format.locale.as_deref().unwrap_or("en"));
    if let Some(sep) = cfg.format.grouping_separator.as_deref() {
        format.grouping_separator =
            parse_separator(sep).context("invalid format.grouping_separator")?;
    }
    if let Some(sep) = cfg.format.decimal_separator.as_deref() {
        format.decimal_separator =
            parse_separator(sep).context("invalid format.decimal_separator")?;
    }

    Ok(ResolvedConfig {
        effective,
        probe_timeout_ms,
        format,
    })
}

fn parse_archive_types(types: &[String]) -> anyhow::Result<ArchiveTypes> {
    for (idx, t) in types.iter().enumerate() {
        if t.trim().is_empty() {
            anyhow::bail!("archive_types[{idx}] is empty");
        }
    }
    Ok(ArchiveTypes::new(types.iter().map(|t| t.trim())))
}

fn parse_separator(v: &str) -> anyhow::Result<char> {
    let mut chars = v.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => anyhow::bail!("separator must be exactly one character, got {v:?}"),
    }
}
