//! Config parsing and profile/preset resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{DepreportConfigV1, FormatConfig, ProbeConfig};
pub use presets::{PROFILES, preset};
pub use resolve::{DEFAULT_PROBE_TIMEOUT_MS, Overrides, ResolvedConfig};

/// Parse `depreport.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<DepreportConfigV1> {
    let cfg: DepreportConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective options used by the engine and the renderers
/// (profile preset, then config keys, then overrides).
pub fn resolve_config(
    cfg: DepreportConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
