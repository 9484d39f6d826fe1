use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `depreport.toml` schema v1.
///
/// This is a *user-facing* config model: every key is optional so a missing file and an
/// empty file mean the same thing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DepreportConfigV1 {
    /// Optional schema string for tooling (`depreport.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// `full` (default), `offline` or `summary`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Emit the dependency file details section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency_details: Option<bool>,

    /// Emit the repository locations section. Probes every remote repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency_locations: Option<bool>,

    /// Artifact types inspected as archives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_types: Option<Vec<String>>,

    #[serde(default)]
    pub probe: ProbeConfig,

    #[serde(default)]
    pub format: FormatConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProbeConfig {
    /// Upper bound on concurrent repository probes and archive inspections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<u32>,

    /// Per-request timeout of repository probes, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FormatConfig {
    /// Locale tag picking default separators (`en`, `de`, `fr`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grouping_separator: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimal_separator: Option<String>,
}
