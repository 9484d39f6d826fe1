use std::collections::BTreeSet;

/// Artifact types inspected as archives unless configured otherwise.
pub const DEFAULT_ARCHIVE_TYPES: [&str; 7] = ["jar", "war", "ear", "sar", "rar", "par", "ejb"];

pub const DEFAULT_PROBE_CONCURRENCY: usize = 4;

/// Artifact types treated as archives. Matching is case-insensitive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveTypes(BTreeSet<String>);

impl ArchiveTypes {
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            types
                .into_iter()
                .map(|t| t.as_ref().to_ascii_lowercase())
                .collect(),
        )
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.0.contains(&kind.to_ascii_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| s.as_str())
    }
}

impl Default for ArchiveTypes {
    fn default() -> Self {
        Self::new(DEFAULT_ARCHIVE_TYPES)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub profile: String,

    /// Emit the dependency file details section.
    pub dependency_details: bool,

    /// Emit the repository locations section (probes the network).
    pub dependency_locations: bool,

    pub archive_types: ArchiveTypes,

    /// Upper bound on concurrent probes and archive inspections.
    pub concurrency: usize,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            profile: "full".to_string(),
            dependency_details: true,
            dependency_locations: true,
            archive_types: ArchiveTypes::default(),
            concurrency: DEFAULT_PROBE_CONCURRENCY,
        }
    }
}
