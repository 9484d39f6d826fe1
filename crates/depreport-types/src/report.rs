use crate::{Coordinates, Scope, TotalsAccumulator};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for depreport reports.
pub const SCHEMA_REPORT_V1: &str = "depreport.report.v1";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// The project the report was generated for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProjectSummary {
    pub coordinates: Coordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Report envelope: tool metadata plus the ordered report sections.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope {
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectSummary>,
    pub sections: Vec<Section>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Section {
    /// The project declares no dependencies; no other section follows.
    NoDependencies,
    ProjectDependencies { tables: Vec<ScopeTable> },
    /// Empty `tables` means the project has no transitive dependencies.
    TransitiveDependencies { tables: Vec<ScopeTable> },
    DependencyTree { root: TreeNode },
    Licenses { groups: Vec<LicenseGroup> },
    FileDetails(FileDetails),
    RepositoryLocations(RepositoryLocations),
}

impl Section {
    pub fn id(&self) -> &'static str {
        use crate::ids;
        match self {
            Section::NoDependencies => ids::SECTION_NO_DEPENDENCIES,
            Section::ProjectDependencies { .. } => ids::SECTION_PROJECT_DEPENDENCIES,
            Section::TransitiveDependencies { .. } => ids::SECTION_TRANSITIVE_DEPENDENCIES,
            Section::DependencyTree { .. } => ids::SECTION_DEPENDENCY_TREE,
            Section::Licenses { .. } => ids::SECTION_LICENSES,
            Section::FileDetails(_) => ids::SECTION_FILE_DETAILS,
            Section::RepositoryLocations(_) => ids::SECTION_REPOSITORY_LOCATIONS,
        }
    }
}

// ============================================================================
// Scope tables
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ScopeTable {
    pub scope: Scope,
    /// Render the classifier column (some row has a classifier).
    pub with_classifier: bool,
    /// Render the optional column (some row is optional).
    pub with_optional: bool,
    pub rows: Vec<DependencyRow>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DependencyRow {
    pub coordinates: Coordinates,
    pub optional: bool,
    /// Project URL of the artifact, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

// ============================================================================
// Dependency tree
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TreeNode {
    pub artifact_id: String,
    pub scope: Scope,
    /// Identifier of the node's detail panel.
    pub detail_id: String,
    /// Identifier of the marker toggling the detail panel.
    pub toggle_id: String,
    pub details: NodeDetails,
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Pre-order walk over this node and all descendants.
    pub fn walk(&self) -> Vec<&TreeNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LicenseEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeDetails {
    Project {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        licenses: Vec<LicenseEntry>,
    },
    /// System-scope artifacts are never looked up; only the local file is known.
    System {
        #[serde(skip_serializing_if = "Option::is_none")]
        file: Option<String>,
    },
    /// Project metadata could not be obtained.
    Unavailable,
}

// ============================================================================
// Licenses
// ============================================================================

/// Grouping key of the license section.
///
/// `Named("")` is a license declared without a name; `Undeclared` collects
/// projects that declare no license at all.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum LicenseKey {
    Named(String),
    Undeclared,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LicenseGroup {
    pub license: LicenseKey,
    pub projects: Vec<String>,
}

// ============================================================================
// File details
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FileDetails {
    /// Render the sealed column (some archive in the set is sealed).
    pub with_sealed: bool,
    pub rows: Vec<FileRow>,
    pub totals: FileTotals,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FileRow {
    Archive {
        file_name: String,
        size: u64,
        entries: u64,
        classes: u64,
        packages: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        jdk_revision: Option<String>,
        debug: bool,
        sealed: bool,
    },
    /// Archive inspection failed; numbers are replaced by the failure.
    Failed {
        artifact_id: String,
        path: String,
        message: String,
    },
    /// Not an archive type: only file name and size.
    Plain { file_name: String, size: u64 },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FileTotals {
    pub artifacts: TotalsAccumulator,
    pub size: TotalsAccumulator,
    pub entries: TotalsAccumulator,
    pub classes: TotalsAccumulator,
    pub packages: TotalsAccumulator,
    pub debug: TotalsAccumulator,
    pub sealed: TotalsAccumulator,
    /// Highest parseable JDK revision, `0.0` when none parsed.
    pub highest_jdk: f64,
}

// ============================================================================
// Repository locations
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RepositoryLocations {
    /// Render the blacklisted column (some repository is blacklisted).
    pub with_blacklisted: bool,
    pub repositories: Vec<RepositoryRow>,
    pub matrix: AvailabilityMatrix,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RepositoryRow {
    pub id: String,
    pub url: String,
    pub releases: bool,
    pub snapshots: bool,
    pub blacklisted: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AvailabilityMatrix {
    pub repository_ids: Vec<String>,
    pub rows: Vec<MatrixRow>,
    pub artifacts: TotalsAccumulator,
    /// Found count per repository, parallel to `repository_ids`.
    pub found: Vec<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MatrixRow {
    pub artifact_id: String,
    /// One cell per repository, parallel to `repository_ids`.
    pub cells: Vec<Availability>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Availability {
    Found {
        #[serde(skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        repository_url: String,
    },
    NotFound,
    Blacklisted,
    /// System-scope artifacts are never matched against remote repositories.
    NotApplicable,
}

impl Availability {
    pub fn is_found(&self) -> bool {
        matches!(self, Availability::Found { .. })
    }
}
