//! Stable DTOs and IDs used across the depreport workspace.
//!
//! This crate is intentionally boring:
//! - artifact coordinates and scopes
//! - per-scope totals
//! - the report sections handed to renderers
//! - formatting options renderers apply

#![forbid(unsafe_code)]

pub mod artifact;
pub mod format;
pub mod ids;
pub mod report;
pub mod totals;

pub use artifact::{Artifact, ArtifactFile, Coordinates, Scope};
pub use format::FormatOptions;
pub use report::{
    Availability, AvailabilityMatrix, DependencyRow, FileDetails, FileRow, FileTotals,
    LicenseEntry, LicenseGroup, LicenseKey, MatrixRow, NodeDetails, ProjectSummary,
    RepositoryLocations, RepositoryRow, ReportEnvelope, SCHEMA_REPORT_V1, ScopeTable, Section,
    ToolMeta, TreeNode,
};
pub use totals::TotalsAccumulator;
