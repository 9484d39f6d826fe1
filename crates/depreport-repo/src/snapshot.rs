//! Resolution snapshot: the JSON document describing an already-resolved dependency graph.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use depreport_domain::model::{
    DependencyNode, ProjectMetadata, ReportInput, Repository, ResolvedDependencies,
};
use depreport_types::{Artifact, ArtifactFile, Coordinates, LicenseEntry, ProjectSummary, Scope};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stable schema identifier for resolution snapshots.
pub const SCHEMA_SNAPSHOT_V1: &str = "depreport.snapshot.v1";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SnapshotV1 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// The project the graph was resolved for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectEntry>,

    /// Remote repositories configured for the project.
    #[serde(default)]
    pub repositories: Vec<RepositoryEntry>,

    /// Dependencies the project declares itself.
    #[serde(default)]
    pub direct: Vec<ArtifactEntry>,

    /// Every artifact the resolution selected.
    #[serde(default)]
    pub artifacts: Vec<ArtifactEntry>,

    /// Resolved tree rooted at the project. Defaults to the project with its direct
    /// dependencies as leaves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tree: Option<NodeEntry>,

    /// Project metadata keyed by `group:artifact:version`.
    #[serde(default)]
    pub projects: BTreeMap<String, ProjectMetaEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProjectEntry {
    #[serde(flatten)]
    pub coordinates: Coordinates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ArtifactEntry {
    #[serde(flatten)]
    pub coordinates: Coordinates,
    #[serde(default)]
    pub scope: Scope,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub snapshot: bool,
    /// Resolved file; relative paths are relative to the snapshot file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NodeEntry {
    pub artifact: ArtifactEntry,
    #[serde(default)]
    pub children: Vec<NodeEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RepositoryEntry {
    pub id: String,
    pub url: String,
    #[serde(default = "yes")]
    pub releases: bool,
    #[serde(default)]
    pub snapshots: bool,
    #[serde(default)]
    pub blacklisted: bool,
}

fn yes() -> bool {
    true
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProjectMetaEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub licenses: Vec<LicenseEntry>,
    #[serde(default)]
    pub repositories: Vec<RepositoryEntry>,
}

/// Parse snapshot text. Pure: file references are left unresolved.
pub fn parse_snapshot(text: &str) -> anyhow::Result<SnapshotV1> {
    let snapshot: SnapshotV1 = serde_json::from_str(text).context("parse snapshot json")?;
    if let Some(schema) = snapshot.schema.as_deref()
        && schema != SCHEMA_SNAPSHOT_V1
    {
        anyhow::bail!("unsupported snapshot schema '{schema}' (expected {SCHEMA_SNAPSHOT_V1})");
    }
    if snapshot.tree.is_none() && snapshot.project.is_none() {
        anyhow::bail!("snapshot needs a `tree` or a `project`");
    }
    Ok(snapshot)
}

/// Turns file references into [`ArtifactFile`]s.
pub trait FileResolver {
    fn resolve(&self, artifact: &Coordinates, path: &str) -> Option<ArtifactFile>;
}

/// Resolves against the filesystem, relative to `base`. Missing files are dropped.
pub struct FsResolver {
    pub base: Utf8PathBuf,
}

impl FileResolver for FsResolver {
    fn resolve(&self, artifact: &Coordinates, path: &str) -> Option<ArtifactFile> {
        let declared = Utf8Path::new(path);
        let path = if declared.is_absolute() {
            declared.to_path_buf()
        } else {
            self.base.join(declared)
        };
        match std::fs::metadata(&path) {
            Ok(meta) if meta.is_file() => Some(ArtifactFile {
                path,
                size: meta.len(),
            }),
            Ok(_) => {
                tracing::warn!(artifact = %artifact, path = %path, "artifact file is not a regular file");
                None
            }
            Err(err) => {
                tracing::warn!(artifact = %artifact, path = %path, error = %err, "artifact file missing");
                None
            }
        }
    }
}

impl SnapshotV1 {
    /// Build the engine input and the project metadata lookup.
    pub fn into_input(self, files: &dyn FileResolver) -> (ReportInput, BTreeMap<String, ProjectMetadata>) {
        let direct: Vec<Artifact> = self.direct.iter().map(|a| artifact(a, files)).collect();
        let all: Vec<Artifact> = self.artifacts.iter().map(|a| artifact(a, files)).collect();

        let tree = match &self.tree {
            Some(root) => node(root, files),
            None => {
                let root = self
                    .project
                    .as_ref()
                    .map(|p| Artifact::new(p.coordinates.clone(), Scope::Compile))
                    .unwrap_or_else(|| Artifact::new(Coordinates::new("", "", ""), Scope::Compile));
                DependencyNode {
                    artifact: root,
                    children: direct.iter().cloned().map(DependencyNode::leaf).collect(),
                }
            }
        };

        let project = self.project.map(|p| ProjectSummary {
            coordinates: p.coordinates,
            name: p.name,
        });

        let projects = self
            .projects
            .into_iter()
            .map(|(key, meta)| {
                let name = meta.name.clone().unwrap_or_else(|| key.clone());
                let project = ProjectMetadata {
                    name,
                    description: meta.description,
                    url: meta.url,
                    licenses: meta.licenses,
                    repositories: meta.repositories.into_iter().map(repository).collect(),
                };
                (key, project)
            })
            .collect();

        let input = ReportInput {
            project,
            project_repositories: self.repositories.into_iter().map(repository).collect(),
            dependencies: ResolvedDependencies { direct, all },
            tree,
        };
        (input, projects)
    }
}

fn artifact(entry: &ArtifactEntry, files: &dyn FileResolver) -> Artifact {
    Artifact {
        coordinates: entry.coordinates.clone(),
        scope: entry.scope,
        optional: entry.optional,
        file: entry
            .file
            .as_deref()
            .and_then(|p| files.resolve(&entry.coordinates, p)),
        snapshot: entry.snapshot,
    }
}

fn node(entry: &NodeEntry, files: &dyn FileResolver) -> DependencyNode {
    DependencyNode {
        artifact: artifact(&entry.artifact, files),
        children: entry.children.iter().map(|c| node(c, files)).collect(),
    }
}

fn repository(entry: RepositoryEntry) -> Repository {
    Repository {
        id: entry.id,
        url: entry.url,
        releases: entry.releases,
        snapshots: entry.snapshots,
        blacklisted: entry.blacklisted,
    }
}
