use depreport_types::{Artifact, Coordinates, LicenseEntry, ProjectSummary};
use std::collections::BTreeSet;

/// Everything the engine reads. Built elsewhere (typically from a resolution snapshot).
#[derive(Clone, Debug)]
pub struct ReportInput {
    pub project: Option<ProjectSummary>,

    /// Remote repositories configured for the project itself.
    pub project_repositories: Vec<Repository>,

    pub dependencies: ResolvedDependencies,

    /// Resolved dependency tree, rooted at the project.
    pub tree: DependencyNode,
}

/// The resolved flat artifact list plus the project's direct declarations.
#[derive(Clone, Debug, Default)]
pub struct ResolvedDependencies {
    /// Dependencies the project declares itself.
    pub direct: Vec<Artifact>,

    /// Every artifact the resolution selected, direct ones included.
    pub all: Vec<Artifact>,
}

impl ResolvedDependencies {
    /// The project declares nothing itself; resolved artifacts alone do not count.
    pub fn is_empty(&self) -> bool {
        self.direct.is_empty()
    }

    /// Direct dependencies, or with `transitive` every selected artifact that is not direct.
    pub fn select(&self, transitive: bool) -> Vec<&Artifact> {
        if !transitive {
            return self.direct.iter().collect();
        }
        let direct: BTreeSet<&Coordinates> = self.direct.iter().map(|a| &a.coordinates).collect();
        self.all
            .iter()
            .filter(|a| !direct.contains(&a.coordinates))
            .collect()
    }

    /// Coordinates of every selected artifact: the keep-set of the tree filter.
    pub fn selected(&self) -> BTreeSet<&Coordinates> {
        self.all.iter().map(|a| &a.coordinates).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DependencyNode {
    pub artifact: Artifact,
    pub children: Vec<DependencyNode>,
}

impl DependencyNode {
    pub fn leaf(artifact: Artifact) -> Self {
        Self {
            artifact,
            children: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Repository {
    pub id: String,
    pub url: String,
    pub releases: bool,
    pub snapshots: bool,
    /// Set by the reachability probe; may also arrive pre-set.
    pub blacklisted: bool,
}

impl Repository {
    pub fn new(id: &str, url: &str) -> Self {
        Self {
            id: id.to_string(),
            url: url.to_string(),
            releases: true,
            snapshots: false,
            blacklisted: false,
        }
    }

    /// Whether this repository's policies allow serving `artifact` at all.
    pub fn serves(&self, artifact: &Artifact) -> bool {
        if artifact.is_snapshot() {
            self.snapshots
        } else {
            self.releases
        }
    }
}

/// Archive introspection result for one artifact.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JarMetadata {
    pub entries: u64,
    pub classes: u64,
    pub packages: u64,
    pub jdk_revision: Option<String>,
    pub debug: bool,
    pub sealed: bool,
}

/// Metadata of the project that publishes an artifact.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectMetadata {
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub licenses: Vec<LicenseEntry>,
    pub repositories: Vec<Repository>,
}
