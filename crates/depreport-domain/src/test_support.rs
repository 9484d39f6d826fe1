use crate::error::{InspectError, LookupError, ProbeError};
use crate::model::{DependencyNode, JarMetadata, ProjectMetadata, Repository};
use crate::ports::{ArtifactLocator, JarInspector, ProjectLookup, RepositoryProbe};
use depreport_types::{Artifact, ArtifactFile, Coordinates, LicenseEntry, Scope};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn artifact(group: &str, id: &str, version: &str, scope: Scope) -> Artifact {
    Artifact::new(Coordinates::new(group, id, version), scope)
}

pub fn optional(mut artifact: Artifact) -> Artifact {
    artifact.optional = true;
    artifact
}

pub fn with_file(mut artifact: Artifact, path: &str, size: u64) -> Artifact {
    artifact.file = Some(ArtifactFile {
        path: path.into(),
        size,
    });
    artifact
}

pub fn node(artifact: Artifact, children: Vec<DependencyNode>) -> DependencyNode {
    DependencyNode { artifact, children }
}

pub fn project(name: &str, licenses: &[&str]) -> ProjectMetadata {
    ProjectMetadata {
        name: name.to_string(),
        licenses: licenses
            .iter()
            .map(|l| LicenseEntry {
                name: l.to_string(),
                url: None,
            })
            .collect(),
        ..ProjectMetadata::default()
    }
}

/// Project metadata keyed by artifact id; anything else is a lookup failure.
#[derive(Default)]
pub struct FakeProjects {
    projects: BTreeMap<String, ProjectMetadata>,
}

impl FakeProjects {
    pub fn insert(&mut self, artifact: &Artifact, project: ProjectMetadata) {
        self.projects.insert(artifact.id(), project);
    }
}

impl ProjectLookup for FakeProjects {
    fn project_for(&self, artifact: &Artifact) -> Result<ProjectMetadata, LookupError> {
        self.projects
            .get(&artifact.id())
            .cloned()
            .ok_or_else(|| LookupError::NotFound(artifact.id()))
    }
}

/// Canned archive metadata; artifacts without an entry fail inspection.
#[derive(Default)]
pub struct FakeInspector {
    jars: BTreeMap<String, JarMetadata>,
    calls: AtomicUsize,
}

impl FakeInspector {
    pub fn insert(&mut self, artifact: &Artifact, meta: JarMetadata) {
        self.jars.insert(artifact.id(), meta);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl JarInspector for FakeInspector {
    fn inspect(
        &self,
        artifact: &Artifact,
        _file: &ArtifactFile,
    ) -> Result<JarMetadata, InspectError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.jars
            .get(&artifact.id())
            .cloned()
            .ok_or_else(|| InspectError::Invalid("zip END header not found".to_string()))
    }
}

/// Records how often each URL was probed.
///
/// URLs in `reachable` answer `Ok(true)`, URLs in `empty` answer `Ok(false)`, all
/// others fail.
pub struct CountingProbe {
    reachable: BTreeSet<String>,
    empty: BTreeSet<String>,
    calls: Mutex<BTreeMap<String, usize>>,
}

impl CountingProbe {
    pub fn new(reachable: &[&str], empty: &[&str]) -> Self {
        Self {
            reachable: reachable.iter().map(|s| s.to_string()).collect(),
            empty: empty.iter().map(|s| s.to_string()).collect(),
            calls: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn calls(&self, url: &str) -> usize {
        self.calls
            .lock()
            .expect("probe call log")
            .get(url)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().expect("probe call log").values().sum()
    }
}

impl RepositoryProbe for CountingProbe {
    fn reachable(&self, url: &str) -> Result<bool, ProbeError> {
        *self
            .calls
            .lock()
            .expect("probe call log")
            .entry(url.to_string())
            .or_default() += 1;

        if self.reachable.contains(url) {
            Ok(true)
        } else if self.empty.contains(url) {
            Ok(false)
        } else {
            Err(ProbeError::Unreachable {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            })
        }
    }
}

/// Locator that finds every artifact in every repository it is asked about.
pub struct FakeLocator {
    present: bool,
}

impl FakeLocator {
    pub fn everywhere() -> Self {
        Self { present: true }
    }

    pub fn nowhere() -> Self {
        Self { present: false }
    }
}

impl ArtifactLocator for FakeLocator {
    fn exists_in(&self, _repository: &Repository, _artifact: &Artifact) -> bool {
        self.present
    }

    fn url_for(&self, repository: &Repository, artifact: &Artifact) -> Option<String> {
        Some(format!("{}/{}", repository.url, artifact.id()))
    }
}
