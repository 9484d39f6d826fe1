use depreport_domain::error::LookupError;
use depreport_domain::model::ProjectMetadata;
use depreport_domain::ports::ProjectLookup;
use depreport_types::Artifact;
use std::collections::BTreeMap;

/// Project metadata carried by the resolution snapshot, keyed by `group:artifact:version`.
#[derive(Clone, Debug, Default)]
pub struct SnapshotProjects {
    projects: BTreeMap<String, ProjectMetadata>,
}

impl SnapshotProjects {
    pub fn new(projects: BTreeMap<String, ProjectMetadata>) -> Self {
        Self { projects }
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

impl ProjectLookup for SnapshotProjects {
    fn project_for(&self, artifact: &Artifact) -> Result<ProjectMetadata, LookupError> {
        let key = artifact.coordinates.project_key();
        self.projects
            .get(&key)
            .cloned()
            .ok_or(LookupError::NotFound(key))
    }
}
