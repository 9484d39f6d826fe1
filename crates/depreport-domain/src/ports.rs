//! Collaborator seams. The engine performs I/O only through these traits.
//!
//! Every port is `Sync`: probing and archive inspection may fan out across threads.

use crate::error::{InspectError, LookupError, ProbeError};
use crate::model::{JarMetadata, ProjectMetadata, Repository};
use depreport_types::{Artifact, ArtifactFile};

pub trait JarInspector: Sync {
    fn inspect(&self, artifact: &Artifact, file: &ArtifactFile)
    -> Result<JarMetadata, InspectError>;
}

pub trait ProjectLookup: Sync {
    fn project_for(&self, artifact: &Artifact) -> Result<ProjectMetadata, LookupError>;
}

pub trait RepositoryProbe: Sync {
    /// `Ok(false)` means the URL answered but serves nothing.
    fn reachable(&self, url: &str) -> Result<bool, ProbeError>;
}

pub trait ArtifactLocator: Sync {
    fn exists_in(&self, repository: &Repository, artifact: &Artifact) -> bool;

    fn url_for(&self, repository: &Repository, artifact: &Artifact) -> Option<String>;
}

/// The set of collaborators one report run uses.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub inspector: &'a dyn JarInspector,
    pub projects: &'a dyn ProjectLookup,
    pub probe: &'a dyn RepositoryProbe,
    pub locator: &'a dyn ArtifactLocator,
}
