//! Repository adapters: load resolution snapshots, inspect archives, reach remote repositories.
//!
//! This crate is allowed to do filesystem and network IO. The domain engine only ever sees
//! it through the collaborator traits it implements.

#![forbid(unsafe_code)]

mod archive;
mod http;
mod projects;
mod snapshot;

use anyhow::Context;
use camino::Utf8Path;
use depreport_domain::model::ReportInput;

pub use archive::{ZipJarInspector, inspect_archive, jdk_revision};
pub use http::{HttpArtifactLocator, HttpRepositoryProbe, http_client, maven2_path};
pub use projects::SnapshotProjects;
pub use snapshot::{
    ArtifactEntry, FileResolver, FsResolver, NodeEntry, ProjectEntry, ProjectMetaEntry,
    RepositoryEntry, SCHEMA_SNAPSHOT_V1, SnapshotV1, parse_snapshot,
};

/// Fuzz-friendly API for testing parsing robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    use super::*;
    use depreport_types::{ArtifactFile, Coordinates};

    struct NoFiles;

    impl FileResolver for NoFiles {
        fn resolve(&self, _artifact: &Coordinates, _path: &str) -> Option<ArtifactFile> {
            None
        }
    }

    /// Parse arbitrary text as a resolution snapshot and convert it to engine input.
    ///
    /// Returns `Ok(...)` on a valid snapshot, `Err(...)` otherwise. **Never panics** on any input.
    pub fn parse_snapshot(text: &str) -> anyhow::Result<()> {
        let snapshot = super::parse_snapshot(text)?;
        let _ = snapshot.into_input(&NoFiles);
        Ok(())
    }

    /// Inspect arbitrary bytes as a Java archive. **Never panics** on any input.
    pub fn inspect_archive(bytes: &[u8]) -> anyhow::Result<()> {
        let _ = super::inspect_archive(std::io::Cursor::new(bytes))?;
        Ok(())
    }
}

/// A loaded snapshot: engine input plus the project metadata lookup it carries.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub input: ReportInput,
    pub projects: SnapshotProjects,
}

/// Read a resolution snapshot from disk.
///
/// Relative artifact file paths are resolved against the snapshot's absolute directory; sizes come
/// from filesystem metadata. Declared files that do not exist are dropped with a warning.
pub fn load_snapshot(path: &Utf8Path) -> anyhow::Result<Snapshot> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read {}", path))?;
    let snapshot = parse_snapshot(&text).with_context(|| format!("parse {}", path))?;

    let dir = match path.parent() {
        Some(dir) if !dir.as_str().is_empty() => dir,
        _ => Utf8Path::new("."),
    };
    // Rows and panels report absolute paths, whatever the working directory.
    let base = dir
        .canonicalize_utf8()
        .with_context(|| format!("resolve directory of {}", path))?;
    let resolver = FsResolver { base };
    let (input, projects) = snapshot.into_input(&resolver);

    tracing::debug!(
        path = %path,
        artifacts = input.dependencies.all.len(),
        projects = projects.len(),
        "snapshot loaded"
    );

    Ok(Snapshot {
        input,
        projects: SnapshotProjects::new(projects),
    })
}
