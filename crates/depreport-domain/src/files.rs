//! Per-file archive statistics with scope-broken-down totals.

use crate::error::InspectError;
use crate::model::JarMetadata;
use crate::parallel::ordered_map;
use crate::policy::ArchiveTypes;
use crate::ports::JarInspector;
use crate::scope::sort_artifacts;
use depreport_types::{Artifact, ArtifactFile, FileDetails, FileRow, FileTotals};

enum Inspection {
    Archive(Result<JarMetadata, InspectError>),
    Plain,
}

/// Build the file details section over `artifacts`.
///
/// Artifacts without a resolved file are logged and skipped. Archive inspection runs
/// once per artifact with at most `concurrency` inspections in flight.
pub fn file_details<'a, I>(
    artifacts: I,
    inspector: &dyn JarInspector,
    archive_types: &ArchiveTypes,
    concurrency: usize,
) -> FileDetails
where
    I: IntoIterator<Item = &'a Artifact>,
{
    let mut sorted: Vec<&Artifact> = artifacts.into_iter().collect();
    sort_artifacts(&mut sorted);

    let with_files: Vec<(&Artifact, &ArtifactFile)> = sorted
        .into_iter()
        .filter_map(|artifact| match &artifact.file {
            Some(file) => Some((artifact, file)),
            None => {
                tracing::warn!(artifact = %artifact.id(), "artifact has no resolved file");
                None
            }
        })
        .collect();

    let inspections = ordered_map(&with_files, concurrency, |(artifact, file)| {
        if archive_types.contains(&artifact.coordinates.kind) {
            Inspection::Archive(inspector.inspect(artifact, file))
        } else {
            Inspection::Plain
        }
    });

    let with_sealed = inspections
        .iter()
        .any(|i| matches!(i, Inspection::Archive(Ok(meta)) if meta.sealed));

    let mut totals = FileTotals::default();
    let mut rows = Vec::with_capacity(with_files.len());

    for ((artifact, file), inspection) in with_files.iter().zip(inspections) {
        let scope = artifact.scope;
        totals.artifacts.increment(scope);
        totals.size.add(file.size, scope);

        let row = match inspection {
            Inspection::Plain => FileRow::Plain {
                file_name: file.file_name().to_string(),
                size: file.size,
            },
            Inspection::Archive(Err(err)) => {
                tracing::error!(
                    artifact = %artifact.id(),
                    path = %file.path,
                    error = %err,
                    "archive inspection failed"
                );
                FileRow::Failed {
                    artifact_id: artifact.id(),
                    path: file.path.to_string(),
                    message: err.to_string(),
                }
            }
            Inspection::Archive(Ok(meta)) => {
                totals.entries.add(meta.entries, scope);
                totals.classes.add(meta.classes, scope);
                totals.packages.add(meta.packages, scope);
                if let Some(jdk) = meta.jdk_revision.as_deref().and_then(parse_revision)
                    && jdk > totals.highest_jdk
                {
                    totals.highest_jdk = jdk;
                }
                if meta.debug {
                    totals.debug.increment(scope);
                }
                if with_sealed && meta.sealed {
                    totals.sealed.increment(scope);
                }
                FileRow::Archive {
                    file_name: file.file_name().to_string(),
                    size: file.size,
                    entries: meta.entries,
                    classes: meta.classes,
                    packages: meta.packages,
                    jdk_revision: meta.jdk_revision,
                    debug: meta.debug,
                    sealed: meta.sealed,
                }
            }
        };
        rows.push(row);
    }

    FileDetails {
        with_sealed,
        rows,
        totals,
    }
}

fn parse_revision(text: &str) -> Option<f64> {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            tracing::debug!(revision = text, "ignoring unparsable jdk revision");
            None
        }
    }
}
