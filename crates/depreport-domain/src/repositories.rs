//! Repository set assembly, reachability probing and the availability matrix.

use crate::model::Repository;
use crate::parallel::ordered_map;
use crate::ports::{ArtifactLocator, ProjectLookup, RepositoryProbe};
use crate::scope::sort_artifacts;
use depreport_types::{
    Artifact, Availability, AvailabilityMatrix, MatrixRow, RepositoryLocations, RepositoryRow,
    Scope, TotalsAccumulator,
};
use std::collections::{BTreeMap, BTreeSet};

/// Repositories keyed by id. Inserting an existing id replaces the earlier entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RepositorySet {
    by_id: BTreeMap<String, Repository>,
}

impl RepositorySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, repository: Repository) {
        let url = repository.url.clone();
        if let Some(previous) = self.by_id.insert(repository.id.clone(), repository)
            && previous.url != url
        {
            tracing::debug!(
                id = %previous.id,
                replaced = %previous.url,
                url = %url,
                "repository id redeclared"
            );
        }
    }

    pub fn get(&self, id: &str) -> Option<&Repository> {
        self.by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Repository> {
        self.by_id.values()
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut Repository> {
        self.by_id.values_mut()
    }
}

impl FromIterator<Repository> for RepositorySet {
    fn from_iter<I: IntoIterator<Item = Repository>>(iter: I) -> Self {
        let mut set = Self::new();
        for repository in iter {
            set.insert(repository);
        }
        set
    }
}

/// Project repositories first, then the repositories each dependency's project declares.
pub fn collect_repositories<'a, I>(
    project_repositories: &[Repository],
    artifacts: I,
    projects: &dyn ProjectLookup,
) -> RepositorySet
where
    I: IntoIterator<Item = &'a Artifact>,
{
    let mut set: RepositorySet = project_repositories.iter().cloned().collect();
    for artifact in artifacts {
        match projects.project_for(artifact) {
            Ok(project) => {
                for repository in project.repositories {
                    set.insert(repository);
                }
            }
            Err(err) => {
                tracing::error!(artifact = %artifact.id(), error = %err, "project lookup failed");
            }
        }
    }
    set
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// URLs probed during this call.
    pub probed: Vec<String>,
    pub blacklisted_urls: BTreeSet<String>,
}

/// Probe every distinct repository URL not already blacklisted and blacklist the
/// repositories behind unreachable ones.
pub fn probe_repositories(
    set: &mut RepositorySet,
    probe: &dyn RepositoryProbe,
    concurrency: usize,
) -> ProbeOutcome {
    let mut blacklisted_urls: BTreeSet<String> = set
        .iter()
        .filter(|r| r.blacklisted)
        .map(|r| r.url.clone())
        .collect();

    let pending: Vec<String> = set
        .iter()
        .map(|r| r.url.clone())
        .filter(|url| !blacklisted_urls.contains(url))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let results = ordered_map(&pending, concurrency, |url| probe.reachable(url));

    for (url, result) in pending.iter().zip(results) {
        match result {
            Ok(true) => tracing::debug!(url = %url, "repository reachable"),
            Ok(false) => {
                tracing::warn!(url = %url, "repository answered without content, blacklisting");
                blacklisted_urls.insert(url.clone());
            }
            Err(err) => {
                tracing::warn!(url = %url, error = %err, "repository unreachable, blacklisting");
                blacklisted_urls.insert(url.clone());
            }
        }
    }

    for repository in set.iter_mut() {
        if blacklisted_urls.contains(&repository.url) {
            repository.blacklisted = true;
        }
    }

    ProbeOutcome {
        probed: pending,
        blacklisted_urls,
    }
}

/// Cross `artifacts` with every repository in `set`.
pub fn availability_matrix<'a, I>(
    artifacts: I,
    set: &RepositorySet,
    locator: &dyn ArtifactLocator,
    concurrency: usize,
) -> AvailabilityMatrix
where
    I: IntoIterator<Item = &'a Artifact>,
{
    let mut sorted: Vec<&Artifact> = artifacts.into_iter().collect();
    sort_artifacts(&mut sorted);
    let repositories: Vec<&Repository> = set.iter().collect();

    let rows = ordered_map(&sorted, concurrency, |artifact| MatrixRow {
        artifact_id: artifact.id(),
        cells: repositories
            .iter()
            .map(|repository| availability(artifact, repository, locator))
            .collect(),
    });

    let mut totals = TotalsAccumulator::new();
    let mut found = vec![0u64; repositories.len()];
    for (artifact, row) in sorted.iter().zip(&rows) {
        totals.increment(artifact.scope);
        for (count, cell) in found.iter_mut().zip(&row.cells) {
            if cell.is_found() {
                *count += 1;
            }
        }
    }

    AvailabilityMatrix {
        repository_ids: repositories.iter().map(|r| r.id.clone()).collect(),
        rows,
        artifacts: totals,
        found,
    }
}

fn availability(
    artifact: &Artifact,
    repository: &Repository,
    locator: &dyn ArtifactLocator,
) -> Availability {
    if artifact.scope == Scope::System {
        return Availability::NotApplicable;
    }
    if repository.blacklisted {
        return Availability::Blacklisted;
    }
    if repository.serves(artifact) && locator.exists_in(repository, artifact) {
        return Availability::Found {
            url: locator.url_for(repository, artifact),
            repository_url: repository.url.clone(),
        };
    }
    Availability::NotFound
}

pub fn repository_locations(set: &RepositorySet, matrix: AvailabilityMatrix) -> RepositoryLocations {
    let repositories: Vec<RepositoryRow> = set
        .iter()
        .map(|r| RepositoryRow {
            id: r.id.clone(),
            url: r.url.clone(),
            releases: r.releases,
            snapshots: r.snapshots,
            blacklisted: r.blacklisted,
        })
        .collect();

    RepositoryLocations {
        with_blacklisted: repositories.iter().any(|r| r.blacklisted),
        repositories,
        matrix,
    }
}
