use crate::ports::ProjectLookup;
use depreport_types::{Artifact, LicenseGroup, LicenseKey, Scope};
use std::collections::BTreeMap;

/// License name to publishing project names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LicenseGrouping {
    groups: BTreeMap<LicenseKey, Vec<String>>,
}

impl LicenseGrouping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `project` under `key`. Duplicates are kept.
    pub fn push(&mut self, key: LicenseKey, project: String) {
        self.groups.entry(key).or_default().push(project);
    }

    pub fn get(&self, key: &LicenseKey) -> Option<&[String]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in key order, each project list sorted.
    pub fn into_groups(self) -> Vec<LicenseGroup> {
        self.groups
            .into_iter()
            .map(|(license, mut projects)| {
                projects.sort();
                LicenseGroup { license, projects }
            })
            .collect()
    }
}

pub fn group_licenses<'a, I>(artifacts: I, projects: &dyn ProjectLookup) -> LicenseGrouping
where
    I: IntoIterator<Item = &'a Artifact>,
{
    let mut grouping = LicenseGrouping::new();
    for artifact in artifacts {
        if artifact.scope == Scope::System {
            continue;
        }
        let project = match projects.project_for(artifact) {
            Ok(project) => project,
            Err(err) => {
                tracing::error!(artifact = %artifact.id(), error = %err, "project lookup failed");
                continue;
            }
        };
        if project.licenses.is_empty() {
            grouping.push(LicenseKey::Undeclared, project.name);
            continue;
        }
        for license in &project.licenses {
            grouping.push(LicenseKey::Named(license.name.clone()), project.name.clone());
        }
    }
    grouping
}
