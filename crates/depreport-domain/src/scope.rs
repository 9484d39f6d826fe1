use crate::model::ResolvedDependencies;
use crate::ports::ProjectLookup;
use depreport_types::{Artifact, DependencyRow, Scope, ScopeTable};
use std::cmp::Ordering;

/// Classifier ordering: optional artifacts after non-optional ones, then natural coordinate order.
pub fn compare_artifacts(a: &Artifact, b: &Artifact) -> Ordering {
    match (a.optional, b.optional) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => a.coordinates.cmp(&b.coordinates),
    }
}

/// Stable sort by [`compare_artifacts`].
pub fn sort_artifacts(artifacts: &mut [&Artifact]) {
    artifacts.sort_by(|a, b| compare_artifacts(a, b));
}

/// Artifacts of one scope, sorted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeBucket<'a> {
    pub scope: Scope,
    pub artifacts: Vec<&'a Artifact>,
}

/// Partition into scope buckets in table order; empty buckets are omitted.
pub fn group_by_scope<'a, I>(artifacts: I) -> Vec<ScopeBucket<'a>>
where
    I: IntoIterator<Item = &'a Artifact>,
{
    let artifacts: Vec<&Artifact> = artifacts.into_iter().collect();
    Scope::TABLE_ORDER
        .iter()
        .filter_map(|scope| {
            let mut bucket: Vec<&Artifact> = artifacts
                .iter()
                .copied()
                .filter(|a| a.scope == *scope)
                .collect();
            if bucket.is_empty() {
                return None;
            }
            sort_artifacts(&mut bucket);
            Some(ScopeBucket {
                scope: *scope,
                artifacts: bucket,
            })
        })
        .collect()
}

/// Classify the direct dependencies, or with `transitive` the transitive ones.
pub fn classify(deps: &ResolvedDependencies, transitive: bool) -> Vec<ScopeBucket<'_>> {
    group_by_scope(deps.select(transitive))
}

/// Turn buckets into report tables. Project URLs come from `projects`; lookup failures
/// only cost the link.
pub fn scope_tables(buckets: &[ScopeBucket<'_>], projects: &dyn ProjectLookup) -> Vec<ScopeTable> {
    buckets
        .iter()
        .map(|bucket| ScopeTable {
            scope: bucket.scope,
            with_classifier: bucket
                .artifacts
                .iter()
                .any(|a| a.coordinates.classifier().is_some()),
            with_optional: bucket.artifacts.iter().any(|a| a.optional),
            rows: bucket
                .artifacts
                .iter()
                .map(|a| DependencyRow {
                    coordinates: a.coordinates.clone(),
                    optional: a.optional,
                    url: project_url(a, projects),
                })
                .collect(),
        })
        .collect()
}

fn project_url(artifact: &Artifact, projects: &dyn ProjectLookup) -> Option<String> {
    if artifact.scope == Scope::System {
        return None;
    }
    match projects.project_for(artifact) {
        Ok(project) => project.url.filter(|u| !u.is_empty()),
        Err(err) => {
            tracing::debug!(artifact = %artifact.id(), error = %err, "no project url");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeProjects, artifact, optional, project};

    #[test]
    fn example_buckets_keep_optional_last() {
        let a = artifact("g", "A", "1.0", Scope::Compile);
        let b = optional(artifact("g", "B", "2.0", Scope::Compile));
        let c = artifact("g", "C", "1.0", Scope::Test);

        // A flat sort puts the optional artifact after every required one.
        let mut sorted = vec![&c, &b, &a];
        sort_artifacts(&mut sorted);
        assert_eq!(sorted, vec![&a, &c, &b]);

        let buckets = group_by_scope([&c, &b, &a]);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].scope, Scope::Compile);
        assert_eq!(buckets[0].artifacts, vec![&a, &b]);
        assert_eq!(buckets[1].scope, Scope::Test);
        assert_eq!(buckets[1].artifacts, vec![&c]);

        let flattened: Vec<&Artifact> = buckets
            .iter()
            .flat_map(|bucket| bucket.artifacts.iter().copied())
            .collect();
        assert_eq!(flattened, vec![&a, &b, &c]);
    }

    #[test]
    fn optional_sorts_after_lexically_smaller_required() {
        let z = artifact("z", "z", "1", Scope::Compile);
        let a = optional(artifact("a", "a", "1", Scope::Compile));
        let mut v = vec![&a, &z];
        sort_artifacts(&mut v);
        assert_eq!(v, vec![&z, &a]);
    }

    #[test]
    fn buckets_follow_table_order() {
        let system = artifact("g", "s", "1", Scope::System);
        let runtime = artifact("g", "r", "1", Scope::Runtime);
        let provided = artifact("g", "p", "1", Scope::Provided);
        let scopes: Vec<Scope> = group_by_scope([&system, &provided, &runtime])
            .into_iter()
            .map(|b| b.scope)
            .collect();
        assert_eq!(scopes, vec![Scope::Runtime, Scope::Provided, Scope::System]);
    }

    #[test]
    fn tables_flag_classifier_and_optional_columns() {
        let mut classified = artifact("g", "a", "1", Scope::Compile);
        classified.coordinates.classifier = Some("jdk8".to_string());
        let plain = artifact("g", "b", "1", Scope::Test);
        let opt = optional(artifact("g", "c", "1", Scope::Test));

        let mut projects = FakeProjects::default();
        projects.insert(&classified, project("A", &[]));
        let mut with_url = project("B", &[]);
        with_url.url = Some("https://b.example".to_string());
        projects.insert(&plain, with_url);

        let buckets = group_by_scope([&classified, &plain, &opt]);
        let tables = scope_tables(&buckets, &projects);

        assert!(tables[0].with_classifier);
        assert!(!tables[0].with_optional);
        assert!(!tables[1].with_classifier);
        assert!(tables[1].with_optional);
        assert_eq!(tables[1].rows[0].url.as_deref(), Some("https://b.example"));
        assert_eq!(tables[1].rows[1].url, None);
    }
}
