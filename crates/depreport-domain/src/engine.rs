use crate::files::file_details;
use crate::licenses::group_licenses;
use crate::model::ReportInput;
use crate::policy::EffectiveConfig;
use crate::ports::Collaborators;
use crate::report::{DomainReport, RunStats};
use crate::repositories::{
    availability_matrix, collect_repositories, probe_repositories, repository_locations,
};
use crate::scope::{classify, scope_tables};
use crate::tree::{NodeIds, describe, filter_tree};
use depreport_types::{FileRow, Section};

/// Build every report section for `input`, in output order.
///
/// Collaborator failures degrade the affected rows; they never abort the run.
pub fn generate(
    input: &ReportInput,
    collab: Collaborators<'_>,
    cfg: &EffectiveConfig,
) -> DomainReport {
    let deps = &input.dependencies;
    let mut stats = RunStats::default();

    if deps.is_empty() {
        tracing::info!("project declares no dependencies");
        return DomainReport {
            sections: vec![Section::NoDependencies],
            stats,
        };
    }

    let mut sections = Vec::new();

    let direct = classify(deps, false);
    stats.direct = direct.iter().map(|b| b.artifacts.len()).sum();
    sections.push(Section::ProjectDependencies {
        tables: scope_tables(&direct, collab.projects),
    });

    let transitive = classify(deps, true);
    stats.transitive = transitive.iter().map(|b| b.artifacts.len()).sum();
    sections.push(Section::TransitiveDependencies {
        tables: scope_tables(&transitive, collab.projects),
    });

    let keep = deps.selected();
    let filtered = filter_tree(&input.tree, &keep, &mut NodeIds::new());
    let tree_artifacts = filtered.artifacts();
    stats.tree_nodes = tree_artifacts.len();
    sections.push(Section::DependencyTree {
        root: describe(&filtered, collab.projects),
    });

    sections.push(Section::Licenses {
        groups: group_licenses(tree_artifacts, collab.projects).into_groups(),
    });

    if cfg.dependency_details {
        let details = file_details(
            &deps.all,
            collab.inspector,
            &cfg.archive_types,
            cfg.concurrency,
        );
        stats.archives_inspected = details
            .rows
            .iter()
            .filter(|r| !matches!(r, FileRow::Plain { .. }))
            .count();
        sections.push(Section::FileDetails(details));
    }

    if cfg.dependency_locations {
        let mut repositories =
            collect_repositories(&input.project_repositories, &deps.all, collab.projects);
        let outcome = probe_repositories(&mut repositories, collab.probe, cfg.concurrency);
        stats.repositories = repositories.len();
        stats.repositories_probed = outcome.probed.len();
        stats.repositories_blacklisted = repositories.iter().filter(|r| r.blacklisted).count();

        let matrix =
            availability_matrix(&deps.all, &repositories, collab.locator, cfg.concurrency);
        sections.push(Section::RepositoryLocations(repository_locations(
            &repositories,
            matrix,
        )));
    }

    DomainReport { sections, stats }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DependencyNode, Repository, ResolvedDependencies};
    use crate::test_support::{
        CountingProbe, FakeInspector, FakeLocator, FakeProjects, artifact, node, project,
        with_file,
    };
    use depreport_types::{LicenseKey, Scope};

    struct Fixture {
        input: ReportInput,
        projects: FakeProjects,
        inspector: FakeInspector,
        probe: CountingProbe,
        locator: FakeLocator,
    }

    impl Fixture {
        fn collaborators(&self) -> Collaborators<'_> {
            Collaborators {
                inspector: &self.inspector,
                projects: &self.projects,
                probe: &self.probe,
                locator: &self.locator,
            }
        }
    }

    fn fixture() -> Fixture {
        let root = artifact("org.acme", "app", "1.0", Scope::Compile);
        let lib = with_file(
            artifact("org.acme", "lib", "2.0", Scope::Compile),
            "/repo/lib-2.0.jar",
            1024,
        );
        let inner = with_file(
            artifact("org.acme", "inner", "0.1", Scope::Runtime),
            "/repo/inner-0.1.jar",
            2048,
        );

        let mut projects = FakeProjects::default();
        projects.insert(&root, project("App", &["Apache-2.0"]));
        projects.insert(&lib, project("Lib", &["Apache-2.0"]));
        projects.insert(&inner, project("Inner", &[]));

        let mut inspector = FakeInspector::default();
        inspector.insert(&lib, Default::default());
        inspector.insert(&inner, Default::default());

        let input = ReportInput {
            project: None,
            project_repositories: vec![Repository::new("central", "https://central.example")],
            dependencies: ResolvedDependencies {
                direct: vec![lib.clone()],
                all: vec![lib.clone(), inner.clone()],
            },
            tree: node(root, vec![node(lib, vec![node(inner, vec![])])]),
        };

        Fixture {
            input,
            projects,
            inspector,
            probe: CountingProbe::new(&["https://central.example"], &[]),
            locator: FakeLocator::everywhere(),
        }
    }

    fn ids(sections: &[Section]) -> Vec<&'static str> {
        sections.iter().map(Section::id).collect()
    }

    #[test]
    fn full_run_emits_every_section_in_order() {
        let f = fixture();
        let report = generate(&f.input, f.collaborators(), &EffectiveConfig::default());

        assert_eq!(
            ids(&report.sections),
            vec![
                "dependencies.project",
                "dependencies.transitive",
                "dependencies.tree",
                "dependencies.licenses",
                "dependencies.file_details",
                "dependencies.repository_locations",
            ]
        );
        assert_eq!(report.stats.direct, 1);
        assert_eq!(report.stats.transitive, 1);
        assert_eq!(report.stats.tree_nodes, 3);
        assert_eq!(report.stats.repositories_probed, 1);
        assert_eq!(f.probe.calls("https://central.example"), 1);
    }

    #[test]
    fn licenses_cover_the_root_project() {
        let f = fixture();
        let report = generate(&f.input, f.collaborators(), &EffectiveConfig::default());
        let groups = report
            .sections
            .iter()
            .find_map(|s| match s {
                Section::Licenses { groups } => Some(groups.clone()),
                _ => None,
            })
            .unwrap_or_default();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].license, LicenseKey::Named("Apache-2.0".to_string()));
        assert_eq!(groups[0].projects, vec!["App", "Lib"]);
        assert_eq!(groups[1].license, LicenseKey::Undeclared);
        assert_eq!(groups[1].projects, vec!["Inner"]);
    }

    #[test]
    fn disabled_sections_are_omitted_and_nothing_is_probed() {
        let f = fixture();
        let cfg = EffectiveConfig {
            dependency_details: false,
            dependency_locations: false,
            ..EffectiveConfig::default()
        };
        let report = generate(&f.input, f.collaborators(), &cfg);

        assert_eq!(report.sections.len(), 4);
        assert_eq!(f.probe.total_calls(), 0);
        assert_eq!(f.inspector.calls(), 0);
    }

    #[test]
    fn no_dependencies_yields_a_single_section() {
        let mut f = fixture();
        f.input.dependencies = ResolvedDependencies::default();
        f.input.tree = DependencyNode::leaf(artifact("org.acme", "app", "1.0", Scope::Compile));

        let report = generate(&f.input, f.collaborators(), &EffectiveConfig::default());
        assert_eq!(report.sections, vec![Section::NoDependencies]);
        assert_eq!(f.probe.total_calls(), 0);
    }

    #[test]
    fn resolved_artifacts_without_direct_declarations_count_as_none() {
        let mut f = fixture();
        f.input.dependencies.direct.clear();
        assert!(!f.input.dependencies.all.is_empty());

        let report = generate(&f.input, f.collaborators(), &EffectiveConfig::default());
        assert_eq!(report.sections, vec![Section::NoDependencies]);
        assert_eq!(f.inspector.calls(), 0);
    }
}
