use anyhow::Context;
use camino::Utf8Path;
use depreport_domain::error::ProbeError;
use depreport_domain::model::Repository;
use depreport_domain::ports::{ArtifactLocator, Collaborators, RepositoryProbe};
use depreport_domain::{RunStats, generate};
use depreport_repo::{
    HttpArtifactLocator, HttpRepositoryProbe, ZipJarInspector, http_client, load_snapshot,
};
use depreport_settings::{Overrides, ResolvedConfig};
use depreport_types::{Artifact, ReportEnvelope, SCHEMA_REPORT_V1, ToolMeta};
use std::time::Duration;
use time::OffsetDateTime;

#[derive(Clone, Debug)]
pub struct RunInput<'a> {
    pub snapshot_path: &'a Utf8Path,
    /// Contents of `depreport.toml`; empty means defaults.
    pub config_text: &'a str,
    pub overrides: Overrides,
}

#[derive(Clone, Debug)]
pub struct ReportOutput {
    pub report: ReportEnvelope,
    pub resolved_config: ResolvedConfig,
    pub stats: RunStats,
}

pub fn run_report(input: RunInput<'_>) -> anyhow::Result<ReportOutput> {
    let started_at = OffsetDateTime::now_utc();

    let cfg = if input.config_text.trim().is_empty() {
        depreport_settings::DepreportConfigV1::default()
    } else {
        depreport_settings::parse_config_toml(input.config_text).context("parse config")?
    };
    let resolved =
        depreport_settings::resolve_config(cfg, input.overrides).context("resolve config")?;
    let effective = &resolved.effective;

    let snapshot = load_snapshot(input.snapshot_path).context("load snapshot")?;

    // Only the locations section touches the network.
    let (probe, locator) = if effective.dependency_locations {
        let client = http_client(Duration::from_millis(resolved.probe_timeout_ms))?;
        (
            Some(HttpRepositoryProbe::new(client.clone())),
            Some(HttpArtifactLocator::new(client)),
        )
    } else {
        (None, None)
    };
    let collab = Collaborators {
        inspector: &ZipJarInspector,
        projects: &snapshot.projects,
        probe: probe
            .as_ref()
            .map_or(&Offline as &dyn RepositoryProbe, |p| p as &dyn RepositoryProbe),
        locator: locator
            .as_ref()
            .map_or(&Offline as &dyn ArtifactLocator, |l| l as &dyn ArtifactLocator),
    };

    tracing::info!(
        snapshot = %input.snapshot_path,
        profile = %effective.profile,
        details = effective.dependency_details,
        locations = effective.dependency_locations,
        "generating report"
    );
    let domain = generate(&snapshot.input, collab, effective);
    let finished_at = OffsetDateTime::now_utc();

    tracing::info!(
        sections = domain.sections.len(),
        direct = domain.stats.direct,
        transitive = domain.stats.transitive,
        archives = domain.stats.archives_inspected,
        repositories = domain.stats.repositories,
        blacklisted = domain.stats.repositories_blacklisted,
        "report generated"
    );

    let report = ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "depreport".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at,
        project: snapshot.input.project.clone(),
        sections: domain.sections,
    };

    Ok(ReportOutput {
        report,
        resolved_config: resolved,
        stats: domain.stats,
    })
}

/// Stands in for the HTTP collaborators when repository locations are disabled.
struct Offline;

impl RepositoryProbe for Offline {
    fn reachable(&self, url: &str) -> Result<bool, ProbeError> {
        Err(ProbeError::Unreachable {
            url: url.to_string(),
            reason: "repository probing is disabled".to_string(),
        })
    }
}

impl ArtifactLocator for Offline {
    fn exists_in(&self, _repository: &Repository, _artifact: &Artifact) -> bool {
        false
    }

    fn url_for(&self, _repository: &Repository, _artifact: &Artifact) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use depreport_types::Section;

    const SNAPSHOT: &str = r#"{
  "schema": "depreport.snapshot.v1",
  "project": { "group_id": "org.acme", "artifact_id": "app", "version": "1.0", "name": "App" },
  "repositories": [ { "id": "central", "url": "https://repo.example/maven2" } ],
  "direct": [
    { "group_id": "org.acme", "artifact_id": "lib", "version": "2.0" },
    { "group_id": "junit", "artifact_id": "junit", "version": "4.13", "scope": "test" }
  ],
  "artifacts": [
    { "group_id": "org.acme", "artifact_id": "lib", "version": "2.0" },
    { "group_id": "junit", "artifact_id": "junit", "version": "4.13", "scope": "test" }
  ],
  "projects": {
    "org.acme:lib:2.0": { "name": "Lib", "licenses": [ { "name": "Apache-2.0" } ] },
    "junit:junit:4.13": { "name": "JUnit", "licenses": [ { "name": "EPL-1.0" } ] }
  }
}"#;

    fn write_snapshot(text: &str) -> (tempfile::TempDir, Utf8PathBuf) {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path").to_path_buf();
        let path = root.join("deps.json");
        std::fs::write(&path, text).expect("write snapshot");
        (tmp, path)
    }

    fn offline() -> Overrides {
        Overrides {
            profile: Some("offline".to_string()),
            ..Overrides::default()
        }
    }

    #[test]
    fn empty_config_uses_defaults() {
        let (_tmp, path) = write_snapshot(SNAPSHOT);
        let output = run_report(RunInput {
            snapshot_path: &path,
            config_text: "",
            overrides: Overrides {
                dependency_locations: Some(false),
                ..Overrides::default()
            },
        })
        .expect("run_report");

        assert_eq!(output.resolved_config.effective.profile, "full");
        assert!(output.resolved_config.effective.dependency_details);
        assert!(!output.resolved_config.effective.dependency_locations);
    }

    #[test]
    fn offline_profile_emits_every_section_but_locations() {
        let (_tmp, path) = write_snapshot(SNAPSHOT);
        let output = run_report(RunInput {
            snapshot_path: &path,
            config_text: "",
            overrides: offline(),
        })
        .expect("run_report");

        let ids: Vec<&str> = output.report.sections.iter().map(Section::id).collect();
        assert_eq!(
            ids,
            vec![
                "dependencies.project",
                "dependencies.transitive",
                "dependencies.tree",
                "dependencies.licenses",
                "dependencies.file_details",
            ]
        );
        assert_eq!(output.report.schema, SCHEMA_REPORT_V1);
        assert_eq!(output.report.tool.name, "depreport");
        assert_eq!(
            output.report.project.as_ref().and_then(|p| p.name.as_deref()),
            Some("App")
        );
        assert_eq!(output.stats.direct, 2);
        assert_eq!(output.stats.repositories_probed, 0);
        assert!(output.report.started_at <= output.report.finished_at);
    }

    #[test]
    fn config_keys_are_applied() {
        let (_tmp, path) = write_snapshot(SNAPSHOT);
        let output = run_report(RunInput {
            snapshot_path: &path,
            config_text: "profile = \"summary\"\n[format]\nlocale = \"de\"\n",
            overrides: Overrides::default(),
        })
        .expect("run_report");

        assert_eq!(output.report.sections.len(), 4);
        assert_eq!(output.resolved_config.format.decimal_separator, ',');
    }

    #[test]
    fn invalid_config_is_an_error() {
        let (_tmp, path) = write_snapshot(SNAPSHOT);
        let err = run_report(RunInput {
            snapshot_path: &path,
            config_text: "[probe]\nconcurrency = 0\n",
            overrides: offline(),
        })
        .expect_err("zero concurrency");
        assert!(format!("{err:#}").contains("probe.concurrency"));
    }

    #[test]
    fn missing_snapshot_is_an_error() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");
        let missing = root.join("nope.json");
        let err = run_report(RunInput {
            snapshot_path: &missing,
            config_text: "",
            overrides: offline(),
        })
        .expect_err("missing snapshot");
        assert!(format!("{err:#}").contains("load snapshot"));
    }

    #[test]
    fn offline_collaborators_never_find_anything() {
        let repo = Repository::new("central", "https://repo.example/maven2");
        let artifact = Artifact::new(
            depreport_types::Coordinates::new("org.acme", "lib", "2.0"),
            depreport_types::Scope::Compile,
        );
        assert!(Offline.reachable("https://repo.example").is_err());
        assert!(!Offline.exists_in(&repo, &artifact));
        assert_eq!(Offline.url_for(&repo, &artifact), None);
    }
}
