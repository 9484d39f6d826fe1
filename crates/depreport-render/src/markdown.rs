use crate::format::{
    format_count, format_revision, format_size, format_size_totals, format_totals,
};
use depreport_types::{
    Availability, AvailabilityMatrix, FileDetails, FileRow, FormatOptions, LicenseEntry,
    LicenseGroup, LicenseKey, NodeDetails, ReportEnvelope, RepositoryLocations, Scope,
    ScopeTable, Section, TreeNode,
};
use std::fmt::Write;

const UNNAMED_LICENSE: &str = "Unnamed";
const UNKNOWN_LICENSE: &str = "Unknown";
const NO_DESCRIPTION: &str = "No description";

pub fn render_markdown(report: &ReportEnvelope, opts: &FormatOptions) -> String {
    let mut out = String::new();

    out.push_str("# Project Dependencies\n\n");
    if let Some(project) = &report.project {
        let name = project.name.as_deref().unwrap_or(&project.coordinates.artifact_id);
        let _ = writeln!(out, "- Project: **{}** (`{}`)", cell(name), project.coordinates);
    }
    let _ = writeln!(out, "- Generated by: {} {}\n", report.tool.name, report.tool.version);

    for section in &report.sections {
        match section {
            Section::NoDependencies => {
                out.push_str(
                    "There are no dependencies for this project. It is a standalone \
                     application that does not depend on any other project.\n\n",
                );
            }
            Section::ProjectDependencies { tables } => {
                heading(&mut out, 2, "Project Dependencies", section.id());
                for table in tables {
                    let _ = writeln!(out, "### {}\n", table.scope);
                    let _ = writeln!(out, "{}\n", scope_intro(table.scope));
                    scope_table(&mut out, table);
                }
            }
            Section::TransitiveDependencies { tables } => {
                heading(&mut out, 2, "Project Transitive Dependencies", section.id());
                if tables.is_empty() {
                    out.push_str("No transitive dependencies are required for this project.\n\n");
                    continue;
                }
                out.push_str(
                    "The following is a list of transitive dependencies for this project. \
                     Transitive dependencies are the dependencies of the project dependencies.\n\n",
                );
                for table in tables {
                    let _ = writeln!(out, "### {}\n", table.scope);
                    let _ = writeln!(out, "{}\n", scope_intro(table.scope));
                    scope_table(&mut out, table);
                }
            }
            Section::DependencyTree { root } => {
                heading(&mut out, 2, "Project Dependency Graph", section.id());
                out.push_str("### Dependency Tree\n\n");
                tree_list(&mut out, root, 0);
                out.push('\n');
                out.push_str("### Dependency Details\n\n");
                for node in root.walk() {
                    node_panel(&mut out, node);
                }
            }
            Section::Licenses { groups } => {
                heading(&mut out, 2, "Licenses", section.id());
                licenses(&mut out, groups);
            }
            Section::FileDetails(details) => {
                heading(&mut out, 2, "Dependency File Details", section.id());
                file_details(&mut out, details, opts);
            }
            Section::RepositoryLocations(locations) => {
                heading(&mut out, 2, "Dependency Repository Locations", section.id());
                repository_locations(&mut out, locations, opts);
            }
        }
    }

    out
}

fn heading(out: &mut String, level: usize, title: &str, anchor: &str) {
    let _ = writeln!(out, "{} <a id=\"{}\"></a>{}\n", "#".repeat(level), anchor, title);
}

fn scope_intro(scope: Scope) -> &'static str {
    match scope {
        Scope::Compile => {
            "This is the list of compile dependencies for this project. These dependencies \
             are required to compile and run the application:"
        }
        Scope::Runtime => {
            "This is the list of runtime dependencies for this project. These dependencies \
             are required to run the application:"
        }
        Scope::Test => {
            "This is the list of test dependencies for this project. These dependencies are \
             only required to compile and run unit tests for the application:"
        }
        Scope::Provided => {
            "This is the list of provided dependencies for this project. These dependencies \
             are required to compile the application, but should be provided by default when \
             using the library:"
        }
        Scope::System => {
            "This is the list of system dependencies for this project. System dependencies \
             are not looked up in any repository:"
        }
    }
}

fn scope_table(out: &mut String, table: &ScopeTable) {
    let mut header = vec!["GroupId", "ArtifactId", "Version"];
    if table.with_classifier {
        header.push("Classifier");
    }
    header.push("Type");
    if table.with_optional {
        header.push("Optional");
    }
    table_header(out, &header);

    for row in &table.rows {
        let c = &row.coordinates;
        let artifact = match &row.url {
            Some(url) => link(&c.artifact_id, url),
            None => cell(&c.artifact_id),
        };
        let mut cells = vec![cell(&c.group_id), artifact, cell(&c.version)];
        if table.with_classifier {
            cells.push(cell(c.classifier().unwrap_or_default()));
        }
        cells.push(cell(&c.kind));
        if table.with_optional {
            cells.push(if row.optional { "Yes" } else { "No" }.to_string());
        }
        table_row(out, &cells);
    }
    out.push('\n');
}

fn tree_list(out: &mut String, node: &TreeNode, depth: usize) {
    let _ = writeln!(
        out,
        "{}- <a id=\"{}\"></a>[{}](#{}) ({})",
        "  ".repeat(depth),
        node.toggle_id,
        cell(&node.artifact_id),
        node.detail_id,
        node.scope
    );
    for child in &node.children {
        tree_list(out, child, depth + 1);
    }
}

fn node_panel(out: &mut String, node: &TreeNode) {
    match &node.details {
        NodeDetails::Project {
            name,
            description,
            url,
            licenses,
        } => {
            let _ = writeln!(out, "#### <a id=\"{}\"></a>{}\n", node.detail_id, cell(name));
            let _ = writeln!(
                out,
                "- **Description**: {}",
                description.as_deref().map(cell).unwrap_or_else(|| NO_DESCRIPTION.to_string())
            );
            if let Some(url) = url {
                let _ = writeln!(out, "- **URL**: {}", link(url, url));
            }
            let license_text = if licenses.is_empty() {
                "No license is defined for this project.".to_string()
            } else {
                licenses
                    .iter()
                    .map(license_link)
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            let _ = writeln!(out, "- **Project License**: {license_text}\n");
        }
        NodeDetails::System { file } => {
            let _ = writeln!(
                out,
                "#### <a id=\"{}\"></a>{}\n",
                node.detail_id,
                cell(&node.artifact_id)
            );
            let _ = writeln!(out, "- **Description**: {NO_DESCRIPTION}");
            if let Some(file) = file {
                let _ = writeln!(out, "- **File**: `{file}`");
            }
            out.push('\n');
        }
        NodeDetails::Unavailable => {
            let _ = writeln!(
                out,
                "#### <a id=\"{}\"></a>{}\n",
                node.detail_id,
                cell(&node.artifact_id)
            );
            out.push_str("- Project information is unavailable.\n\n");
        }
    }
}

fn license_link(license: &LicenseEntry) -> String {
    let name = if license.name.is_empty() {
        UNNAMED_LICENSE
    } else {
        license.name.as_str()
    };
    match &license.url {
        Some(url) => link(name, url),
        None => cell(name),
    }
}

fn licenses(out: &mut String, groups: &[LicenseGroup]) {
    for group in groups {
        let label = match &group.license {
            LicenseKey::Named(name) if name.is_empty() => UNNAMED_LICENSE,
            LicenseKey::Named(name) => name.as_str(),
            LicenseKey::Undeclared => UNKNOWN_LICENSE,
        };
        let projects: Vec<String> = group.projects.iter().map(|p| cell(p)).collect();
        let _ = writeln!(out, "**{}**: {}\n", cell(label), projects.join(", "));
    }
}

fn file_details(out: &mut String, details: &FileDetails, opts: &FormatOptions) {
    let mut header = vec![
        "Filename", "Size", "Entries", "Classes", "Packages", "JDK Rev", "Debug",
    ];
    if details.with_sealed {
        header.push("Sealed");
    }
    table_header(out, &header);

    let width = header.len();
    for row in &details.rows {
        let mut cells = match row {
            FileRow::Archive {
                file_name,
                size,
                entries,
                classes,
                packages,
                jdk_revision,
                debug,
                sealed,
            } => {
                let mut cells = vec![
                    cell(file_name),
                    format_size(*size, opts),
                    format_count(*entries, opts),
                    format_count(*classes, opts),
                    format_count(*packages, opts),
                    jdk_revision.as_deref().map(cell).unwrap_or_default(),
                    if *debug { "debug" } else { "release" }.to_string(),
                ];
                if details.with_sealed {
                    cells.push(if *sealed { "sealed" } else { "-" }.to_string());
                }
                cells
            }
            FileRow::Failed {
                artifact_id,
                path,
                message,
            } => vec![cell(artifact_id), cell(path), cell(message)],
            FileRow::Plain { file_name, size } => {
                vec![cell(file_name), format_size(*size, opts)]
            }
        };
        cells.resize(width, String::new());
        table_row(out, &cells);
    }

    let t = &details.totals;
    let mut totals = vec![
        format!("**Total**: {}", format_totals(&t.artifacts, opts)),
        format_size_totals(&t.size, opts),
        format_totals(&t.entries, opts),
        format_totals(&t.classes, opts),
        format_totals(&t.packages, opts),
        format_revision(t.highest_jdk, opts),
        format_totals(&t.debug, opts),
    ];
    if details.with_sealed {
        totals.push(format_totals(&t.sealed, opts));
    }
    table_row(out, &totals);
    out.push('\n');
}

fn repository_locations(out: &mut String, locations: &RepositoryLocations, opts: &FormatOptions) {
    let mut header = vec!["Repo ID", "URL", "Release", "Snapshot"];
    if locations.with_blacklisted {
        header.push("Blacklisted");
    }
    table_header(out, &header);
    for repo in &locations.repositories {
        let mut cells = vec![
            cell(&repo.id),
            cell(&repo.url),
            yes_or_dash(repo.releases),
            yes_or_dash(repo.snapshots),
        ];
        if locations.with_blacklisted {
            cells.push(yes_or_dash(repo.blacklisted));
        }
        table_row(out, &cells);
    }
    out.push('\n');

    out.push_str("Repository locations for each of the Dependencies.\n\n");
    matrix(out, &locations.matrix, opts);
}

fn matrix(out: &mut String, matrix: &AvailabilityMatrix, opts: &FormatOptions) {
    let mut header = vec!["Artifact"];
    header.extend(matrix.repository_ids.iter().map(String::as_str));
    table_header(out, &header);

    for row in &matrix.rows {
        let mut cells = vec![cell(&row.artifact_id)];
        cells.extend(row.cells.iter().map(|c| match c {
            Availability::Found {
                url: Some(url), ..
            } => link("found", url),
            Availability::Found { url: None, .. } => "found".to_string(),
            Availability::NotFound | Availability::NotApplicable => "-".to_string(),
            Availability::Blacklisted => "blacklisted".to_string(),
        }));
        table_row(out, &cells);
    }

    let mut totals = vec![format!(
        "**Total**: {}",
        format_totals(&matrix.artifacts, opts)
    )];
    totals.extend(matrix.found.iter().map(|n| format_count(*n, opts)));
    table_row(out, &totals);
    out.push('\n');
}

fn yes_or_dash(flag: bool) -> String {
    if flag { "Yes" } else { "-" }.to_string()
}

fn table_header(out: &mut String, columns: &[&str]) {
    let _ = writeln!(out, "| {} |", columns.join(" | "));
    let _ = writeln!(out, "|{}", "---|".repeat(columns.len()));
}

fn table_row(out: &mut String, cells: &[String]) {
    let _ = writeln!(out, "| {} |", cells.join(" | "));
}

/// Escape text for a table cell.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

fn link(text: &str, url: &str) -> String {
    format!("[{}]({})", cell(text), url.replace(' ', "%20"))
}
