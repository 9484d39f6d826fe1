//! Developer tasks (schema generation, conformance checks).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use schemars::schema_for;
use std::fs;
use std::path::PathBuf;

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or(manifest_dir)
    } else {
        manifest_dir
    }
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(depreport_types::ReportEnvelope)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(depreport_settings::DepreportConfigV1)
}

fn generate_snapshot_schema() -> schemars::Schema {
    schema_for!(depreport_repo::SnapshotV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "depreport.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "depreport.config.v1.json",
            generate: generate_config_schema,
        },
        SchemaSpec {
            filename: "depreport.snapshot.v1.json",
            generate: generate_snapshot_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

/// Emit schemas to the schemas/ directory.
fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Validate that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {}", name);
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {}", name);
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

/// Run the built `depreport` binary on the sample snapshot and validate its output against the
/// generated report schema. Two runs must agree once timestamps are normalized.
fn conform() -> anyhow::Result<()> {
    let schema = serde_json::to_value(generate_report_schema()).context("Failed to encode schema")?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| anyhow::anyhow!("Failed to compile report schema: {}", e))?;
    println!("✓ depreport.report.v1 schema compiles");

    let bin = project_root().join("target").join("debug").join("depreport");
    #[cfg(target_os = "windows")]
    let bin = bin.with_extension("exe");
    if !bin.exists() {
        bail!(
            "depreport binary not found at {}.\n\
            Run `cargo build -p depreport-cli` first.",
            bin.display()
        );
    }

    let temp = tempfile::tempdir().context("Failed to create temp dir")?;
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
        .map_err(|p| anyhow::anyhow!("temp dir is not UTF-8: {}", p.display()))?;
    let snapshot = depreport_test_util::write_sample_snapshot(&root)?;

    let mut reports = Vec::new();
    for name in ["first.json", "second.json"] {
        let out = root.join(name);
        let output = std::process::Command::new(&bin)
            .arg("--config")
            .arg(root.join("depreport.toml"))
            .arg("--no-locations")
            .arg("report")
            .arg("--snapshot")
            .arg(&snapshot)
            .arg("--report-out")
            .arg(&out)
            .output()
            .context("Failed to run depreport")?;
        if !output.status.success() {
            bail!(
                "depreport exited with {:?}:\n{}",
                output.status.code(),
                String::from_utf8_lossy(&output.stderr)
            );
        }

        let text = fs::read_to_string(&out).with_context(|| format!("Failed to read {out}"))?;
        let report: serde_json::Value =
            serde_json::from_str(&text).with_context(|| format!("Failed to parse {out}"))?;
        let errors: Vec<String> = validator.iter_errors(&report).map(|e| e.to_string()).collect();
        if !errors.is_empty() {
            for err in &errors {
                eprintln!("  - {}", err);
            }
            bail!("{name} does not match the report schema ({} errors)", errors.len());
        }
        println!("✓ {name} matches depreport.report.v1");
        reports.push(depreport_test_util::normalize_nondeterministic(report));
    }

    if reports[0] != reports[1] {
        bail!("reports differ beyond timestamps");
    }
    println!("✓ output is deterministic");
    Ok(())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Validate depreport output against the report schema");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
