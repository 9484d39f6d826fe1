//! Shared test utilities for the depreport workspace.
//!
//! This crate exists because `xtask` needs `normalize_nondeterministic` at
//! runtime (not behind `#[cfg(test)]`), and the CLI integration tests share
//! the fixture builders below.

use anyhow::Context;
use camino::Utf8Path;
use serde_json::Value;
use std::io::Write;

/// Normalize non-deterministic JSON fields for golden-file comparison.
///
/// 1. **Root-only**: `tool.version` is replaced with `"__VERSION__"` only
///    when the *root* object looks like a report envelope (has `schema`,
///    `tool` and `sections`).
///
/// 2. **Recursive**: `started_at` and `finished_at` are normalized at any
///    depth because their placeholder values cannot collide with real data.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_envelope =
            obj.contains_key("schema") && obj.contains_key("tool") && obj.contains_key("sections");
        if is_envelope
            && let Some(tool) = obj.get_mut("tool")
            && let Some(tool_obj) = tool.as_object_mut()
            && tool_obj.contains_key("name")
            && tool_obj.contains_key("version")
        {
            tool_obj.insert(
                "version".to_string(),
                Value::String("__VERSION__".to_string()),
            );
        }
    }
    normalize_timestamps_recursive(&mut value);
    value
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "finished_at"] {
                if map.contains_key(key) {
                    map.insert(key.to_string(), Value::String("__TIMESTAMP__".to_string()));
                }
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}

/// A Java archive with a sealed manifest and one class per `(path, major)` entry.
pub fn write_jar(path: &Utf8Path, classes: &[(&str, u16)]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    let file = std::fs::File::create(path).with_context(|| format!("create {path}"))?;
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored);

    writer.start_file("META-INF/MANIFEST.MF", options)?;
    writer.write_all(b"Manifest-Version: 1.0\r\nSealed: true\r\n\r\n")?;
    for (name, major) in classes {
        writer.start_file(*name, options)?;
        let mut bytes = vec![0xCA, 0xFE, 0xBA, 0xBE, 0, 0];
        bytes.extend_from_slice(&major.to_be_bytes());
        writer.write_all(&bytes)?;
    }
    writer.finish().context("finish jar")?;
    Ok(())
}

/// Resolution snapshot of a small project: two direct dependencies, one transitive, one
/// archive (`repo/lib-2.0.jar`, relative to the snapshot) and a test-scoped artifact with no
/// file. The only repository points at a reserved `.invalid` host.
pub const SAMPLE_SNAPSHOT: &str = r#"{
  "schema": "depreport.snapshot.v1",
  "project": { "group_id": "org.acme", "artifact_id": "app", "version": "1.0", "name": "Acme App" },
  "repositories": [ { "id": "central", "url": "https://repo.example.invalid/maven2" } ],
  "direct": [
    { "group_id": "org.acme", "artifact_id": "lib", "version": "2.0" },
    { "group_id": "junit", "artifact_id": "junit", "version": "4.13", "scope": "test" }
  ],
  "artifacts": [
    { "group_id": "org.acme", "artifact_id": "lib", "version": "2.0", "file": "repo/lib-2.0.jar" },
    { "group_id": "org.acme", "artifact_id": "util", "version": "1.1" },
    { "group_id": "junit", "artifact_id": "junit", "version": "4.13", "scope": "test" }
  ],
  "tree": {
    "artifact": { "group_id": "org.acme", "artifact_id": "app", "version": "1.0" },
    "children": [
      {
        "artifact": { "group_id": "org.acme", "artifact_id": "lib", "version": "2.0" },
        "children": [
          { "artifact": { "group_id": "org.acme", "artifact_id": "util", "version": "1.1" } }
        ]
      },
      { "artifact": { "group_id": "junit", "artifact_id": "junit", "version": "4.13", "scope": "test" } }
    ]
  },
  "projects": {
    "org.acme:app:1.0": { "name": "Acme App" },
    "org.acme:lib:2.0": {
      "name": "Acme Lib",
      "description": "Core library",
      "licenses": [ { "name": "Apache-2.0", "url": "https://www.apache.org/licenses/LICENSE-2.0" } ]
    },
    "org.acme:util:1.1": { "name": "Acme Util", "licenses": [ { "name": "Apache-2.0" } ] },
    "junit:junit:4.13": { "name": "JUnit", "licenses": [ { "name": "EPL-1.0" } ] }
  }
}"#;

/// Write [`SAMPLE_SNAPSHOT`] and its archive under `root`; returns the snapshot path.
pub fn write_sample_snapshot(root: &Utf8Path) -> anyhow::Result<camino::Utf8PathBuf> {
    write_jar(
        &root.join("repo/lib-2.0.jar"),
        &[("org/acme/Lib.class", 52), ("org/acme/impl/LibImpl.class", 52)],
    )?;
    let path = root.join("deps.json");
    std::fs::write(&path, SAMPLE_SNAPSHOT).with_context(|| format!("write {path}"))?;
    Ok(path)
}
