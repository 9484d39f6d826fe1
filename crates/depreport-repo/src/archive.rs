//! Java archive inspection over `zip`.

use depreport_domain::error::InspectError;
use depreport_domain::model::JarMetadata;
use depreport_domain::ports::JarInspector;
use depreport_types::{Artifact, ArtifactFile};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{Read, Seek};

const CLASS_MAGIC: [u8; 4] = [0xCA, 0xFE, 0xBA, 0xBE];
const DEBUG_ATTRIBUTE: &[u8] = b"LocalVariableTable";
const MANIFEST: &str = "META-INF/MANIFEST.MF";

/// Reads archives from disk. Holds no state; safe to share across threads.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZipJarInspector;

impl JarInspector for ZipJarInspector {
    fn inspect(
        &self,
        artifact: &Artifact,
        file: &ArtifactFile,
    ) -> Result<JarMetadata, InspectError> {
        tracing::debug!(artifact = %artifact.id(), path = %file.path, "inspecting archive");
        let reader = File::open(&file.path)?;
        inspect_archive(reader)
    }
}

/// Inspect any seekable zip stream.
pub fn inspect_archive<R: Read + Seek>(reader: R) -> Result<JarMetadata, InspectError> {
    let mut zip = zip::ZipArchive::new(reader).map_err(invalid)?;

    let mut meta = JarMetadata {
        entries: zip.len() as u64,
        ..JarMetadata::default()
    };
    let mut packages = BTreeSet::new();
    let mut highest_major: Option<u16> = None;
    let mut buf = Vec::new();

    for i in 0..zip.len() {
        let mut entry = zip.by_index(i).map_err(invalid)?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();

        if name.eq_ignore_ascii_case(MANIFEST) {
            let mut text = String::new();
            entry.read_to_string(&mut text)?;
            meta.sealed = manifest_is_sealed(&text);
            continue;
        }

        if !name.ends_with(".class") {
            continue;
        }
        meta.classes += 1;
        let package = name.rsplit_once('/').map(|(dir, _)| dir).unwrap_or_default();
        packages.insert(package.replace('/', "."));

        buf.clear();
        entry.read_to_end(&mut buf)?;
        if let Some(major) = class_major_version(&buf) {
            highest_major = highest_major.max(Some(major));
        }
        if !meta.debug && contains(&buf, DEBUG_ATTRIBUTE) {
            meta.debug = true;
        }
    }

    meta.packages = packages.len() as u64;
    meta.jdk_revision = highest_major.and_then(jdk_revision);
    Ok(meta)
}

fn invalid(err: zip::result::ZipError) -> InspectError {
    InspectError::Invalid(err.to_string())
}

fn class_major_version(bytes: &[u8]) -> Option<u16> {
    if bytes.len() < 8 || bytes[..4] != CLASS_MAGIC {
        return None;
    }
    Some(u16::from_be_bytes([bytes[6], bytes[7]]))
}

/// Java release a class file major version targets.
pub fn jdk_revision(major: u16) -> Option<String> {
    match major {
        45..=52 => Some(format!("1.{}", major - 44)),
        53.. => Some((major - 44).to_string()),
        _ => None,
    }
}

/// `Sealed: true` in the manifest's main section.
fn manifest_is_sealed(text: &str) -> bool {
    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            // End of the main section.
            break;
        }
        if let Some((key, value)) = line.split_once(':')
            && key.trim().eq_ignore_ascii_case("Sealed")
        {
            return value.trim().eq_ignore_ascii_case("true");
        }
    }
    false
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
