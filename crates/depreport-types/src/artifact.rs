use camino::Utf8PathBuf;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Declared usage context of a dependency.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    Compile,
    Runtime,
    Test,
    Provided,
    System,
}

impl Scope {
    /// Order in which scope tables are emitted.
    pub const TABLE_ORDER: [Scope; 5] = [
        Scope::Compile,
        Scope::Runtime,
        Scope::Test,
        Scope::Provided,
        Scope::System,
    ];

    /// Order in which subtotals appear in a rendered total.
    pub const TOTALS_ORDER: [Scope; 5] = [
        Scope::Compile,
        Scope::Test,
        Scope::Runtime,
        Scope::Provided,
        Scope::System,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Compile => "compile",
            Scope::Runtime => "runtime",
            Scope::Test => "test",
            Scope::Provided => "provided",
            Scope::System => "system",
        }
    }

    pub fn parse(v: &str) -> Option<Scope> {
        match v {
            "compile" => Some(Scope::Compile),
            "runtime" => Some(Scope::Runtime),
            "test" => Some(Scope::Test),
            "provided" => Some(Scope::Provided),
            "system" => Some(Scope::System),
            _ => None,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Artifact coordinates. Identity and natural order of an artifact.
///
/// An empty classifier is the same coordinate as no classifier.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct Coordinates {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
    #[serde(rename = "type", default = "default_type")]
    pub kind: String,
}

fn default_type() -> String {
    "jar".to_string()
}

impl Coordinates {
    pub fn new(group_id: &str, artifact_id: &str, version: &str) -> Self {
        Self {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            version: version.to_string(),
            classifier: None,
            kind: default_type(),
        }
    }

    /// Classifier, treating an empty string as absent.
    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref().filter(|c| !c.is_empty())
    }

    /// `group:artifact:type[:classifier]:version`
    pub fn id(&self) -> String {
        match self.classifier() {
            Some(c) => format!(
                "{}:{}:{}:{}:{}",
                self.group_id, self.artifact_id, self.kind, c, self.version
            ),
            None => format!(
                "{}:{}:{}:{}",
                self.group_id, self.artifact_id, self.kind, self.version
            ),
        }
    }

    /// `group:artifact:version`, the key project metadata is published under.
    pub fn project_key(&self) -> String {
        format!("{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

impl Ord for Coordinates {
    fn cmp(&self, other: &Self) -> Ordering {
        self.group_id
            .cmp(&other.group_id)
            .then_with(|| self.artifact_id.cmp(&other.artifact_id))
            .then_with(|| self.version.cmp(&other.version))
            .then_with(|| self.kind.cmp(&other.kind))
            .then_with(|| self.classifier().cmp(&other.classifier()))
    }
}

impl PartialEq for Coordinates {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Coordinates {}

impl Hash for Coordinates {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.group_id.hash(state);
        self.artifact_id.hash(state);
        self.version.hash(state);
        self.kind.hash(state);
        self.classifier().hash(state);
    }
}

impl PartialOrd for Coordinates {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

/// Resolved file of an artifact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ArtifactFile {
    #[schemars(with = "String")]
    pub path: Utf8PathBuf,
    pub size: u64,
}

impl ArtifactFile {
    pub fn file_name(&self) -> &str {
        self.path.file_name().unwrap_or(self.path.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Artifact {
    #[serde(flatten)]
    pub coordinates: Coordinates,
    #[serde(default)]
    pub scope: Scope,
    #[serde(default)]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<ArtifactFile>,
    #[serde(default)]
    pub snapshot: bool,
}

impl Artifact {
    pub fn new(coordinates: Coordinates, scope: Scope) -> Self {
        Self {
            coordinates,
            scope,
            optional: false,
            file: None,
            snapshot: false,
        }
    }

    pub fn id(&self) -> String {
        self.coordinates.id()
    }

    pub fn is_snapshot(&self) -> bool {
        self.snapshot || self.coordinates.version.ends_with("-SNAPSHOT")
    }
}
