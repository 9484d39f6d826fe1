//! Remote repository access over blocking `reqwest`. Nothing is downloaded:
//! reachability uses `GET` on the repository root, existence uses `HEAD`.

use anyhow::Context;
use depreport_domain::error::ProbeError;
use depreport_domain::model::Repository;
use depreport_domain::ports::{ArtifactLocator, RepositoryProbe};
use depreport_types::Artifact;
use reqwest::Url;
use reqwest::blocking::Client;
use std::time::Duration;

/// Shared HTTP client for probing and locating.
pub fn http_client(timeout: Duration) -> anyhow::Result<Client> {
    Client::builder()
        .user_agent(concat!("depreport/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .context("build http client")
}

#[derive(Clone, Debug)]
pub struct HttpRepositoryProbe {
    client: Client,
}

impl HttpRepositoryProbe {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl RepositoryProbe for HttpRepositoryProbe {
    fn reachable(&self, url: &str) -> Result<bool, ProbeError> {
        let parsed = Url::parse(url).map_err(|_| ProbeError::MalformedUrl(url.to_string()))?;
        match self.client.get(parsed).send() {
            Ok(response) => {
                let status = response.status();
                tracing::debug!(url, status = %status, "repository probe answered");
                // 4xx/5xx: the server is up but serves nothing at this root.
                Ok(!(status.is_client_error() || status.is_server_error()))
            }
            Err(err) => Err(ProbeError::Unreachable {
                url: url.to_string(),
                reason: err.to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct HttpArtifactLocator {
    client: Client,
}

impl HttpArtifactLocator {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl ArtifactLocator for HttpArtifactLocator {
    fn exists_in(&self, repository: &Repository, artifact: &Artifact) -> bool {
        let Some(url) = self.url_for(repository, artifact) else {
            return false;
        };
        match self.client.head(&url).send() {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                tracing::debug!(url = %url, error = %err, "existence check failed");
                false
            }
        }
    }

    fn url_for(&self, repository: &Repository, artifact: &Artifact) -> Option<String> {
        let url = format!(
            "{}/{}",
            repository.url.trim_end_matches('/'),
            maven2_path(artifact)
        );
        match Url::parse(&url) {
            Ok(_) => Some(url),
            Err(err) => {
                tracing::debug!(repository = %repository.id, url = %url, error = %err, "malformed artifact url");
                None
            }
        }
    }
}

/// Maven 2 layout path of `artifact`, relative to the repository root.
pub fn maven2_path(artifact: &Artifact) -> String {
    let c = &artifact.coordinates;
    let file = match c.classifier() {
        Some(classifier) => format!(
            "{}-{}-{}.{}",
            c.artifact_id,
            c.version,
            classifier,
            extension(&c.kind)
        ),
        None => format!("{}-{}.{}", c.artifact_id, c.version, extension(&c.kind)),
    };
    format!(
        "{}/{}/{}/{}",
        c.group_id.replace('.', "/"),
        c.artifact_id,
        c.version,
        file
    )
}

fn extension(kind: &str) -> &str {
    match kind {
        "ejb" | "ejb-client" | "test-jar" | "maven-plugin" | "java-source" | "javadoc" => "jar",
        other => other,
    }
}
