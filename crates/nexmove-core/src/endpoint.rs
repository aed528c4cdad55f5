//! Repository endpoints

use serde::{Deserialize, Serialize};
use url::Url;

use crate::coordinate::ArtifactCoordinate;
use crate::error::{ConfigurationError, Result};

/// Path under which Nexus serves hosted repository content
pub const NEXUS_CONTENT_PATH: &str = "/nexus/content/repositories/";

/// A repository manager URL plus the id of one repository on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryEndpoint {
    base_url: String,
    repository_id: String,
}

impl RepositoryEndpoint {
    /// Create an endpoint. The base URL must be http(s); trailing slashes are dropped.
    pub fn new(base_url: impl Into<String>, repository_id: impl Into<String>) -> Result<Self> {
        let base_url = normalize_base_url(&base_url.into())?;
        let repository_id = repository_id.into();
        if repository_id.trim().is_empty() {
            return Err(ConfigurationError::MissingField {
                field: "repositoryId",
            });
        }

        Ok(Self {
            base_url,
            repository_id,
        })
    }

    /// Base URL without trailing slash, e.g. `http://nexus.local:8081`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn repository_id(&self) -> &str {
        &self.repository_id
    }

    /// Same server, different repository
    pub fn with_repository_id(&self, repository_id: impl Into<String>) -> Result<Self> {
        Self::new(self.base_url.clone(), repository_id)
    }

    /// `{base}/nexus/content/repositories/{repositoryId}`
    pub fn content_url(&self) -> String {
        format!(
            "{}{}{}",
            self.base_url, NEXUS_CONTENT_PATH, self.repository_id
        )
    }

    /// Directory URL of one artifact version, with trailing slash.
    ///
    /// Nexus matches this path literally, so the slash after the version matters.
    pub fn version_url(&self, coordinate: &ArtifactCoordinate) -> String {
        format!("{}/{}/", self.content_url(), coordinate.version_path())
    }

    /// URL of a single file in the version directory
    pub fn file_url(&self, coordinate: &ArtifactCoordinate, file_name: &str) -> String {
        format!("{}{}", self.version_url(coordinate), file_name)
    }
}

impl std::fmt::Display for RepositoryEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.repository_id, self.base_url)
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigurationError::MissingField { field: "baseUrl" });
    }

    let parsed = Url::parse(trimmed).map_err(|e| ConfigurationError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(ConfigurationError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}', expected http or https", other),
        }),
    }
}
