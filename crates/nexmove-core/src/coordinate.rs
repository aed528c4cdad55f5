//! Artifact coordinates

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{ConfigurationError, Result};

/// Packaging of the descriptor that accompanies every artifact
pub const DESCRIPTOR_PACKAGING: &str = "pom";

/// Packaging assumed when a short coordinate omits it
pub const DEFAULT_PACKAGING: &str = "jar";

/// Identifies a single artifact: `groupId:artifactId:version:packaging`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawCoordinate")]
pub struct ArtifactCoordinate {
    group_id: String,
    artifact_id: String,
    version: String,
    packaging: String,
}

/// Unvalidated serde shape; deserialization goes through [`ArtifactCoordinate::new`]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCoordinate {
    group_id: String,
    artifact_id: String,
    version: String,
    packaging: String,
}

impl TryFrom<RawCoordinate> for ArtifactCoordinate {
    type Error = ConfigurationError;

    fn try_from(raw: RawCoordinate) -> Result<Self> {
        Self::new(raw.group_id, raw.artifact_id, raw.version, raw.packaging)
    }
}

impl ArtifactCoordinate {
    /// Create a coordinate, rejecting empty fields
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
        packaging: impl Into<String>,
    ) -> Result<Self> {
        let coordinate = Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            packaging: packaging.into(),
        };

        let fields = [
            ("groupId", &coordinate.group_id),
            ("artifactId", &coordinate.artifact_id),
            ("version", &coordinate.version),
            ("packaging", &coordinate.packaging),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(ConfigurationError::MissingField { field });
            }
        }

        Ok(coordinate)
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn packaging(&self) -> &str {
        &self.packaging
    }

    /// Group id as a repository path.
    ///
    /// Every `.` becomes `/`, including leading, trailing and repeated dots.
    pub fn group_path(&self) -> String {
        group_path(&self.group_id)
    }

    /// `<artifactId>-<version>.<packaging>`
    pub fn artifact_file_name(&self) -> String {
        self.file_name(&self.packaging)
    }

    /// `<artifactId>-<version>.pom`
    pub fn descriptor_file_name(&self) -> String {
        self.file_name(DESCRIPTOR_PACKAGING)
    }

    /// `<artifactId>-<version>.<extension>`
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}-{}.{}", self.artifact_id, self.version, extension)
    }

    /// Repository-relative directory holding this version:
    /// `<group path>/<artifactId>/<version>`
    pub fn version_path(&self) -> String {
        format!("{}/{}/{}", self.group_path(), self.artifact_id, self.version)
    }
}

/// Convert a dotted group id into a path by literal replacement
pub fn group_path(group_id: &str) -> String {
    group_id.replace('.', "/")
}

impl std::fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.group_id, self.artifact_id, self.version, self.packaging
        )
    }
}

impl FromStr for ArtifactCoordinate {
    type Err = ConfigurationError;

    /// Parse `groupId:artifactId:version[:packaging]`
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ConfigurationError::InvalidCoordinate {
            input: s.to_string(),
        };

        let parts: Vec<&str> = s.split(':').collect();
        let (group_id, artifact_id, version, packaging) = match parts.as_slice() {
            [g, a, v] => (*g, *a, *v, DEFAULT_PACKAGING),
            [g, a, v, p] => (*g, *a, *v, *p),
            _ => return Err(invalid()),
        };

        Self::new(group_id, artifact_id, version, packaging).map_err(|_| invalid())
    }
}
