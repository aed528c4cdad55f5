//! Relocation plan: what to move, from where, to where, and which steps to run

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::coordinate::ArtifactCoordinate;
use crate::endpoint::RepositoryEndpoint;
use crate::error::{ConfigurationError, Result};

/// One step of a relocation, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Fetch,
    Publish,
    Delete,
}

impl Step {
    /// All steps in the order they run
    pub const ALL: [Step; 3] = [Step::Fetch, Step::Publish, Step::Delete];
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Fetch => "fetch",
            Self::Publish => "publish",
            Self::Delete => "delete",
        };
        write!(f, "{}", s)
    }
}

/// Raw invocation parameters, as supplied by the CLI or another host
#[derive(Debug, Clone, Default)]
pub struct RelocationParams {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub packaging: String,

    /// Root URL of the staging repository manager
    pub staging_url: String,

    /// Root URL of the target repository manager (defaults to `staging_url`)
    pub target_url: Option<String>,

    pub staging_repository_id: String,
    pub target_repository_id: String,

    pub skip_fetch: bool,
    pub skip_publish: bool,
    pub skip_delete: bool,
}

/// Local files the artifact passes through between fetch and publish
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScratchPaths {
    pub artifact_path: PathBuf,
    pub descriptor_path: PathBuf,
}

impl ScratchPaths {
    /// Derive `<dir>/<artifactId>-<version>.<packaging>` and `<dir>/<artifactId>-<version>.pom`
    pub fn derive(build_dir: &Path, coordinate: &ArtifactCoordinate) -> Self {
        Self {
            artifact_path: build_dir.join(coordinate.artifact_file_name()),
            descriptor_path: build_dir.join(coordinate.descriptor_file_name()),
        }
    }
}

/// Immutable description of a single relocation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelocationPlan {
    coordinate: ArtifactCoordinate,
    source: RepositoryEndpoint,
    target: RepositoryEndpoint,
    skip_fetch: bool,
    skip_publish: bool,
    skip_delete: bool,
    scratch: ScratchPaths,
}

impl RelocationPlan {
    /// Validate parameters and build the plan.
    ///
    /// Scratch paths are rooted at `build_dir`, the host's build output directory.
    pub fn from_params(params: RelocationParams, build_dir: &Path) -> Result<Self> {
        let coordinate = ArtifactCoordinate::new(
            params.group_id,
            params.artifact_id,
            params.version,
            params.packaging,
        )?;

        require("stagingRepositoryUrl", &params.staging_url)?;
        require("stagingRepositoryId", &params.staging_repository_id)?;
        require("targetRepositoryId", &params.target_repository_id)?;

        let source = RepositoryEndpoint::new(params.staging_url, params.staging_repository_id)?;

        let target = match params.target_url.filter(|url| !url.trim().is_empty()) {
            Some(url) => RepositoryEndpoint::new(url, params.target_repository_id)?,
            None => source.with_repository_id(params.target_repository_id)?,
        };

        let scratch = ScratchPaths::derive(build_dir, &coordinate);

        Ok(Self {
            coordinate,
            source,
            target,
            skip_fetch: params.skip_fetch,
            skip_publish: params.skip_publish,
            skip_delete: params.skip_delete,
            scratch,
        })
    }

    pub fn coordinate(&self) -> &ArtifactCoordinate {
        &self.coordinate
    }

    /// Staging repository the artifact is moved from
    pub fn source(&self) -> &RepositoryEndpoint {
        &self.source
    }

    /// Repository the artifact is moved to
    pub fn target(&self) -> &RepositoryEndpoint {
        &self.target
    }

    pub fn scratch(&self) -> &ScratchPaths {
        &self.scratch
    }

    /// Whether a step is enabled for this run
    pub fn runs(&self, step: Step) -> bool {
        match step {
            Step::Fetch => !self.skip_fetch,
            Step::Publish => !self.skip_publish,
            Step::Delete => !self.skip_delete,
        }
    }
}

fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConfigurationError::MissingField { field });
    }
    Ok(())
}
