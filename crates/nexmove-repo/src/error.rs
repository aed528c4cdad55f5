//! Error types for relocation steps

use std::path::PathBuf;
use std::time::Duration;

use nexmove_core::{ArtifactCoordinate, ConfigurationError, Step};
use thiserror::Error;

// ============ Transport ============

/// Failure below the HTTP status level (no response to classify)
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out after {timeout}")]
    Timeout { timeout: humantime::Duration },

    #[error("connection failed: {message}")]
    Connect { message: String },

    #[error("{message}")]
    Other { message: String },
}

impl TransportError {
    /// Classify a reqwest error, reporting the configured timeout on expiry
    pub(crate) fn from_reqwest(e: reqwest::Error, timeout: Duration) -> Self {
        if e.is_timeout() {
            TransportError::Timeout {
                timeout: timeout.into(),
            }
        } else if e.is_connect() {
            TransportError::Connect {
                message: e.to_string(),
            }
        } else {
            TransportError::Other {
                message: e.to_string(),
            }
        }
    }
}

// ============ Fetch ============

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{url} not found in source repository")]
    NotFound { url: String },

    #[error("Access denied to {url} (HTTP {status})")]
    Unauthorized { url: String, status: u16 },

    #[error("Unexpected HTTP {status} while fetching {url}")]
    Unexpected { url: String, status: u16 },

    #[error("Cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Fetching {url} failed: {source}")]
    Transport { url: String, source: TransportError },

    #[error("{tool} failed: {message}")]
    Tool { tool: String, message: String },
}

// ============ Publish ============

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Authentication failed uploading to {url} (HTTP {status})")]
    Unauthorized { url: String, status: u16 },

    #[error("Target repository not found: {url}")]
    RepositoryNotFound { url: String },

    #[error("Upload to {url} rejected (HTTP {status}); the version may already exist and redeploy is disabled")]
    Conflict { url: String, status: u16 },

    #[error("Unexpected HTTP {status} while uploading {url}")]
    Unexpected { url: String, status: u16 },

    #[error("Cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Uploading {url} failed: {source}")]
    Transport { url: String, source: TransportError },

    #[error("{tool} failed: {message}")]
    Tool { tool: String, message: String },
}

// ============ Credentials ============

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("No server with id '{repository_id}' in settings")]
    NotFound { repository_id: String },

    #[error("Password for server '{repository_id}' references unset environment variable {variable}")]
    Unresolvable {
        repository_id: String,
        variable: String,
    },
}

// ============ Delete ============

#[derive(Debug, Error)]
pub enum DeleteError {
    #[error("Invalid username or password while accessing repository {repository_id}")]
    Unauthorized { repository_id: String },

    #[error("The artifact was not deleted - status code is: {0}")]
    Unexpected(u16),

    #[error("DELETE {url} failed: {source}")]
    Transport { url: String, source: TransportError },
}

// ============ Settings ============

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Cannot read settings {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid settings {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Cannot write settings {}: {message}", .path.display())]
    Write { path: PathBuf, message: String },
}

// ============ Relocation ============

/// First failure of a relocation run, tagged with the step and coordinate
#[derive(Debug, Error)]
pub enum RelocationError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Fetch step failed for {coordinate}: {source}")]
    Fetch {
        coordinate: ArtifactCoordinate,
        source: FetchError,
    },

    #[error("Publish step failed for {coordinate}: {source}")]
    Publish {
        coordinate: ArtifactCoordinate,
        source: PublishError,
    },

    #[error("Delete step failed for {coordinate}: {source}")]
    Credential {
        coordinate: ArtifactCoordinate,
        source: CredentialError,
    },

    #[error("Delete step failed for {coordinate}: {source}")]
    Delete {
        coordinate: ArtifactCoordinate,
        source: DeleteError,
    },

    #[error("Relocation of {coordinate} cancelled before the {before} step")]
    Cancelled {
        coordinate: ArtifactCoordinate,
        before: Step,
    },
}

impl RelocationError {
    /// The step that failed, if the failure belongs to one
    pub fn step(&self) -> Option<Step> {
        match self {
            RelocationError::Configuration(_) => None,
            RelocationError::Fetch { .. } => Some(Step::Fetch),
            RelocationError::Publish { .. } => Some(Step::Publish),
            RelocationError::Credential { .. } | RelocationError::Delete { .. } => {
                Some(Step::Delete)
            }
            RelocationError::Cancelled { before, .. } => Some(*before),
        }
    }
}
