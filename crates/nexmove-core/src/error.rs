//! Core error types

use thiserror::Error;

/// Problems with the caller-supplied parameters of a relocation.
///
/// Raised before any step runs, so nothing has been fetched, published or
/// deleted when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Missing required parameter: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid repository URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid artifact coordinate '{input}': expected groupId:artifactId:version[:packaging]")]
    InvalidCoordinate { input: String },

    #[error("Could not resolve a version for helper tool {tool}")]
    UnresolvedTool { tool: String },
}

pub type Result<T> = std::result::Result<T, ConfigurationError>;
