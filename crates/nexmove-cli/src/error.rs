//! CLI error types with exit code handling
//!
//! Every failure is mapped to a diagnostic naming the failed step and
//! coordinate, plus a hint on how to resume.

use miette::Diagnostic;
use thiserror::Error;

use nexmove_core::{ConfigurationError, Step};
use nexmove_repo::{CredentialError, DeleteError, RelocationError, SettingsError};

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// Missing or invalid parameters, settings or tool versions
    #[error("Configuration error: {message}")]
    #[diagnostic(code(nexmove::cli::config))]
    Configuration {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// One of the relocation steps failed
    #[error("{message}")]
    #[diagnostic(code(nexmove::cli::step))]
    Step {
        step: Step,
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Interrupted at a step boundary
    #[error("{message}")]
    #[diagnostic(code(nexmove::cli::cancelled))]
    Cancelled {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Internal error (runtime, unexpected failure)
    #[error("Internal error: {message}")]
    #[diagnostic(code(nexmove::cli::internal))]
    Internal { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Configuration { .. } => exit_codes::CONFIG_ERROR,
            CliError::Step { step, .. } => match step {
                Step::Fetch => exit_codes::FETCH_ERROR,
                Step::Publish => exit_codes::PUBLISH_ERROR,
                Step::Delete => exit_codes::DELETE_ERROR,
            },
            CliError::Cancelled { .. } => exit_codes::CANCELLED,
            CliError::Internal { .. } => exit_codes::ERROR,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a configuration error with help text
    pub fn config_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            help: Some(help.into()),
        }
    }
}

impl From<ConfigurationError> for CliError {
    fn from(err: ConfigurationError) -> Self {
        let help = match &err {
            ConfigurationError::UnresolvedTool { .. } => Some(
                "Pin the plugin under `tools:` in the settings file, or use --transport http"
                    .to_string(),
            ),
            _ => None,
        };
        CliError::Configuration {
            message: err.to_string(),
            help,
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        CliError::Configuration {
            message: err.to_string(),
            help: None,
        }
    }
}

impl From<RelocationError> for CliError {
    fn from(err: RelocationError) -> Self {
        let message = err.to_string();
        let help = resume_hint(&err);

        match err {
            RelocationError::Configuration(e) => e.into(),
            RelocationError::Cancelled { .. } => CliError::Cancelled { message, help },
            RelocationError::Fetch { .. } => CliError::Step {
                step: Step::Fetch,
                message,
                help,
            },
            RelocationError::Publish { .. } => CliError::Step {
                step: Step::Publish,
                message,
                help,
            },
            RelocationError::Credential { .. } | RelocationError::Delete { .. } => {
                CliError::Step {
                    step: Step::Delete,
                    message,
                    help,
                }
            }
        }
    }
}

/// Which flags to pass so a re-run only redoes what is still missing
fn resume_hint(err: &RelocationError) -> Option<String> {
    match err {
        RelocationError::Credential {
            source: CredentialError::NotFound { repository_id },
            ..
        } => Some(format!(
            "Add a server with id '{}' to the settings file (see `nexmove servers`), \
             then re-run with --skip-fetch --skip-publish",
            repository_id
        )),
        RelocationError::Credential { .. } => {
            Some("Fix the credentials, then re-run with --skip-fetch --skip-publish".to_string())
        }
        RelocationError::Delete {
            source: DeleteError::Unauthorized { .. },
            ..
        } => Some(
            "The artifact is now in both repositories. Check the password, then re-run \
             with --skip-fetch --skip-publish"
                .to_string(),
        ),
        RelocationError::Delete { .. } => Some(
            "The artifact is now in both repositories. Re-run with --skip-fetch --skip-publish \
             to retry the delete"
                .to_string(),
        ),
        RelocationError::Publish { .. } => Some(
            "The artifact was fetched. Re-run with --skip-fetch to retry the publish".to_string(),
        ),
        RelocationError::Cancelled { before, .. } => Some(format!(
            "Steps before {} completed; skip them when re-running",
            before
        )),
        RelocationError::Fetch { .. } | RelocationError::Configuration(_) => None,
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
