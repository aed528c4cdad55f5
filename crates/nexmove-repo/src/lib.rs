//! nexmove Repository Plumbing
//!
//! Moves one artifact between Nexus repositories in three steps:
//!
//! - **Fetch**: download the artifact and its POM from the staging repository
//! - **Publish**: upload both into the target repository
//! - **Delete**: remove the version from the staging repository via the REST API
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use nexmove_core::{RelocationParams, RelocationPlan};
//! use nexmove_repo::{
//!     HttpFetcher, HttpPublisher, Relocator, RepositoryDeleteClient, ServerStore, Settings,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::load()?;
//! let timeout = settings.http.timeout;
//!
//! let plan = RelocationPlan::from_params(
//!     RelocationParams {
//!         group_id: "com.acme".into(),
//!         artifact_id: "widget".into(),
//!         version: "1.2.3".into(),
//!         packaging: "jar".into(),
//!         staging_url: "http://nexus.local:8081".into(),
//!         staging_repository_id: "staging".into(),
//!         target_repository_id: "releases".into(),
//!         ..Default::default()
//!     },
//!     Path::new("target"),
//! )?;
//!
//! let relocator = Relocator::new(
//!     Box::new(HttpFetcher::new(timeout, None)?),
//!     Box::new(HttpPublisher::new(timeout, None)?),
//!     Box::new(RepositoryDeleteClient::new(timeout)?),
//!     Box::new(ServerStore::new(settings.servers)),
//! );
//! relocator.relocate(&plan).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Failure semantics
//!
//! - The first failing step aborts the run; nothing is retried or rolled back
//! - Credentials for the delete are resolved before any request is sent
//! - A failed delete after a successful publish leaves the artifact in both
//!   repositories; re-run with fetch and publish skipped

pub mod error;
pub mod settings;
pub mod credentials;
mod http;
pub mod fetch;
pub mod publish;
pub mod delete;
pub mod maven;
pub mod relocate;

// Re-exports for convenience
pub use error::{
    CredentialError, DeleteError, FetchError, PublishError, RelocationError, SettingsError,
    TransportError,
};
pub use settings::{DEFAULT_TIMEOUT, HttpSettings, Server, Settings, ToolVersions};
pub use credentials::{Credential, CredentialResolver, ServerStore};
pub use fetch::{ArtifactFetcher, HttpFetcher};
pub use publish::{ArtifactPublisher, HttpPublisher};
pub use delete::{ArtifactDeleter, NEXUS_DELETE_SUCCESS, RepositoryDeleteClient};
pub use maven::{MavenFetcher, MavenInvoker, MavenPublisher};
pub use relocate::{RelocationReport, Relocator, StepOutcome, StepStatus};
