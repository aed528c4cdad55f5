//! nexmove Core - Core types for moving artifacts between repositories
//!
//! This crate provides the foundational types used throughout nexmove:
//! - `ArtifactCoordinate`: groupId, artifactId, version and packaging
//! - `RepositoryEndpoint`: repository manager URL plus repository id
//! - `RelocationPlan`: validated, immutable description of one run
//! - `ScratchPaths`: local files shared by the fetch and publish steps

pub mod coordinate;
pub mod endpoint;
pub mod plan;
pub mod error;

pub use coordinate::{ArtifactCoordinate, DESCRIPTOR_PACKAGING, group_path};
pub use endpoint::{NEXUS_CONTENT_PATH, RepositoryEndpoint};
pub use plan::{RelocationParams, RelocationPlan, ScratchPaths, Step};
pub use error::ConfigurationError;
