//! Fetch step: download the artifact and its POM into scratch paths

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use std::path::Path;
use std::time::Duration;

use nexmove_core::{ArtifactCoordinate, RepositoryEndpoint};

use crate::credentials::Credential;
use crate::error::{FetchError, TransportError};
use crate::http::build_client;

/// Retrieves an artifact binary and its descriptor from a repository.
///
/// Exactly two files are written, the artifact with its own packaging and the
/// POM. Dependencies are never resolved.
#[async_trait]
pub trait ArtifactFetcher: Send + Sync {
    async fn fetch(
        &self,
        coordinate: &ArtifactCoordinate,
        source: &RepositoryEndpoint,
        artifact_dest: &Path,
        descriptor_dest: &Path,
    ) -> Result<(), FetchError>;
}

/// Fetcher reading the Maven 2 layout over plain HTTP GET
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
    credential: Option<Credential>,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, credential: Option<Credential>) -> Result<Self, TransportError> {
        Ok(Self {
            client: build_client(timeout)?,
            timeout,
            credential,
        })
    }

    async fn download(&self, url: &str, dest: &Path) -> Result<(), FetchError> {
        tracing::debug!("GET {}", url);

        let mut request = self.client.get(url);
        if let Some(credential) = &self.credential {
            request = request.header(AUTHORIZATION, credential.basic_auth_header());
        }

        let transport = |e| FetchError::Transport {
            url: url.to_string(),
            source: TransportError::from_reqwest(e, self.timeout),
        };

        let response = request.send().await.map_err(transport)?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                url: url.to_string(),
            });
        }
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(FetchError::Unauthorized {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::Unexpected {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(transport)?;
        write_file(dest, &bytes).await?;

        tracing::debug!("Saved {} bytes to {}", bytes.len(), dest.display());
        Ok(())
    }
}

#[async_trait]
impl ArtifactFetcher for HttpFetcher {
    async fn fetch(
        &self,
        coordinate: &ArtifactCoordinate,
        source: &RepositoryEndpoint,
        artifact_dest: &Path,
        descriptor_dest: &Path,
    ) -> Result<(), FetchError> {
        let artifact_url = source.file_url(coordinate, &coordinate.artifact_file_name());
        self.download(&artifact_url, artifact_dest).await?;

        let descriptor_url = source.file_url(coordinate, &coordinate.descriptor_file_name());
        self.download(&descriptor_url, descriptor_dest).await?;

        Ok(())
    }
}

/// Write `data` to `dest`, creating the parent directory first
pub(crate) async fn write_file(dest: &Path, data: &[u8]) -> Result<(), FetchError> {
    let write_err = |source| FetchError::Write {
        path: dest.to_path_buf(),
        source,
    };

    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
        }
    }
    tokio::fs::write(dest, data).await.map_err(write_err)
}
