//! Publish step: upload the artifact and its POM into the target repository

use async_trait::async_trait;
use md5::Md5;
use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use sha1::{Digest, Sha1};
use std::path::Path;
use std::time::Duration;

use nexmove_core::{ArtifactCoordinate, RepositoryEndpoint};

use crate::credentials::Credential;
use crate::error::{PublishError, TransportError};
use crate::http::build_client;

/// Uploads a local binary + descriptor pair as one deployable unit
#[async_trait]
pub trait ArtifactPublisher: Send + Sync {
    async fn publish(
        &self,
        coordinate: &ArtifactCoordinate,
        artifact: &Path,
        descriptor: &Path,
        target: &RepositoryEndpoint,
    ) -> Result<(), PublishError>;
}

/// Publisher writing the Maven 2 layout with HTTP PUT, checksums included
pub struct HttpPublisher {
    client: reqwest::Client,
    timeout: Duration,
    credential: Option<Credential>,
}

impl HttpPublisher {
    pub fn new(timeout: Duration, credential: Option<Credential>) -> Result<Self, TransportError> {
        Ok(Self {
            client: build_client(timeout)?,
            timeout,
            credential,
        })
    }

    /// Upload a file followed by its `.sha1` and `.md5` siblings
    async fn upload_with_checksums(&self, local: &Path, url: &str) -> Result<(), PublishError> {
        let data = tokio::fs::read(local)
            .await
            .map_err(|source| PublishError::Read {
                path: local.to_path_buf(),
                source,
            })?;

        let sha1 = hex::encode(Sha1::digest(&data));
        let md5 = hex::encode(Md5::digest(&data));

        self.put(url, data).await?;
        self.put(&format!("{}.sha1", url), sha1.into_bytes()).await?;
        self.put(&format!("{}.md5", url), md5.into_bytes()).await?;

        Ok(())
    }

    async fn put(&self, url: &str, body: Vec<u8>) -> Result<(), PublishError> {
        tracing::debug!("PUT {} ({} bytes)", url, body.len());

        let mut request = self.client.put(url).body(body);
        if let Some(credential) = &self.credential {
            request = request.header(AUTHORIZATION, credential.basic_auth_header());
        }

        let response = request.send().await.map_err(|e| PublishError::Transport {
            url: url.to_string(),
            source: TransportError::from_reqwest(e, self.timeout),
        })?;

        classify(response.status(), url)
    }
}

fn classify(status: StatusCode, url: &str) -> Result<(), PublishError> {
    if status.is_success() {
        return Ok(());
    }

    let url = url.to_string();
    let code = status.as_u16();
    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            PublishError::Unauthorized { url, status: code }
        }
        StatusCode::NOT_FOUND => PublishError::RepositoryNotFound { url },
        // Nexus answers 400 when a release repository refuses a redeploy
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT => {
            PublishError::Conflict { url, status: code }
        }
        _ => PublishError::Unexpected { url, status: code },
    })
}

#[async_trait]
impl ArtifactPublisher for HttpPublisher {
    async fn publish(
        &self,
        coordinate: &ArtifactCoordinate,
        artifact: &Path,
        descriptor: &Path,
        target: &RepositoryEndpoint,
    ) -> Result<(), PublishError> {
        tracing::debug!(
            "Deploying {} into repository {}",
            coordinate,
            target.repository_id()
        );

        let artifact_url = target.file_url(coordinate, &coordinate.artifact_file_name());
        self.upload_with_checksums(artifact, &artifact_url).await?;

        let descriptor_url = target.file_url(coordinate, &coordinate.descriptor_file_name());
        self.upload_with_checksums(descriptor, &descriptor_url).await?;

        tracing::info!(
            "Deployed {} into repository {}",
            coordinate,
            target.repository_id()
        );
        Ok(())
    }
}
