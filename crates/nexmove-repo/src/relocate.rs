//! Relocation sequence: fetch from staging, publish to target, delete from staging
//!
//! Steps run strictly in order. The first failure aborts the run; nothing is
//! rolled back or retried. A failed delete after a successful publish leaves
//! the artifact in both repositories, and the caller retries with fetch and
//! publish skipped.

use serde::Serialize;
use tokio::sync::watch;

use nexmove_core::{RelocationPlan, Step};

use crate::credentials::CredentialResolver;
use crate::delete::ArtifactDeleter;
use crate::error::RelocationError;
use crate::fetch::ArtifactFetcher;
use crate::publish::ArtifactPublisher;

/// What happened to one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Completed,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    pub step: Step,
    pub status: StepStatus,
}

/// Summary of a successful run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RelocationReport {
    pub steps: Vec<StepOutcome>,
}

impl RelocationReport {
    pub fn status(&self, step: Step) -> Option<StepStatus> {
        self.steps.iter().find(|o| o.step == step).map(|o| o.status)
    }

    fn record(&mut self, step: Step, status: StepStatus) {
        self.steps.push(StepOutcome { step, status });
    }
}

/// Runs a [`RelocationPlan`] against its collaborators
pub struct Relocator {
    fetcher: Box<dyn ArtifactFetcher>,
    publisher: Box<dyn ArtifactPublisher>,
    deleter: Box<dyn ArtifactDeleter>,
    credentials: Box<dyn CredentialResolver>,
    cancel: Option<watch::Receiver<bool>>,
}

impl Relocator {
    pub fn new(
        fetcher: Box<dyn ArtifactFetcher>,
        publisher: Box<dyn ArtifactPublisher>,
        deleter: Box<dyn ArtifactDeleter>,
        credentials: Box<dyn CredentialResolver>,
    ) -> Self {
        Self {
            fetcher,
            publisher,
            deleter,
            credentials,
            cancel: None,
        }
    }

    /// Stop at the next step boundary once `true` is sent on the channel.
    ///
    /// A step already in flight always runs to completion or its own timeout.
    pub fn with_cancellation(mut self, cancel: watch::Receiver<bool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    fn cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Run fetch, publish and delete in order, honoring the plan's skip flags
    pub async fn relocate(&self, plan: &RelocationPlan) -> Result<RelocationReport, RelocationError> {
        let coordinate = plan.coordinate();
        let mut report = RelocationReport::default();

        tracing::info!(
            "Moving {} from {} to {}",
            coordinate,
            plan.source(),
            plan.target()
        );

        for step in Step::ALL {
            if !plan.runs(step) {
                tracing::debug!("Skipping {} step", step);
                report.record(step, StepStatus::Skipped);
                continue;
            }

            if self.cancelled() {
                tracing::warn!("Cancellation requested, stopping before {} step", step);
                return Err(RelocationError::Cancelled {
                    coordinate: coordinate.clone(),
                    before: step,
                });
            }

            match step {
                Step::Fetch => self.fetch(plan).await?,
                Step::Publish => self.publish(plan).await?,
                Step::Delete => self.delete(plan).await?,
            }
            report.record(step, StepStatus::Completed);
        }

        Ok(report)
    }

    async fn fetch(&self, plan: &RelocationPlan) -> Result<(), RelocationError> {
        let coordinate = plan.coordinate();
        let scratch = plan.scratch();
        tracing::debug!("Starting with retrieving the artifacts to move");

        self.fetcher
            .fetch(
                coordinate,
                plan.source(),
                &scratch.artifact_path,
                &scratch.descriptor_path,
            )
            .await
            .map_err(|source| RelocationError::Fetch {
                coordinate: coordinate.clone(),
                source,
            })?;

        tracing::debug!("...done retrieving the artifacts");
        Ok(())
    }

    async fn publish(&self, plan: &RelocationPlan) -> Result<(), RelocationError> {
        let coordinate = plan.coordinate();
        let scratch = plan.scratch();

        self.publisher
            .publish(
                coordinate,
                &scratch.artifact_path,
                &scratch.descriptor_path,
                plan.target(),
            )
            .await
            .map_err(|source| RelocationError::Publish {
                coordinate: coordinate.clone(),
                source,
            })
    }

    async fn delete(&self, plan: &RelocationPlan) -> Result<(), RelocationError> {
        let coordinate = plan.coordinate();
        let source = plan.source();
        let repository_id = source.repository_id();

        tracing::debug!(
            "Starting with deleting {} from repository {}",
            coordinate,
            repository_id
        );

        // Resolved before any network I/O; a missing server entry never reaches the deleter
        let credential =
            self.credentials
                .resolve(repository_id)
                .map_err(|e| RelocationError::Credential {
                    coordinate: coordinate.clone(),
                    source: e,
                })?;

        self.deleter
            .delete(coordinate, source, repository_id, &credential)
            .await
            .map_err(|e| RelocationError::Delete {
                coordinate: coordinate.clone(),
                source: e,
            })
    }
}
