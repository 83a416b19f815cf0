// Job runner: submit, await the result reference, fetch.

use dnacheck_api::DnacClient;
use tracing::info;

use super::{Artifact, ArtifactFetcher, Job, PollPolicy, TaskPoller};
use crate::error::CoreError;

/// Drives a job from submission to its fetched artifact.
pub struct JobRunner<'a> {
    poller: TaskPoller<'a>,
    fetcher: ArtifactFetcher<'a>,
}

impl<'a> JobRunner<'a> {
    pub fn new(client: &'a DnacClient, task_policy: PollPolicy, fetch_policy: PollPolicy) -> Self {
        Self {
            poller: TaskPoller::new(client, task_policy),
            fetcher: ArtifactFetcher::new(client, fetch_policy),
        }
    }

    /// Wait for an already submitted job and fetch what it produced.
    pub async fn complete(&self, job: &Job) -> Result<Artifact, CoreError> {
        let reference = self.poller.await_result(job).await?;
        info!(task_id = %job.id, kind = %job.kind, %reference, "job finished, fetching result");
        self.fetcher.fetch(&reference).await
    }

    /// Run CLI commands on a batch of devices and return the command output.
    pub async fn run_command(
        &self,
        device_ids: &[String],
        commands: &[String],
    ) -> Result<Artifact, CoreError> {
        let job = self.poller.submit(device_ids, commands).await?;
        self.complete(&job).await
    }

    /// Generate the upgrade readiness report and download it.
    pub async fn run_report(&self) -> Result<Artifact, CoreError> {
        let job = self.poller.submit_report().await?;
        self.complete(&job).await
    }
}
