// Task poller
//
// Submits jobs and watches their task until the controller names a
// result. The task's `progress` field is loosely typed and changes shape
// while the job runs, so an unreadable or incomplete progress value means
// "not yet", never an error. Only running out of attempts is fatal.

use dnacheck_api::{CommandRunnerRequest, DnacClient, TaskRecord};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use super::poll::{Check, PollError, PollPolicy, poll_until};
use super::{Job, JobKind, ResultRef, TaskStatus};
use crate::error::CoreError;

/// Why a task observation does not (yet) name a result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressError {
    #[error("task has no progress yet")]
    NoProgress,
    #[error("progress is not a JSON object: {0}")]
    NotJson(String),
    #[error("progress has no `fileId`")]
    NoFileId,
    #[error("task has no `additionalStatusURL`")]
    NoStatusUrl,
}

/// Read the result reference a task record carries for a job of `kind`.
///
/// Command-runner tasks report `{"fileId": ...}` inside `progress`, which
/// the controller sends as a JSON string (an object is accepted as well).
/// Report tasks name their download in `additionalStatusURL`.
pub fn extract_result_ref(kind: JobKind, record: &TaskRecord) -> Result<ResultRef, ProgressError> {
    match kind {
        JobKind::CommandRun => {
            let progress = record.progress.as_ref().ok_or(ProgressError::NoProgress)?;
            let parsed;
            let object = match progress {
                Value::Object(map) => map,
                Value::String(text) => {
                    parsed = serde_json::from_str::<Value>(text)
                        .map_err(|_| ProgressError::NotJson(text.clone()))?;
                    parsed
                        .as_object()
                        .ok_or_else(|| ProgressError::NotJson(text.clone()))?
                }
                other => return Err(ProgressError::NotJson(other.to_string())),
            };
            match object.get("fileId") {
                Some(Value::String(id)) if !id.is_empty() => Ok(ResultRef::File(id.clone())),
                Some(Value::Number(id)) => Ok(ResultRef::File(id.to_string())),
                _ => Err(ProgressError::NoFileId),
            }
        }
        JobKind::ReportGenerate => match record.additional_status_url.as_deref() {
            Some(url) if !url.is_empty() => Ok(ResultRef::Url(url.to_owned())),
            _ => Err(ProgressError::NoStatusUrl),
        },
    }
}

impl TaskStatus {
    pub fn from_record(task_id: &str, kind: JobKind, record: TaskRecord) -> Self {
        let (result_ref, pending) = match extract_result_ref(kind, &record) {
            Ok(r) => (Some(r), None),
            Err(e) => (None, Some(e)),
        };
        Self {
            task_id: record.task_id.unwrap_or_else(|| task_id.to_owned()),
            raw_progress: record.progress,
            is_complete: record.end_time.is_some(),
            is_error: record.is_error,
            failure_reason: record.failure_reason,
            result_ref,
            pending,
        }
    }
}

/// Submits jobs and resolves their result references.
pub struct TaskPoller<'a> {
    client: &'a DnacClient,
    policy: PollPolicy,
}

impl<'a> TaskPoller<'a> {
    pub fn new(client: &'a DnacClient, policy: PollPolicy) -> Self {
        Self { client, policy }
    }

    /// Submit a command-runner job for a batch of devices.
    pub async fn submit(
        &self,
        device_ids: &[String],
        commands: &[String],
    ) -> Result<Job, CoreError> {
        info!(devices = device_ids.len(), ?commands, "running command runner");
        let request = CommandRunnerRequest::new(device_ids.to_vec(), commands.to_vec());
        let handle = self.client.submit_command_runner(&request).await?;
        debug!(task_id = %handle.task_id, "command runner job submitted");
        Ok(Job::new(handle.task_id, JobKind::CommandRun))
    }

    /// Submit an upgrade readiness report job.
    pub async fn submit_report(&self) -> Result<Job, CoreError> {
        info!("running upgrade readiness report");
        let handle = self.client.submit_upgrade_report().await?;
        debug!(task_id = %handle.task_id, "report job submitted");
        Ok(Job::new(handle.task_id, JobKind::ReportGenerate))
    }

    /// A single observation of the job's task.
    pub async fn poll_task(&self, job: &Job) -> Result<TaskStatus, CoreError> {
        let record = self.client.get_task(&job.id).await?;
        Ok(TaskStatus::from_record(&job.id, job.kind, record))
    }

    /// Poll the job's task until it names a result.
    ///
    /// Returns on the first observation that carries a reference. A task the
    /// controller flags as failed ends the wait immediately; transport and
    /// HTTP errors are fatal as well. Otherwise gives up with
    /// [`CoreError::TaskExhausted`] once the policy's attempts are spent.
    pub async fn await_result(&self, job: &Job) -> Result<ResultRef, CoreError> {
        let polled = poll_until(self.policy, "task", |_| async move {
            let status = self.poll_task(job).await?;
            if status.is_error {
                return Err(CoreError::TaskFailed {
                    task_id: status.task_id,
                    reason: status
                        .failure_reason
                        .unwrap_or_else(|| "no failure reason given".into()),
                });
            }
            Ok(match (status.result_ref, status.pending) {
                (Some(reference), _) => Check::Ready(reference),
                (None, pending) => Check::Pending(
                    pending.map_or_else(|| "task still running".into(), |e| e.to_string()),
                ),
            })
        })
        .await
        .map_err(|e| match e {
            PollError::Fatal(e) => e,
            PollError::Exhausted {
                attempts,
                last_reason,
            } => CoreError::TaskExhausted {
                task_id: job.id.clone(),
                attempts,
                last_reason,
            },
        })?;

        debug!(
            task_id = %job.id,
            attempts = polled.attempts,
            result = %polled.value,
            "task resolved"
        );
        Ok(polled.value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(value: Value) -> TaskRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn file_id_from_string_progress() {
        let rec = record(json!({ "progress": "{\"fileId\":\"F1\"}" }));
        assert_eq!(
            extract_result_ref(JobKind::CommandRun, &rec),
            Ok(ResultRef::File("F1".into()))
        );
    }

    #[test]
    fn file_id_from_object_progress() {
        let rec = record(json!({ "progress": { "fileId": "F2" } }));
        assert_eq!(
            extract_result_ref(JobKind::CommandRun, &rec),
            Ok(ResultRef::File("F2".into()))
        );
    }

    #[test]
    fn numeric_file_id_is_accepted() {
        let rec = record(json!({ "progress": "{\"fileId\":123}" }));
        assert_eq!(
            extract_result_ref(JobKind::CommandRun, &rec),
            Ok(ResultRef::File("123".into()))
        );
        let rec = record(json!({ "progress": { "fileId": 7 } }));
        assert_eq!(
            extract_result_ref(JobKind::CommandRun, &rec),
            Ok(ResultRef::File("7".into()))
        );
    }

    #[test]
    fn free_text_progress_is_pending() {
        let rec = record(json!({ "progress": "CLI Runner request creation" }));
        assert!(matches!(
            extract_result_ref(JobKind::CommandRun, &rec),
            Err(ProgressError::NotJson(_))
        ));
    }

    #[test]
    fn json_without_file_id_is_pending() {
        let rec = record(json!({ "progress": "{\"status\":\"running\"}" }));
        assert_eq!(
            extract_result_ref(JobKind::CommandRun, &rec),
            Err(ProgressError::NoFileId)
        );
        let rec = record(json!({ "progress": "[1,2]" }));
        assert!(matches!(
            extract_result_ref(JobKind::CommandRun, &rec),
            Err(ProgressError::NotJson(_))
        ));
    }

    #[test]
    fn missing_progress_is_pending() {
        let rec = record(json!({ "taskId": "T1" }));
        assert_eq!(
            extract_result_ref(JobKind::CommandRun, &rec),
            Err(ProgressError::NoProgress)
        );
    }

    #[test]
    fn report_reads_status_url_not_progress() {
        let rec = record(json!({
            "progress": "{\"fileId\":\"F1\"}",
            "additionalStatusURL": "/api/v1/file/onetime/download/r1"
        }));
        assert_eq!(
            extract_result_ref(JobKind::ReportGenerate, &rec),
            Ok(ResultRef::Url("/api/v1/file/onetime/download/r1".into()))
        );
        let rec = record(json!({ "progress": "{\"fileId\":\"F1\"}" }));
        assert_eq!(
            extract_result_ref(JobKind::ReportGenerate, &rec),
            Err(ProgressError::NoStatusUrl)
        );
    }

    #[test]
    fn status_from_record() {
        let rec = record(json!({
            "progress": "{\"fileId\":\"F1\"}",
            "endTime": 1_563_000_000_000_i64
        }));
        let status = TaskStatus::from_record("T1", JobKind::CommandRun, rec);
        assert_eq!(status.task_id, "T1");
        assert!(status.is_complete);
        assert!(!status.is_error);
        assert_eq!(status.result_ref, Some(ResultRef::File("F1".into())));
        assert!(status.pending.is_none());
    }
}
