// Asynchronous task endpoints
//
// Job submission (command runner), task status, and result files.
// Polling policy lives in `dnacheck-core`; these are single calls.

use serde_json::Value;
use tracing::debug;

use crate::client::DnacClient;
use crate::error::Error;
use crate::models::{CommandRunnerRequest, TaskHandle, TaskRecord};

impl DnacClient {
    /// Submit a read-only CLI job against a batch of devices.
    ///
    /// `POST /api/v1/network-device-poller/cli/read-request`
    pub async fn submit_command_runner(
        &self,
        request: &CommandRunnerRequest,
    ) -> Result<TaskHandle, Error> {
        debug!(
            devices = request.device_uuids.len(),
            commands = ?request.commands,
            "submitting command runner job"
        );
        self.post_response("/api/v1/network-device-poller/cli/read-request", request)
            .await
    }

    /// Fetch the current status of a task.
    ///
    /// `GET /api/v1/task/{task_id}`
    pub async fn get_task(&self, task_id: &str) -> Result<TaskRecord, Error> {
        debug!(task_id, "checking task");
        self.get_response(&format!("/api/v1/task/{task_id}")).await
    }

    /// Fetch a result file as JSON. File bodies are not enveloped.
    ///
    /// `GET /api/v1/file/{file_id}`
    pub async fn get_file(&self, file_id: &str) -> Result<Value, Error> {
        debug!(file_id, "checking file");
        self.get_json(&format!("/api/v1/file/{file_id}")).await
    }
}
