//! Asynchronous job protocol.
//!
//! A job is submitted, its task is polled until the progress data names a
//! result, and the result is fetched:
//!
//! ```text
//! SUBMITTED ──poll──▶ POLLING ──result ref──▶ RESOLVED ──fetch──▶ Artifact
//!                        │
//!                        └──budget spent──▶ EXHAUSTED
//! ```

pub mod fetcher;
pub mod poll;
pub mod poller;
pub mod runner;

use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;

pub use fetcher::ArtifactFetcher;
pub use poll::PollPolicy;
pub use poller::{ProgressError, TaskPoller};
pub use runner::JobRunner;

/// What a submitted job produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum JobKind {
    /// Command runner: CLI output lands in a JSON file named by `fileId`.
    CommandRun,
    /// Report generation: the report is a download named by `additionalStatusURL`.
    ReportGenerate,
}

/// A unit of controller-side asynchronous work.
#[derive(Debug, Clone)]
pub struct Job {
    /// Controller-assigned task identifier.
    pub id: String,
    pub kind: JobKind,
    pub submitted_at: DateTime<Utc>,
}

impl Job {
    pub fn new(id: impl Into<String>, kind: JobKind) -> Self {
        Self {
            id: id.into(),
            kind,
            submitted_at: Utc::now(),
        }
    }
}

/// Where a finished job's result can be retrieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultRef {
    /// `GET /api/v1/file/{id}` returns JSON.
    File(String),
    /// A controller path or URL serving a binary download.
    Url(String),
}

impl fmt::Display for ResultRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(id) => write!(f, "file {id}"),
            Self::Url(url) => write!(f, "download {url}"),
        }
    }
}

/// One observation of a task. Transient: lives only inside the poll loop.
#[derive(Debug, Clone)]
pub struct TaskStatus {
    pub task_id: String,
    /// The controller's `progress` field, string or object, as received.
    pub raw_progress: Option<Value>,
    /// The controller stamped an end time.
    pub is_complete: bool,
    pub is_error: bool,
    pub failure_reason: Option<String>,
    /// Populated once the progress data names a result.
    pub result_ref: Option<ResultRef>,
    /// Why `result_ref` is still empty.
    pub pending: Option<ProgressError>,
}

/// The final payload of a job. Immutable once fetched.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// The file id or download path it was fetched from.
    pub id: String,
    pub content: ArtifactContent,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ArtifactContent {
    Json(Value),
    File(DownloadedFile),
}

/// A binary artifact with the name the controller advertised for it.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadedFile {
    pub file_name: String,
    #[serde(skip)]
    pub bytes: Bytes,
    pub size: usize,
}

impl Artifact {
    pub fn as_json(&self) -> Option<&Value> {
        match &self.content {
            ArtifactContent::Json(v) => Some(v),
            ArtifactContent::File(_) => None,
        }
    }

    pub fn as_file(&self) -> Option<&DownloadedFile> {
        match &self.content {
            ArtifactContent::File(f) => Some(f),
            ArtifactContent::Json(_) => None,
        }
    }
}

// Artifacts are persisted as their content alone.
impl Serialize for Artifact {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.content.serialize(serializer)
    }
}
