//! Collection logic between `dnacheck-api` and the CLI.
//!
//! - **Job protocol** ([`job`]): [`TaskPoller`] submits controller-side
//!   jobs and polls their task until a result reference appears;
//!   [`ArtifactFetcher`] retrieves the result. Both run on the bounded,
//!   fixed-interval [`poll_until`](job::poll::poll_until) loop.
//!
//! - **Fabric aggregation** ([`fabric`]): [`FabricAggregator`] turns
//!   connectivity domains into per-site role lists and feeds device batches
//!   to the job protocol for show-command collection.
//!
//! - **Collection** ([`collect`]): [`Collector`] runs every step behind a
//!   [`ConfirmationPolicy`] and assembles the [`Collection`] document, from
//!   which [`ValidationSummary`] extracts the counters-only submission.
//!
//! Nothing here touches the terminal or the filesystem: prompts arrive
//! through [`ConfirmationPolicy`], and results are returned, never written.

pub mod collect;
pub mod config;
pub mod confirm;
pub mod error;
pub mod fabric;
pub mod job;

// ── Primary re-exports ──────────────────────────────────────────────
pub use collect::{
    Collection, CollectionOutcome, CollectionPlan, Collector, DevicesInventory, HealthCounts,
    HostCounts, Identity, SiteCounters, ValidationSummary,
};
pub use config::{AuthCredentials, CollectorConfig, TlsVerification};
pub use confirm::{AlwaysConfirm, ConfirmationPolicy, NeverConfirm};
pub use error::CoreError;
pub use fabric::{
    DomainType, FabricAggregator, FabricDomain, FabricInventory, FabricRole, FabricSite,
    RoleLists,
};
pub use job::{
    Artifact, ArtifactContent, ArtifactFetcher, DownloadedFile, Job, JobKind, JobRunner,
    PollPolicy, ProgressError, ResultRef, TaskPoller, TaskStatus,
};
