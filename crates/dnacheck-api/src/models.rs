// Controller response types
//
// Models for the DNA Center REST API. Most intent endpoints wrap their
// payload as `{"response": ..., "version": "..."}`. Fields use
// `#[serde(default)]` liberally because the payloads vary across
// controller releases; unmodelled fields land in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ── Envelopes ────────────────────────────────────────────────────────

/// Standard response envelope: `{ "response": T, "version": "1.0" }`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub response: T,
    #[serde(default)]
    pub version: Option<String>,
}

/// Body of `POST /api/system/v1/auth/token`.
#[derive(Debug, Deserialize)]
pub struct AuthToken {
    #[serde(rename = "Token")]
    pub token: String,
}

// ── Topology / inventory ─────────────────────────────────────────────

/// `GET /api/v1/topology/physical-topology` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhysicalTopology {
    #[serde(default)]
    pub nodes: Vec<TopologyNode>,
    #[serde(default)]
    pub links: Vec<Value>,
}

/// A node of the physical topology. For `nodeType=HOST` queries the
/// `deviceType` is `"wired"` or `"wireless"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologyNode {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub device_type: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of `GET /api/v1/network-device/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDevice {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub platform_id: Option<String>,
    #[serde(default)]
    pub software_version: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Fabric ───────────────────────────────────────────────────────────

/// One connectivity domain (fabric LAN, fabric site or transit).
///
/// `domainType` is kept as a string here; classification happens in core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectivityDomain {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub domain_type: String,
    #[serde(default)]
    pub virtual_network: Vec<Value>,
    #[serde(default)]
    pub site_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of `GET /api/v2/data/customer-facing-service/DeviceInfo`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FabricDeviceInfo {
    #[serde(default)]
    pub network_device_id: String,
    /// Fabric roles, e.g. `EDGENODE`, `MAPSERVER`, `BORDERNODE`.
    /// Absent for devices that hold no fabric role.
    #[serde(default)]
    pub roles: Option<Vec<String>>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Tasks ────────────────────────────────────────────────────────────

/// Reference returned by any endpoint that starts an asynchronous task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskHandle {
    pub task_id: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Body of `POST /api/v1/network-device-poller/cli/read-request`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandRunnerRequest {
    pub name: String,
    pub description: String,
    pub device_uuids: Vec<String>,
    pub commands: Vec<String>,
}

impl CommandRunnerRequest {
    /// The job description the collector always submits.
    pub fn new(device_uuids: Vec<String>, commands: Vec<String>) -> Self {
        Self {
            name: "command-runner".into(),
            description: "command-runner-network-poller".into(),
            device_uuids,
            commands,
        }
    }
}

/// `GET /api/v1/task/{taskId}` payload.
///
/// `progress` is a loosely-typed field: a free-form status line while the
/// task runs, and for command-runner jobs a JSON document (as a string)
/// carrying `fileId` once the output is materialized.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub progress: Option<Value>,
    #[serde(default)]
    pub is_error: bool,
    #[serde(default)]
    pub failure_reason: Option<String>,
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub end_time: Option<i64>,
    #[serde(default, rename = "additionalStatusURL")]
    pub additional_status_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Images ───────────────────────────────────────────────────────────

/// One entry of `GET /api/v1/image/importation`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftwareImage {
    #[serde(default)]
    pub image_uuid: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_tagged_golden: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of `GET /api/v1/image/task?taskType=activate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageTask {
    #[serde(default)]
    pub task_uuid: Option<String>,
    #[serde(default)]
    pub task_status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Assurance ────────────────────────────────────────────────────────

/// One site entry of the host health-detail dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSite {
    #[serde(default)]
    pub score_detail: Vec<ScoreDetail>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDetail {
    pub score_category: ScoreCategory,
    #[serde(default)]
    pub client_unique_count: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreCategory {
    #[serde(default)]
    pub value: String,
}
