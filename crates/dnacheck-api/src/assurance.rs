// Assurance endpoints

use serde::Serialize;
use tracing::debug;

use crate::client::DnacClient;
use crate::error::Error;
use crate::models::HealthSite;

/// Width of the health window the controller aggregates clients over.
pub const HEALTH_WINDOW_MS: i64 = 5 * 60 * 1000;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthDetailRequest {
    type_list: HealthTypeList,
    option: &'static str,
    selected_type_id_list: [&'static str; 1],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthTypeList {
    #[serde(rename = "type")]
    kind: &'static str,
    start_time: i64,
    end_time: i64,
    #[serde(rename = "timeAPITime")]
    time_api_time: i64,
}

impl DnacClient {
    /// Client health per site for the five minutes ending at `epoch_ms`.
    ///
    /// `POST /api/assurance/v1/host/dash/healthdetail`
    pub async fn get_client_health(&self, epoch_ms: i64) -> Result<Vec<HealthSite>, Error> {
        debug!(epoch_ms, "retrieving client health detail");
        let body = HealthDetailRequest {
            type_list: HealthTypeList {
                kind: "SITE",
                start_time: epoch_ms - HEALTH_WINDOW_MS,
                end_time: epoch_ms,
                time_api_time: epoch_ms,
            },
            option: "CLIENT",
            selected_type_id_list: ["__global__"],
        };
        self.post_response("/api/assurance/v1/host/dash/healthdetail", &body)
            .await
    }
}
