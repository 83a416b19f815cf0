// Software image management endpoints

use serde_json::json;
use tracing::debug;

use crate::client::DnacClient;
use crate::error::Error;
use crate::models::{ImageTask, SoftwareImage, TaskHandle};

impl DnacClient {
    /// Imported software images.
    ///
    /// `GET /api/v1/image/importation`
    pub async fn get_images(&self) -> Result<Vec<SoftwareImage>, Error> {
        debug!("retrieving software images");
        self.get_response("/api/v1/image/importation").await
    }

    /// Image activation tasks.
    ///
    /// `GET /api/v1/image/task?taskType=activate`
    pub async fn get_image_activation_tasks(&self) -> Result<Vec<ImageTask>, Error> {
        debug!("retrieving image update status");
        self.get_response("/api/v1/image/task?taskType=activate")
            .await
    }

    /// Start generation of the upgrade readiness report.
    ///
    /// `POST /api/v1/image/upgrade-analysis/file` with an empty device list;
    /// the finished task names the report in `additionalStatusURL`.
    pub async fn submit_upgrade_report(&self) -> Result<TaskHandle, Error> {
        debug!("submitting upgrade readiness report");
        self.post_response("/api/v1/image/upgrade-analysis/file", &json!([]))
            .await
    }
}
