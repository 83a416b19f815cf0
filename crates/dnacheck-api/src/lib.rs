// dnacheck-api: Async Rust client for the Cisco DNA Center REST API

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod assurance;
mod fabric;
mod images;
mod inventory;
mod tasks;

pub use client::{DnacClient, Download};
pub use error::Error;
pub use models::{
    CommandRunnerRequest, ConnectivityDomain, FabricDeviceInfo, HealthSite, ImageTask,
    NetworkDevice, PhysicalTopology, SoftwareImage, TaskHandle, TaskRecord, TopologyNode,
};
pub use transport::{TlsMode, TransportConfig, controller_url};
