//! HTTP access to the device API.
//!
//! [`DeviceApi`] is the seam the store depends on; [`DeviceService`] is the
//! reqwest-backed implementation.

pub mod endpoint;
pub mod service;

pub use endpoint::Endpoint;
pub use service::DeviceService;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::types::Device;

/// Remote operations on the device list.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceApi: Send + Sync {
    /// Fetch all devices in server order.
    async fn fetch_devices(&self) -> Result<Vec<Device>, ApiError>;

    /// Delete a device by id.
    async fn delete_device(&self, id: i64) -> Result<(), ApiError>;
}
