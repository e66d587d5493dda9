//! Fasthome core - shared library for Fasthome device list management.
//!
//! Provides the HTTP device service, the device list store with optimistic
//! deletion, the data model and client configuration.

pub mod api;
pub mod config;
pub mod error;
pub mod store;
pub mod types;

pub use api::{DeviceApi, DeviceService, Endpoint};
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError, CoreError};
pub use store::{DeviceListObserver, DeviceStore, NoopObserver, StoreEvent, StoreState};
pub use types::Device;
