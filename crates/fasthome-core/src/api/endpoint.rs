//! Remote endpoints of the device API.

use reqwest::{Method, Url};

use crate::error::ApiError;

/// One remote operation: method plus path template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    ListDevices,
    DeleteDevice { id: i64 },
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::ListDevices => Method::GET,
            Endpoint::DeleteDevice { .. } => Method::DELETE,
        }
    }

    /// Path relative to the API host.
    ///
    /// The delete endpoint lives under `v1.1` while listing stays on `v1`;
    /// the server expects exactly these paths.
    pub fn path(&self) -> String {
        match self {
            Endpoint::ListDevices => "/api/v1/test/devices".to_string(),
            Endpoint::DeleteDevice { id } => format!("/api/v1.1/test/devices/{}", id),
        }
    }

    /// Build the absolute URL against `base_url`.
    pub fn url(&self, base_url: &str) -> Result<Url, ApiError> {
        let raw = format!("{}{}", base_url.trim_end_matches('/'), self.path());
        Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))
    }
}
