//! reqwest-backed device service.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::ACCEPT;
use reqwest::Client;

use super::{DeviceApi, Endpoint};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::types::{Device, DevicesResponse};

/// HTTP client for the device endpoints.
#[derive(Clone)]
pub struct DeviceService {
    client: Client,
    base_url: String,
}

impl DeviceService {
    /// Create a service with the configured host and request timeout.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a request and return the raw body of a 2xx response.
    ///
    /// Any other status is turned into an error before the body is read.
    async fn perform(&self, endpoint: Endpoint) -> Result<Bytes, ApiError> {
        let url = endpoint.url(&self.base_url)?;
        let method = endpoint.method();

        tracing::debug!(%method, %url, "Sending request");

        let response = self
            .client
            .request(method.clone(), url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(%method, %url, status = status.as_u16(), "Received response");

        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16()));
        }

        Ok(response.bytes().await?)
    }
}

#[async_trait]
impl DeviceApi for DeviceService {
    async fn fetch_devices(&self) -> Result<Vec<Device>, ApiError> {
        let body = self.perform(Endpoint::ListDevices).await?;

        if body.is_empty() {
            return Err(ApiError::NoDataReceived);
        }

        let response: DevicesResponse = serde_json::from_slice(&body)?;
        Ok(response.data)
    }

    async fn delete_device(&self, id: i64) -> Result<(), ApiError> {
        self.perform(Endpoint::DeleteDevice { id }).await?;
        Ok(())
    }
}
