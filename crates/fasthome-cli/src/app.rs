//! Composition root: config, service and store wiring.

use std::sync::Arc;

use fasthome_core::{ClientConfig, DeviceListObserver, DeviceService, DeviceStore};

use crate::cli::Cli;
use crate::error::CliError;
use crate::output::{get_formatter, OutputFormatter};

/// Everything a command needs to talk to the API.
pub struct AppContext {
    pub config: ClientConfig,
    pub service: Arc<DeviceService>,
    pub json: bool,
}

impl AppContext {
    /// Resolve configuration (file, then flags/env) and build the service.
    pub async fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let config = match &cli.config {
            Some(path) => ClientConfig::load(path).await?,
            None => ClientConfig::load_default().await?,
        };
        let config = config.with_overrides(cli.base_url.clone(), cli.timeout)?;

        tracing::debug!(
            base_url = %config.base_url,
            timeout_secs = config.timeout_secs,
            "Using client config"
        );

        let service = DeviceService::new(&config)?;

        Ok(Self {
            config,
            service: Arc::new(service),
            json: cli.json,
        })
    }

    pub fn formatter(&self) -> Box<dyn OutputFormatter> {
        get_formatter(self.json, &self.config.base_url)
    }

    /// New store backed by this context's service.
    pub fn store<O>(&self, observer: O) -> DeviceStore
    where
        O: DeviceListObserver + 'static,
    {
        DeviceStore::new(self.service.clone(), observer)
    }
}
