//! Shared data types for the device API.

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

/// A device as reported by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: i64,
    pub name: String,
    /// Path fragment, relative to the API host.
    pub icon: String,
    pub is_online: bool,
    #[serde(rename = "type")]
    pub device_type: i64,
    pub status: String,
    /// Unix timestamp in seconds.
    pub last_work_time: f64,
}

impl Device {
    /// Full URL of the device icon.
    pub fn icon_url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.icon)
    }

    /// Last work time in the local timezone, if representable.
    pub fn last_work_time_local(&self) -> Option<DateTime<Local>> {
        if !self.last_work_time.is_finite() {
            return None;
        }

        let secs = self.last_work_time.floor();
        let nanos = ((self.last_work_time - secs) * 1e9) as u32;
        Local.timestamp_opt(secs as i64, nanos).single()
    }

    /// Last work time formatted as `HH:MM:SS`.
    pub fn formatted_last_work_time(&self) -> String {
        self.last_work_time_local()
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "--:--:--".to_string())
    }
}

/// Envelope returned by the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevicesResponse {
    pub data: Vec<Device>,
}
