//! JSON-formatted output for CLI.

use serde::Serialize;
use serde_json::{json, Value};

use super::OutputFormatter;
use fasthome_core::Device;

pub struct JsonOutput {
    base_url: String,
}

impl JsonOutput {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
        }
    }

    fn to_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Device as sent by the server, plus the resolved icon URL.
    fn device_value(&self, device: &Device) -> Value {
        let mut value = serde_json::to_value(device).unwrap_or(json!({}));
        if let Value::Object(ref mut map) = value {
            map.insert(
                "iconUrl".to_string(),
                json!(device.icon_url(&self.base_url)),
            );
        }
        value
    }
}

impl OutputFormatter for JsonOutput {
    fn format_devices(&self, devices: &[Device]) -> String {
        let items: Vec<Value> = devices.iter().map(|d| self.device_value(d)).collect();
        let online = devices.iter().filter(|d| d.is_online).count();

        Self::to_json(&json!({
            "devices": items,
            "count": devices.len(),
            "online": online
        }))
    }

    fn format_device(&self, index: usize, device: &Device) -> String {
        Self::to_json(&json!({
            "index": index,
            "device": self.device_value(device)
        }))
    }

    fn format_removed(&self, index: usize, device: Option<&Device>) -> String {
        Self::to_json(&json!({
            "removed": index,
            "device": device.map(|d| self.device_value(d))
        }))
    }

    fn format_message(&self, message: &str) -> String {
        Self::to_json(&json!({ "message": message }))
    }

    fn format_error(&self, error: &str) -> String {
        Self::to_json(&json!({ "error": error }))
    }
}
