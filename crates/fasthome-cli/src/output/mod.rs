//! Output formatting for CLI results.

pub mod json;
pub mod table;

pub use json::JsonOutput;
pub use table::TableOutput;

use fasthome_core::Device;

/// Output formatter trait
pub trait OutputFormatter: Send + Sync {
    /// Format device list
    fn format_devices(&self, devices: &[Device]) -> String;

    /// Format a single device in detail
    fn format_device(&self, index: usize, device: &Device) -> String;

    /// Format a removal from the list
    fn format_removed(&self, index: usize, device: Option<&Device>) -> String;

    /// Format a generic message
    fn format_message(&self, message: &str) -> String;

    /// Format an error
    fn format_error(&self, error: &str) -> String;
}

/// Get the appropriate formatter based on JSON flag
pub fn get_formatter(json: bool, base_url: &str) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonOutput::new(base_url))
    } else {
        Box::new(TableOutput::new(base_url))
    }
}
