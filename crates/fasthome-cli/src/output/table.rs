//! Table-formatted output for CLI.

use colored::*;
use comfy_table::{Cell, Color, ContentArrangement, Table};

use super::OutputFormatter;
use fasthome_core::Device;

pub struct TableOutput {
    base_url: String,
}

impl TableOutput {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
        }
    }

    fn online_cell(online: bool) -> Cell {
        if online {
            Cell::new("online").fg(Color::Green)
        } else {
            Cell::new("offline").fg(Color::Red)
        }
    }
}

impl OutputFormatter for TableOutput {
    fn format_devices(&self, devices: &[Device]) -> String {
        if devices.is_empty() {
            return "No devices found.".to_string();
        }

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            "#", "ID", "Name", "Online", "Type", "Status", "Last Work", "Icon",
        ]);

        for (index, device) in devices.iter().enumerate() {
            table.add_row(vec![
                Cell::new(index),
                Cell::new(device.id),
                Cell::new(&device.name),
                Self::online_cell(device.is_online),
                Cell::new(device.device_type),
                Cell::new(&device.status),
                Cell::new(device.formatted_last_work_time()),
                Cell::new(device.icon_url(&self.base_url)),
            ]);
        }

        let online = devices.iter().filter(|d| d.is_online).count();
        format!(
            "{}\n\n{} device(s), {} online",
            table,
            devices.len(),
            online
        )
    }

    fn format_device(&self, index: usize, device: &Device) -> String {
        let online = if device.is_online {
            "online".green()
        } else {
            "offline".red()
        };

        let lines = [
            format!("Device #{}: {} (id {})", index, device.name, device.id),
            format!("  Online:     {}", online),
            format!("  Status:     {}", device.status),
            format!("  Type:       {}", device.device_type),
            format!("  Last Work:  {}", device.formatted_last_work_time()),
            format!("  Icon:       {}", device.icon_url(&self.base_url)),
        ];

        lines.join("\n")
    }

    fn format_removed(&self, index: usize, device: Option<&Device>) -> String {
        match device {
            Some(d) => format!("{} #{} {}", "[DELETED]".yellow(), index, d.name),
            None => format!("{} #{}", "[DELETED]".yellow(), index),
        }
    }

    fn format_message(&self, message: &str) -> String {
        message.to_string()
    }

    fn format_error(&self, error: &str) -> String {
        format!("{} Something went wrong: {}", "[FAIL]".red(), error)
    }
}
