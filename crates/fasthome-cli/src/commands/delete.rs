//! Delete command implementation.

use fasthome_core::Device;
use tokio::sync::mpsc;

use super::list::device_at;
use super::{confirm, take_error};
use crate::app::AppContext;
use crate::cli::DeleteArgs;
use crate::error::CliError;
use crate::output::OutputFormatter;

/// Run the delete command
pub async fn run_delete(args: DeleteArgs, ctx: &AppContext) -> Result<(), CliError> {
    let formatter = ctx.formatter();
    let (tx, mut events) = mpsc::unbounded_channel();
    let mut store = ctx.store(tx);

    store.refresh();
    store.settle().await;
    if let Some(message) = take_error(&mut events) {
        return Err(CliError::Store(message));
    }

    let device = device_at(store.devices(), args.index)?.clone();

    if !args.yes && !confirm(&format!("Do you want to delete {}?", device.name)).await? {
        println!("{}", formatter.format_message("Deletion cancelled."));
        return Ok(());
    }

    store.delete(args.index);
    store.settle().await;

    if let Some(message) = take_error(&mut events) {
        return Err(CliError::Store(message));
    }

    println!(
        "{}",
        removal_report(formatter.as_ref(), args.index, &device, store.devices())
    );

    Ok(())
}

/// The removed device followed by the list that remains.
fn removal_report(
    formatter: &dyn OutputFormatter,
    index: usize,
    removed: &Device,
    remaining: &[Device],
) -> String {
    format!(
        "{}\n{}",
        formatter.format_removed(index, Some(removed)),
        formatter.format_devices(remaining)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::get_formatter;
    use serde_json::Value;

    fn device(id: i64, name: &str) -> Device {
        Device {
            id,
            name: name.to_string(),
            icon: format!("/i/{}.png", id),
            is_online: true,
            device_type: 1,
            status: "ok".to_string(),
            last_work_time: 1000.0,
        }
    }

    #[test]
    fn test_removal_report_lists_remaining_devices() {
        let formatter = get_formatter(true, "https://api.fasthome.io");
        let remaining = vec![device(1, "Lamp"), device(3, "Kettle")];

        let report = removal_report(formatter.as_ref(), 1, &device(2, "Heater"), &remaining);
        let docs: Vec<Value> = serde_json::Deserializer::from_str(&report)
            .into_iter::<Value>()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0]["removed"], 1);
        assert_eq!(docs[0]["device"]["name"], "Heater");
        assert_eq!(docs[1]["count"], 2);
        assert_eq!(docs[1]["devices"][0]["name"], "Lamp");
        assert_eq!(docs[1]["devices"][1]["name"], "Kettle");
    }
}
