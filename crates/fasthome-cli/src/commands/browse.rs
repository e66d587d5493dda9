//! Interactive device browser.
//!
//! Drives a single store from terminal input: requests are started from the
//! input loop and their outcomes are applied as they arrive, with every
//! store notification printed as it happens.

use std::io::{self, Write};
use std::str::FromStr;

use fasthome_core::{Device, DeviceListObserver};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::is_yes;
use crate::app::AppContext;
use crate::error::CliError;
use crate::output::OutputFormatter;

const HELP: &str = "Commands:
  list              show the current list
  refresh | retry   fetch the list from the server
  delete <index>    delete a device
  help              show this help
  quit              leave the browser";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BrowseCommand {
    List,
    Refresh,
    Delete(usize),
    Help,
    Quit,
}

impl FromStr for BrowseCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default().to_lowercase();

        let parsed = match command.as_str() {
            "list" | "ls" => BrowseCommand::List,
            "refresh" | "retry" | "r" => BrowseCommand::Refresh,
            "delete" | "rm" => {
                let index = parts
                    .next()
                    .and_then(|s| s.parse::<usize>().ok())
                    .ok_or_else(|| "usage: delete <index>".to_string())?;
                BrowseCommand::Delete(index)
            }
            "help" | "?" => BrowseCommand::Help,
            "quit" | "exit" | "q" => BrowseCommand::Quit,
            other => return Err(format!("unknown command '{}', type 'help'", other)),
        };

        if parts.next().is_some() {
            return Err(format!("too many arguments for '{}'", command));
        }

        Ok(parsed)
    }
}

/// Prints store notifications to the terminal.
struct TerminalObserver {
    formatter: Box<dyn OutputFormatter>,
}

impl DeviceListObserver for TerminalObserver {
    fn on_list_changed(&self, devices: &[Device]) {
        println!("{}", self.formatter.format_devices(devices));
    }

    fn on_item_removed_at(&self, index: usize) {
        println!("{}", self.formatter.format_removed(index, None));
    }

    fn on_error(&self, message: &str) {
        println!("{}", self.formatter.format_error(message));
        println!("{}", self.formatter.format_message("Type 'retry' to try again."));
    }
}

/// Current visible index of the device with `id`.
fn position_of(devices: &[Device], id: i64) -> Option<usize> {
    devices.iter().position(|d| d.id == id)
}

fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}

/// Run the browse command
pub async fn run_browse(ctx: &AppContext) -> Result<(), CliError> {
    let formatter = ctx.formatter();
    let mut store = ctx.store(TerminalObserver {
        formatter: ctx.formatter(),
    });
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    // Id of the device named in the open confirmation prompt.
    let mut awaiting_confirm: Option<i64> = None;

    println!("{}", HELP);
    store.refresh();
    prompt();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = store.handle_next(), if store.pending() > 0 => {}
            line = lines.next_line() => {
                let Some(line) = line? else { break };

                if let Some(id) = awaiting_confirm.take() {
                    if is_yes(&line) {
                        match position_of(store.devices(), id) {
                            Some(index) => {
                                store.delete(index);
                            }
                            None => {
                                let message = format!("device {} is no longer listed", id);
                                println!("{}", formatter.format_error(&message));
                            }
                        }
                    } else {
                        println!("{}", formatter.format_message("Deletion cancelled."));
                    }
                    prompt();
                    continue;
                }

                if line.trim().is_empty() {
                    prompt();
                    continue;
                }

                match line.parse::<BrowseCommand>() {
                    Ok(BrowseCommand::List) => {
                        println!("{}", formatter.format_devices(store.devices()));
                    }
                    Ok(BrowseCommand::Refresh) => store.refresh(),
                    Ok(BrowseCommand::Delete(index)) => match store.devices().get(index) {
                        Some(device) => {
                            print!("Do you want to delete {}? [y/N] ", device.name);
                            let _ = io::stdout().flush();
                            awaiting_confirm = Some(device.id);
                            continue;
                        }
                        None => {
                            let message = format!("no device at index {}", index);
                            println!("{}", formatter.format_error(&message));
                        }
                    },
                    Ok(BrowseCommand::Help) => println!("{}", HELP),
                    Ok(BrowseCommand::Quit) => break,
                    Err(message) => println!("{}", formatter.format_error(&message)),
                }
                prompt();
            }
        }
    }

    tracing::debug!(pending = store.pending(), "Leaving browser");
    store.shutdown();
    store.settle().await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("list".parse::<BrowseCommand>(), Ok(BrowseCommand::List));
        assert_eq!("  retry ".parse::<BrowseCommand>(), Ok(BrowseCommand::Refresh));
        assert_eq!("REFRESH".parse::<BrowseCommand>(), Ok(BrowseCommand::Refresh));
        assert_eq!("delete 3".parse::<BrowseCommand>(), Ok(BrowseCommand::Delete(3)));
        assert_eq!("rm 0".parse::<BrowseCommand>(), Ok(BrowseCommand::Delete(0)));
        assert_eq!("q".parse::<BrowseCommand>(), Ok(BrowseCommand::Quit));
        assert_eq!("?".parse::<BrowseCommand>(), Ok(BrowseCommand::Help));
    }

    fn device(id: i64, name: &str) -> Device {
        Device {
            id,
            name: name.to_string(),
            icon: String::new(),
            is_online: true,
            device_type: 1,
            status: "ok".to_string(),
            last_work_time: 0.0,
        }
    }

    #[test]
    fn test_confirmed_device_is_found_by_id() {
        // Heater was at index 1 when the prompt was shown.
        let before = vec![device(1, "Lamp"), device(2, "Heater"), device(3, "Kettle")];
        assert_eq!(position_of(&before, 2), Some(1));

        let refreshed = vec![device(4, "Fan"), device(3, "Kettle"), device(2, "Heater")];
        assert_eq!(position_of(&refreshed, 2), Some(2));

        let without = vec![device(1, "Lamp"), device(3, "Kettle")];
        assert_eq!(position_of(&without, 2), None);
    }

    #[test]
    fn test_parse_errors() {
        assert!("delete".parse::<BrowseCommand>().is_err());
        assert!("delete -1".parse::<BrowseCommand>().is_err());
        assert!("delete 1 2".parse::<BrowseCommand>().is_err());
        assert!("dance".parse::<BrowseCommand>().is_err());
    }
}
