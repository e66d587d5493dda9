//! Command implementations.

pub mod browse;
pub mod delete;
pub mod list;

pub use browse::run_browse;
pub use delete::run_delete;
pub use list::{run_list, run_show};

use std::io::{self, Write};

use fasthome_core::StoreEvent;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// Ask a yes/no question on the terminal. Defaults to no.
pub(crate) async fn confirm(prompt: &str) -> io::Result<bool> {
    eprint!("{} [y/N] ", prompt);
    io::stderr().flush()?;

    let mut answer = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut answer)
        .await?;

    Ok(is_yes(&answer))
}

pub(crate) fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Drain queued store events and return the last error message, if any.
pub(crate) fn take_error(events: &mut mpsc::UnboundedReceiver<StoreEvent>) -> Option<String> {
    let mut error = None;
    while let Ok(event) = events.try_recv() {
        if let StoreEvent::Error(message) = event {
            error = Some(message);
        }
    }
    error
}
