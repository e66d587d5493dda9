//! List and show commands.

use fasthome_core::{Device, DeviceApi};

use crate::app::AppContext;
use crate::cli::ShowArgs;
use crate::error::CliError;

/// Run the list command
pub async fn run_list(ctx: &AppContext) -> Result<(), CliError> {
    let formatter = ctx.formatter();
    let devices = ctx.service.fetch_devices().await?;

    println!("{}", formatter.format_devices(&devices));

    Ok(())
}

/// Run the show command
pub async fn run_show(args: ShowArgs, ctx: &AppContext) -> Result<(), CliError> {
    let formatter = ctx.formatter();
    let devices = ctx.service.fetch_devices().await?;
    let device = device_at(&devices, args.index)?;

    println!("{}", formatter.format_device(args.index, device));

    Ok(())
}

pub(crate) fn device_at(devices: &[Device], index: usize) -> Result<&Device, CliError> {
    devices.get(index).ok_or_else(|| {
        CliError::InvalidArgument(format!(
            "no device at index {} ({} device(s) listed)",
            index,
            devices.len()
        ))
    })
}
