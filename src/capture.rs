//! Capturing the schedule screenshot with the user's own screenshot tool.

use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context, Result};

use crate::config::Config;

/// Builds the screenshot invocation: the configured flags first, the output
/// path last, the way xfce4-screenshooter and friends expect.
pub fn screenshot_command(config: &Config, output: &Path) -> Command {
    let mut command = Command::new(&config.screenshotter);
    for arg in config.screenshot_args.split_whitespace() {
        command.arg(arg);
    }
    command.arg(output);
    command
}

/// Runs the screenshot tool and waits for the user to select the schedule
/// region. Some tools exit 0 on a cancelled selection, so a missing output
/// file is also treated as failure.
pub fn capture_schedule(config: &Config, output: &Path) -> Result<()> {
    println!("Select the schedule region: all seven day columns, Monday through Sunday.");
    let status = screenshot_command(config, output)
        .status()
        .with_context(|| format!("failed to run {:?}", config.screenshotter))?;
    if !status.success() {
        bail!("{} exited with {}", config.screenshotter, status);
    }
    if !output.exists() {
        bail!(
            "{} wrote no image to {}; was the selection cancelled?",
            config.screenshotter,
            output.display()
        );
    }
    Ok(())
}
