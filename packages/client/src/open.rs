use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::Error;

/// Open `path` with the desktop's default application.
pub fn open_with_system(path: &Path) -> Result<(), Error> {
    let mut command = opener_command(path);
    tracing::debug!(?command, "opening file");

    let status = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| Error::Open {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(Error::Open {
            path: path.to_path_buf(),
            message: format!("opener exited with {}", status),
        })
    }
}

#[cfg(target_os = "macos")]
fn opener_command(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(path);
    command
}

#[cfg(target_os = "windows")]
fn opener_command(path: &Path) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(path);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command(path: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}
