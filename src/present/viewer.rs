//! Hand a written page to the platform's default viewer.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::PresentError;

fn opener_command(path: &Path) -> Command {
    if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]).arg(path);
        command
    } else if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg(path);
        command
    } else {
        let mut command = Command::new("xdg-open");
        command.arg(path);
        command
    }
}

/// Launch the viewer without waiting for it to exit.
pub fn open_in_viewer(path: &Path) -> Result<(), PresentError> {
    let mut command = opener_command(path);
    debug!(?command, "launching viewer");
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|err| PresentError::Viewer {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })
}
