//! Invocation of the system `screencapture` tool.

use super::types::{CaptureError, CaptureMode};
use log::{debug, info};
use std::path::Path;
use std::process::Command;

const SCREENCAPTURE_COMMAND: &str = "screencapture";

/// Arguments for the given mode. `-x` suppresses the built-in shutter sound,
/// `-i` enters interactive region selection.
fn capture_args(mode: CaptureMode) -> &'static [&'static str] {
    match mode {
        CaptureMode::FullScreen => &["-x"],
        CaptureMode::Region => &["-i", "-x"],
    }
}

/// Run `screencapture`, writing the image to `dest`.
///
/// A failure to launch the tool is an error. A non-zero exit status is not:
/// the user pressing Escape during region selection also exits non-zero, and
/// the pipeline distinguishes cancellation from success by whether `dest`
/// exists afterwards.
pub fn invoke_screencapture(mode: CaptureMode, dest: &Path) -> Result<(), CaptureError> {
    info!("Capturing {} to {}", mode.label(), dest.display());

    let status = Command::new(SCREENCAPTURE_COMMAND)
        .args(capture_args(mode))
        .arg(dest)
        .status()
        .map_err(|source| CaptureError::Launch {
            command: SCREENCAPTURE_COMMAND,
            source,
        })?;

    if !status.success() {
        debug!("screencapture exited with {}", status);
    }
    Ok(())
}
