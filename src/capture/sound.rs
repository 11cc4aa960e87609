//! Capture confirmation sound.

use log::{debug, warn};
use std::process::{Command, Stdio};

/// The system screen-capture chime shipped with CoreAudio.
pub const SCREEN_CAPTURE_SOUND: &str = "/System/Library/Components/CoreAudio.component/Contents/SharedSupport/SystemSounds/system/Screen Capture.aif";

const AFPLAY_COMMAND: &str = "afplay";

/// Play the capture chime. Sound problems are logged and otherwise ignored;
/// they never affect the outcome of a capture.
pub fn play_capture_sound() {
    let result = Command::new(AFPLAY_COMMAND)
        .arg(SCREEN_CAPTURE_SOUND)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(status) if status.success() => debug!("Played capture sound"),
        Ok(status) => warn!("{} exited with {}", AFPLAY_COMMAND, status),
        Err(err) => warn!("Could not play capture sound: {}", err),
    }
}
