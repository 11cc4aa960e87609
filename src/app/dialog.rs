//! Output folder prompt.
//!
//! Shown through `osascript` so there is no extra windowing dependency just
//! for one text field. Cancel exits non-zero, which maps to "no change".

use crate::capture::file::expand_tilde;
use log::debug;
use std::path::PathBuf;
use std::process::Command;
use thiserror::Error;

const OSASCRIPT_COMMAND: &str = "osascript";

#[derive(Debug, Error)]
pub enum DialogError {
    #[error("Failed to launch {OSASCRIPT_COMMAND}: {0}")]
    Launch(#[source] std::io::Error),

    #[error("Unexpected dialog output: {0:?}")]
    UnexpectedOutput(String),
}

/// Ask the user for a new output folder, prefilled with the current one.
///
/// Returns `Ok(None)` when the dialog was cancelled, `Ok(Some(input))` with
/// the raw text otherwise.
pub fn prompt_output_folder(current: &std::path::Path) -> Result<Option<String>, DialogError> {
    let output = Command::new(OSASCRIPT_COMMAND)
        .arg("-e")
        .arg(dialog_script(&current.to_string_lossy()))
        .output()
        .map_err(DialogError::Launch)?;

    if !output.status.success() {
        debug!("Folder dialog cancelled");
        return Ok(None);
    }

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    match parse_dialog_reply(&stdout) {
        Some(text) => Ok(Some(text)),
        None => Err(DialogError::UnexpectedOutput(stdout)),
    }
}

fn dialog_script(current: &str) -> String {
    let escaped = current.replace('\\', "\\\\").replace('"', "\\\"");
    format!(
        "display dialog \"Enter the path for the screenshot output folder:\" \
         default answer \"{}\" with title \"Set Output Folder\" \
         buttons {{\"Cancel\", \"Set\"}} default button \"Set\"",
        escaped
    )
}

/// Pull the entered text out of the osascript record reply, e.g.
/// `button returned:Set, text returned:/tmp/shots`.
fn parse_dialog_reply(stdout: &str) -> Option<String> {
    stdout
        .split_once("text returned:")
        .map(|(_, text)| text.trim_end_matches('\n').to_string())
}

/// Interpret the dialog text as a folder path.
///
/// Blank input means "keep the current folder". A leading tilde is expanded
/// against the home directory.
pub fn parse_folder_input(input: &str) -> Option<PathBuf> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(expand_tilde(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_parsing_extracts_entered_text() {
        let reply = "button returned:Set, text returned:/tmp/shots\n";
        assert_eq!(parse_dialog_reply(reply), Some("/tmp/shots".to_string()));
    }

    #[test]
    fn reply_without_text_field_is_rejected() {
        assert_eq!(parse_dialog_reply("button returned:Set\n"), None);
    }

    #[test]
    fn blank_input_means_no_change() {
        assert_eq!(parse_folder_input(""), None);
        assert_eq!(parse_folder_input("   "), None);
    }

    #[test]
    fn tilde_input_is_expanded() {
        let parsed = parse_folder_input("~/Pictures/Shots").unwrap();
        assert!(!parsed.to_string_lossy().starts_with('~'));
    }

    #[test]
    fn plain_path_passes_through() {
        assert_eq!(
            parse_folder_input(" /tmp/shots "),
            Some(PathBuf::from("/tmp/shots"))
        );
    }

    #[test]
    fn script_escapes_quotes_in_current_path() {
        let script = dialog_script("/tmp/\"odd\" name");
        assert!(script.contains("\\\"odd\\\""));
    }
}
