//! Destination paths for captured screenshots.

use super::types::CaptureError;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Filename timestamp, second resolution
/// (e.g. `Screenshot-2026-08-26-14.03.09.png`).
const FILENAME_FORMAT: &str = "Screenshot-%Y-%m-%d-%H.%M.%S.png";

/// Generate the filename for a capture taken now.
pub fn capture_filename() -> String {
    Local::now().format(FILENAME_FORMAT).to_string()
}

/// Destination path for a capture taken now, under `folder`.
pub fn destination_path(folder: &Path) -> PathBuf {
    folder.join(capture_filename())
}

/// Ensure the output folder exists, creating it if necessary.
///
/// Returns `true` when the folder was just created, so the caller can tell
/// the user about it.
pub fn ensure_folder_exists(folder: &Path) -> Result<bool, CaptureError> {
    if folder.exists() {
        return Ok(false);
    }

    log::info!("Creating screenshot folder: {}", folder.display());
    fs::create_dir_all(folder).map_err(|source| CaptureError::CreateFolder {
        path: folder.to_path_buf(),
        source,
    })?;
    Ok(true)
}

/// Expand a leading tilde in user-entered paths.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn capture_filename_has_prefix_and_extension() {
        let filename = capture_filename();
        assert!(filename.starts_with("Screenshot-"));
        assert!(filename.ends_with(".png"));
        // Timestamped to the second: Screenshot-YYYY-MM-DD-HH.MM.SS.png
        assert_eq!(filename.len(), "Screenshot-2026-08-26-14.03.09.png".len());
    }

    #[test]
    fn destination_path_lands_in_folder() {
        let path = destination_path(Path::new("/tmp/shots"));
        assert!(path.starts_with("/tmp/shots"));
    }

    #[test]
    fn ensure_folder_exists_reports_creation() {
        let temp = TempDir::new().unwrap();
        let folder = temp.path().join("shots");

        assert!(ensure_folder_exists(&folder).unwrap());
        assert!(folder.is_dir());
        // Second call finds it already there.
        assert!(!ensure_folder_exists(&folder).unwrap());
    }

    #[test]
    fn expand_tilde_resolves_home() {
        let expanded = expand_tilde("~/Screenshots");
        assert!(!expanded.to_string_lossy().starts_with('~'));

        let no_tilde = expand_tilde("/absolute/path");
        assert_eq!(no_tilde, PathBuf::from("/absolute/path"));
    }
}
