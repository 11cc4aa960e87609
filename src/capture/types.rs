//! Data types for the screenshot capture pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Which kind of screenshot to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    /// Capture the entire screen.
    FullScreen,
    /// Let the user drag out a rectangular region.
    Region,
}

impl CaptureMode {
    /// Human-readable label used in menus and log lines.
    pub fn label(&self) -> &'static str {
        match self {
            CaptureMode::FullScreen => "Full Screen",
            CaptureMode::Region => "Selected Region",
        }
    }
}

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Image captured, optimized (best effort) and placed on the clipboard.
    Completed(PathBuf),
    /// The user dismissed the interactive selection; nothing happened.
    Cancelled,
    /// The run failed; the message was already reported through the sink.
    Failed(String),
}

/// Errors from the capture pipeline components.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Failed to launch {command}: {source}")]
    Launch {
        command: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create screenshot folder {path}: {source}")]
    CreateFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to re-encode image {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write optimized image {path}: {source}")]
    WriteImage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Clipboard operation failed: {0}")]
    Clipboard(String),

    #[error("Capture requests are no longer being accepted")]
    WorkerStopped,
}
