//! The capture pipeline: grab, optimize, copy, chime.

use super::dependencies::CaptureDependencies;
use super::file;
use super::types::{CaptureMode, CaptureOutcome};
use crate::notify::NotifySink;
use log::{info, warn};
use std::path::Path;
use std::sync::Arc;

/// Runs one capture from shutter to clipboard.
///
/// Every failure is reported through the [`NotifySink`] before the outcome is
/// returned, so callers only need to act on the outcome itself.
pub struct CapturePipeline {
    deps: CaptureDependencies,
    notifier: Arc<dyn NotifySink>,
}

impl CapturePipeline {
    pub fn new(notifier: Arc<dyn NotifySink>) -> Self {
        Self::with_dependencies(CaptureDependencies::default(), notifier)
    }

    pub fn with_dependencies(deps: CaptureDependencies, notifier: Arc<dyn NotifySink>) -> Self {
        Self { deps, notifier }
    }

    /// Capture a screenshot into `output_folder`.
    ///
    /// An interactive capture the user dismissed leaves no file behind; that
    /// counts as [`CaptureOutcome::Cancelled`] and stays completely silent.
    /// An optimize failure is reported but does not abort the run, since the
    /// unoptimized capture is still perfectly usable.
    pub fn run(&self, mode: CaptureMode, output_folder: &Path) -> CaptureOutcome {
        let dest = file::destination_path(output_folder);

        if let Err(err) = self.deps.grabber.grab(mode, &dest) {
            let message = format!("Failed to capture screenshot: {}", err);
            self.notifier.notify("Error", &message);
            return CaptureOutcome::Failed(message);
        }

        if !dest.exists() {
            info!("Capture cancelled, no file at {}", dest.display());
            return CaptureOutcome::Cancelled;
        }

        if let Err(err) = self.deps.optimizer.optimize(&dest) {
            warn!("Optimization failed for {}: {}", dest.display(), err);
            self.notifier
                .notify("Error", &format!("Failed to optimize image: {}", err));
        }

        if let Err(err) = self.deps.publisher.publish(&dest) {
            let message = format!("Failed to copy image to clipboard: {}", err);
            self.notifier.notify("Error", &message);
            return CaptureOutcome::Failed(message);
        }

        self.deps.chime.play();
        info!("Capture complete: {}", dest.display());
        CaptureOutcome::Completed(dest)
    }
}
