//! Swappable side effects for the capture pipeline.
//!
//! Each external effect sits behind a small trait so tests can substitute
//! mocks and count calls instead of spawning processes or touching the real
//! clipboard.

use super::types::{CaptureError, CaptureMode};
use super::{clipboard, invoker, optimize, sound};
use std::path::Path;
use std::sync::Arc;

/// Takes the actual screenshot.
pub trait ScreenGrabber: Send + Sync {
    fn grab(&self, mode: CaptureMode, dest: &Path) -> Result<(), CaptureError>;
}

/// Shrinks the captured file in place.
pub trait ImageOptimizer: Send + Sync {
    fn optimize(&self, path: &Path) -> Result<(), CaptureError>;
}

/// Puts the captured image on the clipboard.
pub trait ClipboardPublisher: Send + Sync {
    fn publish(&self, path: &Path) -> Result<(), CaptureError>;
}

/// Plays the confirmation sound.
pub trait CaptureChime: Send + Sync {
    fn play(&self);
}

/// Bundle of pipeline side effects. Cloning shares the underlying
/// implementations.
#[derive(Clone)]
pub struct CaptureDependencies {
    pub grabber: Arc<dyn ScreenGrabber>,
    pub optimizer: Arc<dyn ImageOptimizer>,
    pub publisher: Arc<dyn ClipboardPublisher>,
    pub chime: Arc<dyn CaptureChime>,
}

impl Default for CaptureDependencies {
    fn default() -> Self {
        Self {
            grabber: Arc::new(DefaultScreenGrabber),
            optimizer: Arc::new(DefaultImageOptimizer),
            publisher: Arc::new(DefaultClipboardPublisher),
            chime: Arc::new(DefaultCaptureChime),
        }
    }
}

struct DefaultScreenGrabber;

impl ScreenGrabber for DefaultScreenGrabber {
    fn grab(&self, mode: CaptureMode, dest: &Path) -> Result<(), CaptureError> {
        invoker::invoke_screencapture(mode, dest)
    }
}

struct DefaultImageOptimizer;

impl ImageOptimizer for DefaultImageOptimizer {
    fn optimize(&self, path: &Path) -> Result<(), CaptureError> {
        optimize::optimize_png(path)
    }
}

struct DefaultClipboardPublisher;

impl ClipboardPublisher for DefaultClipboardPublisher {
    fn publish(&self, path: &Path) -> Result<(), CaptureError> {
        clipboard::publish_to_clipboard(path)
    }
}

struct DefaultCaptureChime;

impl CaptureChime for DefaultCaptureChime {
    fn play(&self) {
        sound::play_capture_sound();
    }
}
