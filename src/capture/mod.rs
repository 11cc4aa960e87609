//! Screenshot capture pipeline.
//!
//! A capture runs through four stages: `screencapture` writes the PNG,
//! the optimizer re-encodes it in place, the publisher puts it on the
//! clipboard, and the chime confirms. [`CapturePipeline`] strings them
//! together; the [`CaptureDependencies`] bundle keeps each stage mockable.

pub mod clipboard;
pub mod file;
pub mod invoker;
pub mod optimize;
pub mod sound;
pub mod types;

mod dependencies;
mod pipeline;


pub use dependencies::{
    CaptureChime, CaptureDependencies, ClipboardPublisher, ImageOptimizer, ScreenGrabber,
};
pub use pipeline::CapturePipeline;
pub use types::{CaptureError, CaptureMode, CaptureOutcome};
