//! Publishing captured images to the system clipboard.

use super::types::CaptureError;
use arboard::{Clipboard, ImageData};
use log::info;
use std::borrow::Cow;
use std::path::Path;

/// Replace the clipboard contents with the image at `path`.
///
/// The clipboard is cleared first so stale contents never linger if setting
/// the image fails halfway.
pub fn publish_to_clipboard(path: &Path) -> Result<(), CaptureError> {
    let img = image::open(path)
        .map_err(|err| CaptureError::Clipboard(format!("failed to read {}: {}", path.display(), err)))?
        .into_rgba8();
    let (width, height) = img.dimensions();

    let mut clipboard = Clipboard::new()
        .map_err(|err| CaptureError::Clipboard(format!("failed to open clipboard: {}", err)))?;

    clipboard
        .clear()
        .map_err(|err| CaptureError::Clipboard(format!("failed to clear clipboard: {}", err)))?;

    clipboard
        .set_image(ImageData {
            width: width as usize,
            height: height as usize,
            bytes: Cow::Owned(img.into_raw()),
        })
        .map_err(|err| CaptureError::Clipboard(format!("failed to set image: {}", err)))?;

    info!("Copied {} to clipboard", path.display());
    Ok(())
}
