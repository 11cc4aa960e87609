//! In-place PNG re-encoding to shrink captured files.

use super::types::CaptureError;
use image::ImageError;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Re-encode the PNG at `path` with the best compression level, overwriting
/// the original.
///
/// A missing file is a silent no-op: the capture may have been cancelled
/// between the existence check and this call, and there is nothing useful to
/// tell the user.
pub fn optimize_png(path: &Path) -> Result<(), CaptureError> {
    let img = match image::open(path) {
        Ok(img) => img,
        Err(ImageError::IoError(err)) if err.kind() == ErrorKind::NotFound => {
            debug!("Nothing to optimize, {} does not exist", path.display());
            return Ok(());
        }
        Err(source) => {
            return Err(CaptureError::Decode {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let mut encoded = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut encoded, CompressionType::Best, FilterType::Adaptive);
    img.write_with_encoder(encoder)
        .map_err(|source| CaptureError::Encode {
            path: path.to_path_buf(),
            source,
        })?;

    fs::write(path, encoded).map_err(|source| CaptureError::WriteImage {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Optimized {}", path.display());
    Ok(())
}
