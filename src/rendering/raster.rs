//! Image input.
//!
//! Every input is flattened to 8-bit RGB; alpha on input is ignored.

use image::RgbImage;
use palette_index::Rgb;
use std::path::Path;

use crate::error::ScanError;

/// Decode an image file of any supported format to RGB8.
pub fn load_rgb(path: &Path) -> Result<RgbImage, ScanError> {
    let image = image::open(path)?.into_rgb8();
    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "Decoded image"
    );
    Ok(image)
}

/// Pixels in row-major order.
pub fn pixels(image: &RgbImage) -> impl Iterator<Item = Rgb> + '_ {
    image.pixels().map(|p| Rgb::from_bytes(p.0))
}
