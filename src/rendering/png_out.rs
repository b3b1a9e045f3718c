//! RGBA PNG output.

use image::RgbaImage;
use std::io::Cursor;

use crate::error::ScanError;

/// Encode an RGBA8 image as PNG.
///
/// Fast settings; pass `optimize` to re-compress with oxipng.
pub fn encode_rgba_png(image: &RgbaImage, optimize: bool) -> Result<Vec<u8>, ScanError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, image.width(), image.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| ScanError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(image.as_raw())
            .map_err(|e| ScanError::PngEncode(e.to_string()))?;
    }
    let png_bytes = buf.into_inner();

    if !optimize {
        return Ok(png_bytes);
    }

    // Fully transparent pixels keep their RGB: the mask layer stores the
    // source color under alpha 0.
    let optimized = oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    );
    match optimized {
        Ok(bytes) => Ok(bytes),
        Err(e) => {
            tracing::warn!(%e, "oxipng failed, keeping fast-encoded PNG");
            Ok(png_bytes)
        }
    }
}
