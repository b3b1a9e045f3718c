use palette_index::{Palette, Rgb};
use std::path::Path;

use crate::error::ScanError;
use crate::rendering;

/// Colors in the image that the palette does not contain, sorted and
/// deduplicated. An empty result means the image is fully in palette.
pub fn verify_image_palette(image_path: &Path, palette: &Palette) -> Result<Vec<Rgb>, ScanError> {
    let image = rendering::load_rgb(image_path)?;
    let unknown = palette.unknown_colors(rendering::pixels(&image));
    if unknown.is_empty() {
        tracing::debug!(image = %image_path.display(), "All colors in palette");
    } else {
        tracing::info!(
            image = %image_path.display(),
            unknown = unknown.len(),
            "Image has colors outside the palette"
        );
    }
    Ok(unknown)
}
