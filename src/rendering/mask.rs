//! Pixel masks and the mask/preview layers derived from them.

use image::{Rgba, RgbImage, RgbaImage};
use palette_index::Rgb;

/// Boolean grid with the source image's dimensions, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl PixelMask {
    /// Mark every pixel whose channels are each within `tolerance` of
    /// `target`. Tolerance 0 is exact equality.
    pub fn build(image: &RgbImage, target: Rgb, tolerance: u8) -> Self {
        let bits = image
            .pixels()
            .map(|p| Rgb::from_bytes(p.0).within(target, tolerance))
            .collect();
        Self {
            width: image.width(),
            height: image.height(),
            bits,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.bits[(y as usize) * (self.width as usize) + x as usize]
    }

    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Matching `(x, y)` positions, row by row.
    pub fn positions(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let w = self.width as usize;
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, hit)| **hit)
            .map(move |(i, _)| ((i % w) as u32, (i / w) as u32))
    }
}

/// Source pixels with alpha 255 where the mask is set and 0 elsewhere.
pub fn mask_layer(image: &RgbImage, mask: &PixelMask) -> RgbaImage {
    RgbaImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b] = image.get_pixel(x, y).0;
        let a = if mask.get(x, y) { 255 } else { 0 };
        Rgba([r, g, b, a])
    })
}

/// Dimmed copy of the image with the mask layer composited back on top.
///
/// The opaque image goes under a black layer of `overlay_alpha`, then
/// `layer` is composited over the result.
pub fn preview(image: &RgbImage, layer: &RgbaImage, overlay_alpha: u8) -> RgbaImage {
    let overlay = Rgba([0, 0, 0, overlay_alpha]);
    RgbaImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b] = image.get_pixel(x, y).0;
        let dimmed = composite_over(Rgba([r, g, b, 255]), overlay);
        composite_over(dimmed, *layer.get_pixel(x, y))
    })
}

/// Porter-Duff "source over destination" with straight (unpremultiplied)
/// alpha, rounded to the nearest byte.
pub fn composite_over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = src.0[3] as u32;
    let da = dst.0[3] as u32;

    // out_a = sa + da * (1 - sa), scaled by 255
    let out_a255 = sa * 255 + da * (255 - sa);
    if out_a255 == 0 {
        return Rgba([0, 0, 0, 0]);
    }

    let mut out = [0u8; 4];
    for c in 0..3 {
        let num = src.0[c] as u32 * sa * 255 + dst.0[c] as u32 * da * (255 - sa);
        out[c] = ((num + out_a255 / 2) / out_a255) as u8;
    }
    out[3] = ((out_a255 + 127) / 255) as u8;
    Rgba(out)
}
