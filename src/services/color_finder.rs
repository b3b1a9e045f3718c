use image::RgbImage;
use palette_index::{Palette, PaletteEntry, Provenance, Target};
use std::path::{Path, PathBuf};

use crate::error::ScanError;
use crate::models::{safe_name, AppConfig, OutputName};
use crate::rendering::{self, CoordRow, PixelMask};

/// Per-run options for [`ColorFinder::find`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindOptions {
    /// Added to local pixel coordinates to get canvas coordinates
    pub canvas_origin: (i64, i64),
    /// Per-channel band around the target; 0 means exact match
    pub tolerance: u8,
    /// Leading part of the output tag
    pub prefix: String,
}

/// Outcome of one search, with the paths of everything written.
#[derive(Debug, Clone)]
pub struct FindReport {
    pub entry: PaletteEntry,
    pub provenance: Provenance,
    pub count: usize,
    pub mask: PixelMask,
    pub rows: Vec<CoordRow>,
    pub csv_path: PathBuf,
    pub mask_path: PathBuf,
    pub preview_path: PathBuf,
}

/// Locates every pixel of one palette color in an image.
pub struct ColorFinder {
    output_dir: PathBuf,
    overlay_alpha: u8,
    optimize_png: bool,
}

impl ColorFinder {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            output_dir: config.find_output_dir.clone(),
            overlay_alpha: config.overlay_alpha,
            optimize_png: config.optimize_png,
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Resolve `target`, scan the image and write the coordinate table, the
    /// mask layer and the preview.
    ///
    /// Nothing is written when the target does not resolve or the image
    /// cannot be decoded.
    pub fn find(
        &self,
        palette: &Palette,
        image_path: &Path,
        target: &Target,
        options: &FindOptions,
    ) -> Result<FindReport, ScanError> {
        let resolution = palette.resolve(target)?;
        let entry = resolution.entry.clone();
        tracing::debug!(
            target = %target,
            name = %entry.name,
            rgb = %entry.rgb,
            provenance = resolution.provenance.as_str(),
            "Resolved target"
        );

        let image = rendering::load_rgb(image_path)?;
        let mask = PixelMask::build(&image, entry.rgb, options.tolerance);

        let (ox, oy) = options.canvas_origin;
        let rows: Vec<CoordRow> = mask
            .positions()
            .map(|(x, y)| {
                let [r, g, b] = image.get_pixel(x, y).0;
                CoordRow {
                    x,
                    y,
                    canvas_x: x as i64 + ox,
                    canvas_y: y as i64 + oy,
                    r,
                    g,
                    b,
                    name: entry.name.clone(),
                    premium: entry.premium,
                }
            })
            .collect();

        let rgb_tag = format!("{}_{}_{}", entry.rgb.r, entry.rgb.g, entry.rgb.b);
        let safe = safe_name(&entry.name);
        let name = OutputName::new(
            image_path,
            &[options.prefix.as_str(), safe.as_str(), "rgb", rgb_tag.as_str()],
        );
        let csv_path = name.path_in(&self.output_dir, "coords", "csv");
        let mask_path = name.path_in(&self.output_dir, "mask", "png");
        let preview_path = name.path_in(&self.output_dir, "preview", "png");
        self.write_outputs(
            &image,
            &mask,
            &rows,
            [csv_path.as_path(), mask_path.as_path(), preview_path.as_path()],
        )?;

        tracing::info!(
            image = %image_path.display(),
            name = %entry.name,
            matches = rows.len(),
            dir = %self.output_dir.display(),
            "Wrote color finder outputs"
        );

        Ok(FindReport {
            count: rows.len(),
            entry,
            provenance: resolution.provenance,
            mask,
            rows,
            csv_path,
            mask_path,
            preview_path,
        })
    }

    /// Encode both PNGs, then write the table and the images.
    ///
    /// Encoding happens before anything touches the output directory, so
    /// an encoding failure leaves no partial set of files.
    fn write_outputs(
        &self,
        image: &RgbImage,
        mask: &PixelMask,
        rows: &[CoordRow],
        [csv_path, mask_path, preview_path]: [&Path; 3],
    ) -> Result<(), ScanError> {
        let layer = rendering::mask_layer(image, mask);
        let mask_png = rendering::encode_rgba_png(&layer, self.optimize_png)?;
        let preview = rendering::preview(image, &layer, self.overlay_alpha);
        let preview_png = rendering::encode_rgba_png(&preview, self.optimize_png)?;

        std::fs::create_dir_all(&self.output_dir)?;
        rendering::write_csv(csv_path, rows)?;
        std::fs::write(mask_path, &mask_png)?;
        std::fs::write(preview_path, &preview_png)?;
        tracing::debug!(
            mask = %mask_path.display(),
            preview = %preview_path.display(),
            "Wrote mask and preview"
        );
        Ok(())
    }
}
