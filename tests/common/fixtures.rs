//! Test fixtures: palettes and synthetic images written to a scratch dir.

use image::RgbImage;
use palette_index::Palette;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Named colors used across the fixtures
pub mod colors {
    pub const BLACK: [u8; 3] = [0, 0, 0];
    pub const WHITE: [u8; 3] = [255, 255, 255];
    pub const RED: [u8; 3] = [237, 28, 36];
    pub const TEAL: [u8; 3] = [16, 174, 166];
    /// Not in the test palette
    pub const OFF_WHITE: [u8; 3] = [250, 250, 250];
}

/// Small palette in the same shape as the shipped one.
pub const PALETTE_JSON: &str = r##"[
    {"id": 1, "name": "Black", "color": "#000000", "rgb": [0, 0, 0]},
    {"id": 5, "name": "White", "color": "#FFFFFF", "rgb": [255, 255, 255]},
    {"id": 7, "name": "Red", "color": "#ED1C24"},
    {"id": 16, "name": "Teal", "rgb": [16, 174, 166], "isPremium": true}
]"##;

/// Scratch directory holding a palette file and any images a test writes.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("palette.json"), PALETTE_JSON)
            .expect("Failed to write palette");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn palette_path(&self) -> PathBuf {
        self.path().join("palette.json")
    }

    pub fn palette(&self) -> Palette {
        Palette::load(self.palette_path()).expect("Failed to load palette")
    }

    pub fn out_dir(&self) -> PathBuf {
        self.path().join("out")
    }

    /// Write an image given as rows of pixels.
    pub fn write_image(&self, name: &str, rows: &[&[[u8; 3]]]) -> PathBuf {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len()) as u32;
        let image = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb(rows[y as usize][x as usize])
        });
        let path = self.path().join(name);
        image.save(&path).expect("Failed to write image");
        path
    }

    /// `[[black, white], [black, red]]`
    pub fn two_by_two(&self) -> PathBuf {
        use colors::*;
        self.write_image("grid.png", &[&[BLACK, WHITE], &[BLACK, RED]])
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}
