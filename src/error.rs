use std::fmt;

use palette_index::{PaletteError, TargetError};
use thiserror::Error;

use crate::models::ColorCount;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Palette error: {0}")]
    Palette(#[from] PaletteError),

    #[error("Target error: {0}")]
    Target(#[from] TargetError),

    #[error(transparent)]
    Compliance(#[from] ComplianceError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Image colors that are not in the palette.
///
/// Carries every offending color with its pixel count, in listing order,
/// never just the first one found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ComplianceError {
    pub offenders: Vec<ColorCount>,
}

impl fmt::Display for ComplianceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.offenders.len();
        write!(
            f,
            "{n} color{} outside the palette:",
            if n == 1 { "" } else { "s" }
        )?;
        for c in &self.offenders {
            write!(
                f,
                "\n  rgb({:>3}, {:>3}, {:>3}) {}: {} px",
                c.rgb.r,
                c.rgb.g,
                c.rgb.b,
                c.rgb.to_hex(),
                c.count
            )?;
        }
        Ok(())
    }
}
