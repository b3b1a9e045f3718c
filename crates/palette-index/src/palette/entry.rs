//! Palette entries and their JSON representation.

use serde::Deserialize;

use super::error::PaletteError;
use crate::color::Rgb;

/// One allowed color with its metadata.
///
/// Entries are immutable once a [`Palette`](super::Palette) is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Canonical color
    pub rgb: Rgb,
    /// Display name as written in the palette file
    pub name: String,
    /// Numeric id as written in the palette file
    pub id: i64,
    /// Premium flag (meaning defined by whoever publishes the palette)
    pub premium: bool,
}

impl PaletteEntry {
    pub fn new(rgb: Rgb, name: impl Into<String>, id: i64, premium: bool) -> Self {
        Self {
            rgb,
            name: name.into(),
            id,
            premium,
        }
    }

    /// Uppercase `#RRGGBB` form of [`Self::rgb`].
    pub fn hex(&self) -> String {
        self.rgb.to_hex()
    }
}

/// Entry as it appears in a palette file.
///
/// Every field is optional here so that a missing field is reported as a
/// [`PaletteError`] naming the entry, not as a bare serde message.
#[derive(Debug, Deserialize)]
pub(super) struct RawEntry {
    color: Option<String>,
    rgb: Option<Vec<i64>>,
    name: Option<String>,
    id: Option<i64>,
    #[serde(rename = "isPremium")]
    is_premium: Option<bool>,
    premium: Option<bool>,
}

impl RawEntry {
    /// Validate and convert into a [`PaletteEntry`].
    ///
    /// `rgb` takes precedence over `color` when a file carries both.
    pub(super) fn into_entry(self, index: usize) -> Result<PaletteEntry, PaletteError> {
        let rgb = match (self.rgb, self.color) {
            (Some(channels), _) => rgb_from_channels(&channels)
                .ok_or(PaletteError::InvalidRgb { index })?,
            (None, Some(hex)) => hex
                .parse::<Rgb>()
                .map_err(|source| PaletteError::ParseColor { index, source })?,
            (None, None) => return Err(PaletteError::MissingColor { index }),
        };
        let name = self.name.ok_or(PaletteError::MissingField {
            index,
            field: "name",
        })?;
        let id = self.id.ok_or(PaletteError::MissingField { index, field: "id" })?;
        let premium = self.is_premium.or(self.premium).unwrap_or(false);

        Ok(PaletteEntry {
            rgb,
            name,
            id,
            premium,
        })
    }
}

fn rgb_from_channels(channels: &[i64]) -> Option<Rgb> {
    match channels {
        [r, g, b] => Some(Rgb::new(
            u8::try_from(*r).ok()?,
            u8::try_from(*g).ok()?,
            u8::try_from(*b).ok()?,
        )),
        _ => None,
    }
}
