//! Error types for palette operations
//!
//! This module provides error types for color parsing, palette loading and
//! target resolution.

use std::fmt;
use std::num::ParseIntError;
use std::path::PathBuf;

use crate::color::Rgb;

/// Error type for parsing hex color strings.
///
/// Returned when parsing a hex color string fails, either due to
/// invalid length or invalid hexadecimal characters.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    InvalidLength,
    /// Invalid hexadecimal character encountered
    InvalidHex(ParseIntError),
}

impl From<ParseIntError> for ParseColorError {
    fn from(err: ParseIntError) -> Self {
        ParseColorError::InvalidHex(err)
    }
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::InvalidLength => {
                write!(f, "invalid hex color length (expected 3 or 6 characters)")
            }
            ParseColorError::InvalidHex(err) => {
                write!(f, "invalid hex character: {}", err)
            }
        }
    }
}

impl std::error::Error for ParseColorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseColorError::InvalidHex(err) => Some(err),
            _ => None,
        }
    }
}

/// Error type for palette loading.
///
/// Any of these aborts the load; a palette is never partially built.
#[derive(Debug)]
pub enum PaletteError {
    /// The palette file could not be read
    Io {
        /// Path that failed to open
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
    /// The palette is not valid JSON or not an array of objects
    Json(serde_json::Error),
    /// No entries in the palette
    EmptyPalette,
    /// Entry has neither `color` nor `rgb`
    MissingColor {
        /// Position of the entry in the file
        index: usize,
    },
    /// Entry lacks a required field
    MissingField {
        /// Position of the entry in the file
        index: usize,
        /// Name of the missing field
        field: &'static str,
    },
    /// `rgb` is not an array of three integers in 0..=255
    InvalidRgb {
        /// Position of the entry in the file
        index: usize,
    },
    /// `color` is not a valid hex string
    ParseColor {
        /// Position of the entry in the file
        index: usize,
        /// Parse failure
        source: ParseColorError,
    },
}

impl From<serde_json::Error> for PaletteError {
    fn from(err: serde_json::Error) -> Self {
        PaletteError::Json(err)
    }
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::Io { path, source } => {
                write!(f, "cannot read palette {}: {}", path.display(), source)
            }
            PaletteError::Json(err) => {
                write!(f, "malformed palette JSON: {}", err)
            }
            PaletteError::EmptyPalette => {
                write!(f, "palette cannot be empty")
            }
            PaletteError::MissingColor { index } => {
                write!(f, "palette entry {} has neither `color` nor `rgb`", index)
            }
            PaletteError::MissingField { index, field } => {
                write!(f, "palette entry {} is missing `{}`", index, field)
            }
            PaletteError::InvalidRgb { index } => {
                write!(
                    f,
                    "palette entry {} has an invalid `rgb` (expected 3 integers in 0..=255)",
                    index
                )
            }
            PaletteError::ParseColor { index, source } => {
                write!(f, "palette entry {} has an invalid color: {}", index, source)
            }
        }
    }
}

impl std::error::Error for PaletteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PaletteError::Io { source, .. } => Some(source),
            PaletteError::Json(err) => Some(err),
            PaletteError::ParseColor { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Error type for resolving a target against a palette.
///
/// Named and id targets never fall back to a nearest match; a miss is
/// always an error.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetError {
    /// `id:` descriptor whose suffix is not an integer
    InvalidId(String),
    /// RGB not present in the palette
    RgbNotFound(Rgb),
    /// No entry carries this id
    IdNotFound(i64),
    /// No entry carries this name (case-insensitive)
    NameNotFound(String),
}

impl fmt::Display for TargetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetError::InvalidId(raw) => {
                write!(f, "invalid palette id {:?} (expected id:<integer>)", raw)
            }
            TargetError::RgbNotFound(rgb) => {
                write!(
                    f,
                    "RGB {} is not in the palette (expected hex {})",
                    rgb,
                    rgb.to_hex()
                )
            }
            TargetError::IdNotFound(id) => {
                write!(f, "no palette entry with id {}", id)
            }
            TargetError::NameNotFound(name) => {
                write!(f, "no palette entry named {:?}", name)
            }
        }
    }
}

impl std::error::Error for TargetError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_error_messages() {
        assert_eq!(
            TargetError::RgbNotFound(Rgb::new(1, 2, 3)).to_string(),
            "RGB (1, 2, 3) is not in the palette (expected hex #010203)"
        );
        assert_eq!(
            TargetError::IdNotFound(99).to_string(),
            "no palette entry with id 99"
        );
        assert_eq!(
            TargetError::NameNotFound("Teal".to_string()).to_string(),
            "no palette entry named \"Teal\""
        );
        assert_eq!(
            TargetError::InvalidId("id:x".to_string()).to_string(),
            "invalid palette id \"id:x\" (expected id:<integer>)"
        );
    }

    #[test]
    fn test_palette_error_messages() {
        assert_eq!(
            PaletteError::MissingField {
                index: 4,
                field: "name"
            }
            .to_string(),
            "palette entry 4 is missing `name`"
        );
        assert_eq!(
            PaletteError::EmptyPalette.to_string(),
            "palette cannot be empty"
        );
    }

    #[test]
    fn test_parse_color_source_chain() {
        use std::error::Error;

        let err = PaletteError::ParseColor {
            index: 0,
            source: ParseColorError::InvalidLength,
        };
        assert!(err.source().is_some());
        assert!(PaletteError::EmptyPalette.source().is_none());
    }
}
