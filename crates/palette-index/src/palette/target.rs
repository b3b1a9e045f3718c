//! Target descriptors and their resolution results.

use std::fmt;

use super::entry::PaletteEntry;
use super::error::TargetError;
use crate::color::Rgb;

/// A color to look up in a palette.
///
/// Built explicitly for RGB queries, or parsed from a loose string with
/// [`Target::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Exact RGB triple
    Rgb(Rgb),
    /// Display name, matched case-insensitively
    Name(String),
    /// Numeric palette id
    Id(i64),
}

impl Target {
    /// Parse a loose descriptor.
    ///
    /// `"id:N"` becomes [`Target::Id`] (N must be an integer); any other
    /// string is a [`Target::Name`].
    ///
    /// ```
    /// use palette_index::Target;
    ///
    /// assert_eq!(Target::parse("id:5").unwrap(), Target::Id(5));
    /// assert_eq!(Target::parse("Dark Red").unwrap(), Target::Name("Dark Red".into()));
    /// assert!(Target::parse("id:five").is_err());
    /// ```
    pub fn parse(descriptor: &str) -> Result<Self, TargetError> {
        match descriptor.trim().strip_prefix("id:") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map(Target::Id)
                .map_err(|_| TargetError::InvalidId(descriptor.to_string())),
            None => Ok(Target::Name(descriptor.to_string())),
        }
    }
}

impl From<Rgb> for Target {
    fn from(rgb: Rgb) -> Self {
        Target::Rgb(rgb)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Rgb(rgb) => write!(f, "{}", rgb),
            Target::Name(name) => write!(f, "{}", name),
            Target::Id(id) => write!(f, "id:{}", id),
        }
    }
}

/// How a target was matched to its palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    ExactRgb,
    ById,
    ByName,
}

impl Provenance {
    pub fn as_str(self) -> &'static str {
        match self {
            Provenance::ExactRgb => "exact_rgb",
            Provenance::ById => "by_id",
            Provenance::ByName => "by_name",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A target resolved to its canonical palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub entry: &'a PaletteEntry,
    pub provenance: Provenance,
}

impl Resolution<'_> {
    #[inline]
    pub fn rgb(&self) -> Rgb {
        self.entry.rgb
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.entry.name
    }

    #[inline]
    pub fn premium(&self) -> bool {
        self.entry.premium
    }
}

/// Result of a per-pixel palette lookup.
///
/// `NoMatch` is the "not in palette" sentinel returned when nearest-color
/// fallback is disabled; lookups never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMatch<'a> {
    Exact(&'a PaletteEntry),
    Nearest(&'a PaletteEntry),
    NoMatch,
}

impl<'a> ColorMatch<'a> {
    /// The matched entry, if any.
    pub fn entry(&self) -> Option<&'a PaletteEntry> {
        match self {
            ColorMatch::Exact(entry) | ColorMatch::Nearest(entry) => Some(entry),
            ColorMatch::NoMatch => None,
        }
    }

    /// Short tag: `exact`, `nearest` or `none`.
    pub fn kind(&self) -> &'static str {
        match self {
            ColorMatch::Exact(_) => "exact",
            ColorMatch::Nearest(_) => "nearest",
            ColorMatch::NoMatch => "none",
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, ColorMatch::Exact(_))
    }
}
