#![allow(clippy::module_inception)]

//! palette-index: fixed color palettes with exact and nearest-color lookup
//!
//! A palette is an externally supplied list of allowed colors, each with a
//! display name, a numeric id and a premium flag. This crate loads such a
//! list from JSON and answers the questions image tooling asks of it:
//!
//! - Is this pixel color a palette color? ([`Palette::get`])
//! - Which entry does "Dark Red", "id:5" or `(15, 183, 154)` mean?
//!   ([`Palette::resolve`])
//! - Which entry is closest to this off-palette color?
//!   ([`Palette::color_info`], [`Palette::find_nearest`])
//! - Which colors in this image are not allowed? ([`Palette::unknown_colors`])
//!
//! # Quick Start
//!
//! ```
//! use palette_index::{ColorMatch, Palette, Rgb, Target};
//!
//! let palette = Palette::from_json_str(r##"[
//!     {"color": "#000000", "name": "Black", "id": 1},
//!     {"color": "#FFFFFF", "name": "White", "id": 2}
//! ]"##).unwrap();
//!
//! let white = palette.resolve(&Target::parse("id:2").unwrap()).unwrap();
//! assert_eq!(white.rgb(), Rgb::new(255, 255, 255));
//!
//! let grey = palette.color_info(Rgb::new(100, 100, 100), true);
//! assert_eq!(grey.entry().unwrap().name, "Black");
//! assert_eq!(palette.color_info(Rgb::new(100, 100, 100), false), ColorMatch::NoMatch);
//! ```
//!
//! # Matching Rules
//!
//! | Query | Rule | Miss |
//! |-------|------|------|
//! | [`Target::Rgb`] | exact RGB index lookup | [`TargetError::RgbNotFound`] |
//! | [`Target::Id`] | first entry with that id | [`TargetError::IdNotFound`] |
//! | [`Target::Name`] | first entry, case-insensitive | [`TargetError::NameNotFound`] |
//! | [`Palette::color_info`] | exact, then optional nearest | [`ColorMatch::NoMatch`] |
//!
//! Nearest matching minimizes squared Euclidean distance in plain RGB.
//! Palettes here are small (tens to low hundreds of entries), so a linear
//! scan is used and ties go to the entry listed first.
//!
//! When a file defines the same RGB twice, the RGB index points at the
//! later entry. Name and id lookups scan the list from the top.

pub mod color;
pub mod palette;


pub use color::Rgb;
pub use palette::{
    ColorMatch, Palette, PaletteEntry, PaletteError, ParseColorError, Provenance, Resolution,
    Target, TargetError,
};
