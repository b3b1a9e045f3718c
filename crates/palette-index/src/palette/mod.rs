//! Palette types and utilities
//!
//! This module provides the palette model, target resolution, and the
//! error types for parsing, loading and resolving.

mod entry;
mod error;
mod palette;
mod target;

pub use entry::PaletteEntry;
pub use error::{PaletteError, ParseColorError, TargetError};
pub use palette::Palette;
pub use target::{ColorMatch, Provenance, Resolution, Target};
