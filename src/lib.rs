//! Palscan - palette-aware image color tools
//!
//! Finds pixels of a palette color, lists the colors of an image against a
//! palette, and resolves loose color descriptors to palette entries.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;

pub use error::{ComplianceError, ScanError};
pub use services::{verify_image_palette, PaletteStore};
