//! Color types
//!
//! Palettes in this crate are plain 8-bit sRGB byte triples; matching is
//! exact or by squared RGB distance, so a single [`Rgb`] type covers input,
//! storage and output.

mod rgb;

pub use rgb::Rgb;
