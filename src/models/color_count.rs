use palette_index::Rgb;

/// A distinct color and how many pixels carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorCount {
    pub rgb: Rgb,
    pub count: u64,
}

impl ColorCount {
    pub fn new(rgb: Rgb, count: u64) -> Self {
        Self { rgb, count }
    }
}
