pub mod color_finder;
pub mod color_lister;
pub mod palette_store;
pub mod verify;

pub use color_finder::{ColorFinder, FindOptions, FindReport};
pub use color_lister::{
    check_compliance, count_colors, ColorLister, ListMode, ListReport, ListedColor,
};
pub use palette_store::PaletteStore;
pub use verify::verify_image_palette;
