pub mod mask;
pub mod png_out;
pub mod raster;
pub mod tables;

pub use mask::{composite_over, mask_layer, preview, PixelMask};
pub use png_out::encode_rgba_png;
pub use raster::{load_rgb, pixels};
pub use tables::{
    render_text_report, write_csv, write_text_report, AnnotatedColorRow, CoordRow, RawColorRow,
    ReportLine, StrictColorRow, TableRow,
};
