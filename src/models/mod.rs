pub mod color_count;
pub mod config;
pub mod descriptor;
pub mod output_name;

pub use color_count::ColorCount;
pub use config::AppConfig;
pub use descriptor::{parse_origin, parse_rgb_triple};
pub use output_name::{image_base_name, safe_name, OutputName};
