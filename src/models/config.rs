use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration loaded from a YAML file
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Palette JSON file
    #[serde(default = "default_palette")]
    pub palette: PathBuf,

    /// Directory for coords/mask/preview outputs
    #[serde(default = "default_find_output_dir")]
    pub find_output_dir: PathBuf,

    /// Directory for color listings
    #[serde(default = "default_list_output_dir")]
    pub list_output_dir: PathBuf,

    /// Alpha of the black layer that dims the preview background
    #[serde(default = "default_overlay_alpha")]
    pub overlay_alpha: u8,

    /// Re-compress written PNGs with oxipng
    #[serde(default)]
    pub optimize_png: bool,
}

fn default_palette() -> PathBuf {
    PathBuf::from("assets/wplace-color.json")
}

fn default_find_output_dir() -> PathBuf {
    PathBuf::from("output/find_color")
}

fn default_list_output_dir() -> PathBuf {
    PathBuf::from("output/list_color")
}

fn default_overlay_alpha() -> u8 {
    180
}

impl AppConfig {
    /// Load configuration from an optional YAML file.
    ///
    /// No path means defaults. A path that cannot be read or parsed also
    /// yields defaults, with a warning.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No config file set, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml_str(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        palette = %config.palette.display(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Replace the palette path when an override is given.
    pub fn with_palette_override(mut self, palette: Option<PathBuf>) -> Self {
        if let Some(palette) = palette {
            self.palette = palette;
        }
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            find_output_dir: default_find_output_dir(),
            list_output_dir: default_list_output_dir(),
            overlay_alpha: default_overlay_alpha(),
            optimize_png: false,
        }
    }
}
