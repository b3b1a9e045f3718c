use std::path::{Path, PathBuf};

/// Deterministic output file name: `{kind}_{base}_{tag}.{ext}`.
///
/// `base` is the input image's file stem; `tag` describes the run
/// (prefix, target, mode) so repeated runs on one image do not collide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputName {
    base: String,
    tag: String,
}

impl OutputName {
    /// Build from the image path and the tag parts.
    ///
    /// Parts are joined with `_`; empty parts and any leading or trailing
    /// `_` are dropped from the ends, so an empty prefix leaves no mark.
    pub fn new(image_path: &Path, parts: &[&str]) -> Self {
        Self {
            base: image_base_name(image_path),
            tag: parts.join("_").trim_matches('_').to_string(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn file_name(&self, kind: &str, ext: &str) -> String {
        if self.tag.is_empty() {
            format!("{kind}_{}.{ext}", self.base)
        } else {
            format!("{kind}_{}_{}.{ext}", self.base, self.tag)
        }
    }

    pub fn path_in(&self, dir: &Path, kind: &str, ext: &str) -> PathBuf {
        dir.join(self.file_name(kind, ext))
    }
}

/// File stem of an image path, `image` when there is none.
pub fn image_base_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string())
}

/// Palette name made safe for file names (spaces become `_`).
pub fn safe_name(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        "unknown".to_string()
    } else {
        name.replace(' ', "_")
    }
}
