use palette_index::{Palette, PaletteError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Parsed palettes, keyed by the path they were loaded from.
///
/// Each path is read and parsed at most once for the lifetime of the
/// store. Nothing is evicted unless the owner asks for it.
pub struct PaletteStore {
    palettes: HashMap<PathBuf, Arc<Palette>>,
}

impl PaletteStore {
    pub fn new() -> Self {
        Self {
            palettes: HashMap::new(),
        }
    }

    /// Return the palette for `path`, loading it on first use.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<Palette>, PaletteError> {
        if let Some(palette) = self.palettes.get(path) {
            return Ok(Arc::clone(palette));
        }

        let palette = Arc::new(Palette::load(path)?);
        tracing::info!(
            path = %path.display(),
            entries = palette.len(),
            "Loaded palette"
        );
        self.palettes
            .insert(path.to_path_buf(), Arc::clone(&palette));
        Ok(palette)
    }

    /// Cached palette for `path`, without loading.
    pub fn get(&self, path: &Path) -> Option<Arc<Palette>> {
        self.palettes.get(path).cloned()
    }

    /// Drop the cached palette for `path` so the next load re-reads it.
    pub fn evict(&mut self, path: &Path) -> bool {
        let removed = self.palettes.remove(path).is_some();
        if removed {
            tracing::debug!(path = %path.display(), "Evicted palette");
        }
        removed
    }

    pub fn clear(&mut self) {
        self.palettes.clear();
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }
}

impl Default for PaletteStore {
    fn default() -> Self {
        Self::new()
    }
}
