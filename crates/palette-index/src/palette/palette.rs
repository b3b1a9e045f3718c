//! Palette struct with exact index and nearest-color matching.
//!
//! This module provides the core `Palette` type: the ordered list of
//! allowed colors as read from a palette file, plus an RGB index for O(1)
//! exact lookups.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use super::entry::{PaletteEntry, RawEntry};
use super::error::{PaletteError, TargetError};
use super::target::{ColorMatch, Provenance, Resolution, Target};
use crate::color::Rgb;

/// An ordered palette with an exact-match RGB index.
///
/// The list keeps every entry in file order. The index maps each RGB to
/// the *last* entry carrying it, so duplicates in a file resolve to the
/// later definition for RGB lookups while name and id lookups scan the
/// list in order.
///
/// # Example
///
/// ```
/// use palette_index::{Palette, PaletteEntry, Rgb};
///
/// let palette = Palette::new(vec![
///     PaletteEntry::new(Rgb::new(0, 0, 0), "Black", 1, false),
///     PaletteEntry::new(Rgb::new(255, 255, 255), "White", 2, false),
/// ])
/// .unwrap();
///
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.get(Rgb::new(0, 0, 0)).unwrap().name, "Black");
/// ```
#[derive(Debug, Clone)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
    index: HashMap<Rgb, usize>,
}

impl Palette {
    /// Build a palette from entries in order.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::EmptyPalette`] if `entries` is empty.
    pub fn new(entries: Vec<PaletteEntry>) -> Result<Self, PaletteError> {
        if entries.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }

        // Later entries overwrite earlier ones: last wins on duplicate RGB
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.rgb, i))
            .collect();

        Ok(Self { entries, index })
    }

    /// Parse a palette from JSON text.
    ///
    /// The document must be an array of objects with `color` (hex string)
    /// or `rgb` (three integers), `name`, `id`, and optionally `isPremium`
    /// or `premium`.
    ///
    /// ```
    /// use palette_index::{Palette, Rgb};
    ///
    /// let palette = Palette::from_json_str(r##"[
    ///     {"color": "#000000", "name": "Black", "id": 1},
    ///     {"rgb": [15, 183, 154], "name": "Teal", "id": 2, "isPremium": true}
    /// ]"##).unwrap();
    ///
    /// assert!(palette.get(Rgb::new(15, 183, 154)).unwrap().premium);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, PaletteError> {
        let raw: Vec<RawEntry> = serde_json::from_str(json)?;
        let entries = raw
            .into_iter()
            .enumerate()
            .map(|(i, entry)| entry.into_entry(i))
            .collect::<Result<Vec<_>, _>>()?;
        Palette::new(entries)
    }

    /// Read and parse a palette file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PaletteError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| PaletteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Palette::from_json_str(&json)
    }

    /// Returns the number of entries, duplicates included.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: empty palettes are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in file order.
    #[inline]
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Exact lookup through the RGB index.
    #[inline]
    pub fn get(&self, rgb: Rgb) -> Option<&PaletteEntry> {
        self.index.get(&rgb).map(|&i| &self.entries[i])
    }

    #[inline]
    pub fn contains(&self, rgb: Rgb) -> bool {
        self.index.contains_key(&rgb)
    }

    /// First entry with the given id.
    pub fn by_id(&self, id: i64) -> Option<&PaletteEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// First entry whose name matches case-insensitively.
    pub fn by_name(&self, name: &str) -> Option<&PaletteEntry> {
        let wanted = name.trim().to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.name.to_lowercase() == wanted)
    }

    /// Resolve a target to its canonical entry.
    ///
    /// RGB targets must match exactly; there is no nearest-color fallback
    /// for any target kind.
    ///
    /// ```
    /// use palette_index::{Palette, PaletteEntry, Provenance, Rgb, Target};
    ///
    /// let palette = Palette::new(vec![
    ///     PaletteEntry::new(Rgb::new(0, 0, 0), "Black", 1, false),
    /// ]).unwrap();
    ///
    /// let hit = palette.resolve(&Target::parse("BLACK").unwrap()).unwrap();
    /// assert_eq!(hit.provenance, Provenance::ByName);
    /// assert!(palette.resolve(&Target::Id(9)).is_err());
    /// ```
    pub fn resolve(&self, target: &Target) -> Result<Resolution<'_>, TargetError> {
        match target {
            Target::Rgb(rgb) => self
                .get(*rgb)
                .map(|entry| Resolution {
                    entry,
                    provenance: Provenance::ExactRgb,
                })
                .ok_or(TargetError::RgbNotFound(*rgb)),
            Target::Id(id) => self
                .by_id(*id)
                .map(|entry| Resolution {
                    entry,
                    provenance: Provenance::ById,
                })
                .ok_or(TargetError::IdNotFound(*id)),
            Target::Name(name) => self
                .by_name(name)
                .map(|entry| Resolution {
                    entry,
                    provenance: Provenance::ByName,
                })
                .ok_or_else(|| TargetError::NameNotFound(name.clone())),
        }
    }

    /// Find the nearest entry by squared RGB distance.
    ///
    /// Returns `(index, distance_squared)`. Linear scan over the list; on a
    /// tie the first entry in list order wins.
    #[inline]
    pub fn find_nearest(&self, rgb: Rgb) -> (usize, u32) {
        let mut best_idx = 0;
        let mut best_dist = u32::MAX;

        for (i, entry) in self.entries.iter().enumerate() {
            let dist = rgb.distance_squared(entry.rgb);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        (best_idx, best_dist)
    }

    /// Annotate a single pixel color.
    ///
    /// Exact index lookup first. On a miss, returns the nearest entry when
    /// `use_nearest` is set, otherwise [`ColorMatch::NoMatch`].
    pub fn color_info(&self, rgb: Rgb, use_nearest: bool) -> ColorMatch<'_> {
        if let Some(entry) = self.get(rgb) {
            return ColorMatch::Exact(entry);
        }
        if !use_nearest {
            return ColorMatch::NoMatch;
        }
        let (idx, _) = self.find_nearest(rgb);
        ColorMatch::Nearest(&self.entries[idx])
    }

    /// Strict single-color check.
    ///
    /// # Errors
    ///
    /// [`TargetError::RgbNotFound`] naming the color and its hex form.
    pub fn require_exact(&self, rgb: Rgb) -> Result<&PaletteEntry, TargetError> {
        self.get(rgb).ok_or(TargetError::RgbNotFound(rgb))
    }

    /// Colors present in `pixels` but absent from the palette.
    ///
    /// Sorted ascending and deduplicated. An empty result means every
    /// pixel is a palette color.
    pub fn unknown_colors<I>(&self, pixels: I) -> Vec<Rgb>
    where
        I: IntoIterator<Item = Rgb>,
    {
        pixels
            .into_iter()
            .filter(|rgb| !self.contains(*rgb))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(rgb: (u8, u8, u8), name: &str, id: i64, premium: bool) -> PaletteEntry {
        PaletteEntry::new(Rgb::from(rgb), name, id, premium)
    }

    fn sample() -> Palette {
        Palette::new(vec![
            entry((0, 0, 0), "Black", 1, false),
            entry((60, 60, 60), "Dark Gray", 2, false),
            entry((255, 255, 255), "White", 5, false),
            entry((15, 183, 154), "Teal", 12, true),
        ])
        .unwrap()
    }

    // Construction tests
    #[test]
    fn test_palette_empty_error() {
        let result = Palette::new(Vec::new());
        assert!(matches!(result, Err(PaletteError::EmptyPalette)));
    }

    #[test]
    fn test_duplicate_rgb_last_wins() {
        let palette = Palette::new(vec![
            entry((1, 1, 1), "First", 1, false),
            entry((1, 1, 1), "Second", 2, true),
        ])
        .unwrap();
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.get(Rgb::new(1, 1, 1)).unwrap().name, "Second");
        // Id lookup still sees both entries
        assert_eq!(palette.by_id(1).unwrap().name, "First");
    }

    #[test]
    fn test_from_json_hex_and_array() {
        let palette = Palette::from_json_str(
            r##"[
                {"color": "#000000", "name": "Black", "id": 1, "isPremium": false},
                {"rgb": [15, 183, 154], "name": "Teal", "id": 12, "premium": true}
            ]"##,
        )
        .unwrap();
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.entries()[1].rgb, Rgb::new(15, 183, 154));
        assert!(palette.entries()[1].premium);
    }

    #[test]
    fn test_from_json_malformed() {
        let result = Palette::from_json_str("[{\"color\": ");
        assert!(matches!(result, Err(PaletteError::Json(_))));
    }

    #[test]
    fn test_from_json_not_an_array() {
        let result = Palette::from_json_str(r#"{"color": "black"}"#);
        assert!(matches!(result, Err(PaletteError::Json(_))));
    }

    #[test]
    fn test_from_json_empty_array() {
        let result = Palette::from_json_str("[]");
        assert!(matches!(result, Err(PaletteError::EmptyPalette)));
    }

    #[test]
    fn test_from_json_reports_entry_index() {
        let result = Palette::from_json_str(
            r##"[
                {"color": "#000000", "name": "Black", "id": 1},
                {"color": "#FFFFFF", "id": 2}
            ]"##,
        );
        assert!(matches!(
            result,
            Err(PaletteError::MissingField {
                index: 1,
                field: "name"
            })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Palette::load("/nonexistent/palette.json");
        assert!(matches!(result, Err(PaletteError::Io { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("palette.json");
        std::fs::write(
            &path,
            r##"[{"color": "#0FB79A", "name": "Teal", "id": 12, "isPremium": true}]"##,
        )
        .unwrap();

        let palette = Palette::load(&path).unwrap();
        assert_eq!(palette.len(), 1);
        assert_eq!(palette.entries()[0].name, "Teal");
    }

    // resolve tests
    #[test]
    fn test_resolve_rgb() {
        let palette = sample();
        let hit = palette.resolve(&Target::Rgb(Rgb::new(15, 183, 154))).unwrap();
        assert_eq!(hit.name(), "Teal");
        assert!(hit.premium());
        assert_eq!(hit.provenance, Provenance::ExactRgb);
    }

    #[test]
    fn test_resolve_rgb_not_found() {
        let palette = sample();
        let result = palette.resolve(&Target::Rgb(Rgb::new(15, 183, 155)));
        assert_eq!(
            result.unwrap_err(),
            TargetError::RgbNotFound(Rgb::new(15, 183, 155))
        );
    }

    #[test]
    fn test_resolve_id() {
        let palette = sample();
        let hit = palette.resolve(&Target::Id(5)).unwrap();
        assert_eq!(hit.rgb(), Rgb::new(255, 255, 255));
        assert_eq!(hit.provenance, Provenance::ById);
        assert_eq!(
            palette.resolve(&Target::Id(3)).unwrap_err(),
            TargetError::IdNotFound(3)
        );
    }

    #[test]
    fn test_resolve_name_case_insensitive() {
        let palette = sample();
        for query in ["dark gray", "DARK GRAY", "Dark Gray", " dark Gray "] {
            let hit = palette.resolve(&Target::Name(query.to_string())).unwrap();
            assert_eq!(hit.rgb(), Rgb::new(60, 60, 60), "query {query:?}");
            assert_eq!(hit.provenance, Provenance::ByName);
        }
    }

    #[test]
    fn test_resolve_name_is_exact_not_prefix() {
        let palette = sample();
        assert!(palette.resolve(&Target::Name("Dark".to_string())).is_err());
    }

    // color_info tests
    #[test]
    fn test_color_info_exact() {
        let palette = sample();
        let info = palette.color_info(Rgb::new(0, 0, 0), false);
        assert_eq!(info.entry().unwrap().name, "Black");
        assert!(info.is_exact());
    }

    #[test]
    fn test_color_info_no_match_sentinel() {
        let palette = sample();
        assert_eq!(
            palette.color_info(Rgb::new(1, 2, 3), false),
            ColorMatch::NoMatch
        );
    }

    #[test]
    fn test_color_info_nearest() {
        let palette = sample();
        let info = palette.color_info(Rgb::new(50, 50, 50), true);
        assert_eq!(info.kind(), "nearest");
        assert_eq!(info.entry().unwrap().name, "Dark Gray");
    }

    #[test]
    fn test_find_nearest_tie_takes_first() {
        let palette = Palette::new(vec![
            entry((0, 0, 0), "Low", 1, false),
            entry((20, 20, 20), "High", 2, false),
        ])
        .unwrap();
        // (10,10,10) is equidistant from both
        let (idx, dist) = palette.find_nearest(Rgb::new(10, 10, 10));
        assert_eq!(idx, 0);
        assert_eq!(dist, 300);
    }

    #[test]
    fn test_require_exact() {
        let palette = sample();
        assert_eq!(
            palette.require_exact(Rgb::new(0, 0, 0)).unwrap().name,
            "Black"
        );
        let err = palette.require_exact(Rgb::new(0, 0, 1)).unwrap_err();
        assert!(err.to_string().contains("#000001"));
    }

    #[test]
    fn test_unknown_colors_sorted_unique() {
        let palette = sample();
        let pixels = [
            Rgb::new(9, 9, 9),
            Rgb::new(0, 0, 0),
            Rgb::new(1, 0, 0),
            Rgb::new(9, 9, 9),
            Rgb::new(255, 255, 255),
        ];
        assert_eq!(
            palette.unknown_colors(pixels),
            vec![Rgb::new(1, 0, 0), Rgb::new(9, 9, 9)]
        );
    }

    #[test]
    fn test_unknown_colors_empty_when_compliant() {
        let palette = sample();
        let pixels = [Rgb::new(0, 0, 0), Rgb::new(15, 183, 154)];
        assert!(palette.unknown_colors(pixels).is_empty());
    }
}
