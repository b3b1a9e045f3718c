use image::RgbImage;
use palette_index::{Palette, PaletteEntry, Rgb};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{ComplianceError, ScanError};
use crate::models::{AppConfig, ColorCount, OutputName};
use crate::rendering::{self, AnnotatedColorRow, RawColorRow, ReportLine, StrictColorRow};

/// How listed colors relate to the palette.
#[derive(Debug, Clone, Copy)]
pub enum ListMode<'a> {
    /// Counts only
    Raw,
    /// Every color must be in the palette, otherwise nothing is written
    Strict(&'a Palette),
    /// Each color tagged with its exact, nearest or missing palette entry
    Annotate {
        palette: &'a Palette,
        use_nearest: bool,
    },
}

impl ListMode<'_> {
    /// Tag used in output file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            ListMode::Raw => "raw",
            ListMode::Strict(_) => "strict",
            ListMode::Annotate { .. } => "annotated",
        }
    }
}

/// One listed color with whatever palette data the mode attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedColor {
    pub rgb: Rgb,
    pub count: u64,
    pub entry: Option<PaletteEntry>,
    /// `exact`, `nearest` or `none`; only set in annotate mode
    pub match_kind: Option<&'static str>,
}

impl ListedColor {
    pub fn report_line(&self) -> ReportLine<'_> {
        ReportLine {
            rgb: self.rgb,
            count: self.count,
            id: self.entry.as_ref().map(|e| e.id),
            name: self.entry.as_ref().map(|e| e.name.as_str()),
            premium: self.entry.as_ref().is_some_and(|e| e.premium),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListReport {
    pub colors: Vec<ListedColor>,
    pub csv_path: PathBuf,
    /// Not written in raw mode
    pub text_path: Option<PathBuf>,
}

impl ListReport {
    /// Total pixel count over all listed colors.
    pub fn total_pixels(&self) -> u64 {
        self.colors.iter().map(|c| c.count).sum()
    }
}

/// Distinct colors with their pixel counts, most frequent first.
///
/// Equal counts are ordered by ascending RGB.
pub fn count_colors(image: &RgbImage) -> Vec<ColorCount> {
    let mut counts: HashMap<Rgb, u64> = HashMap::new();
    for rgb in rendering::pixels(image) {
        *counts.entry(rgb).or_insert(0) += 1;
    }

    let mut counts: Vec<ColorCount> = counts
        .into_iter()
        .map(|(rgb, count)| ColorCount::new(rgb, count))
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then(a.rgb.cmp(&b.rgb)));
    counts
}

/// Fails with every color that is missing from the palette, in the order
/// of `counts`.
pub fn check_compliance(counts: &[ColorCount], palette: &Palette) -> Result<(), ComplianceError> {
    let offenders: Vec<ColorCount> = counts
        .iter()
        .filter(|c| !palette.contains(c.rgb))
        .copied()
        .collect();
    if offenders.is_empty() {
        Ok(())
    } else {
        Err(ComplianceError { offenders })
    }
}

/// Lists every distinct color of an image.
pub struct ColorLister {
    output_dir: PathBuf,
}

impl ColorLister {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            output_dir: config.list_output_dir.clone(),
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Count colors and write the CSV table, plus the text report in the
    /// palette modes.
    pub fn list(
        &self,
        image_path: &Path,
        mode: ListMode<'_>,
        prefix: &str,
    ) -> Result<ListReport, ScanError> {
        let image = rendering::load_rgb(image_path)?;
        let counts = count_colors(&image);
        tracing::debug!(
            image = %image_path.display(),
            distinct = counts.len(),
            mode = mode.as_str(),
            "Counted colors"
        );

        let colors = annotate(&counts, mode)?;

        let name = OutputName::new(image_path, &[prefix, mode.as_str()]);
        std::fs::create_dir_all(&self.output_dir)?;
        let csv_path = name.path_in(&self.output_dir, "colors", "csv");

        match mode {
            ListMode::Raw => {
                let rows: Vec<RawColorRow> = colors
                    .iter()
                    .map(|c| RawColorRow {
                        r: c.rgb.r,
                        g: c.rgb.g,
                        b: c.rgb.b,
                        count: c.count,
                    })
                    .collect();
                rendering::write_csv(&csv_path, &rows)?;
            }
            ListMode::Strict(_) => {
                let rows: Vec<StrictColorRow> = colors
                    .iter()
                    .filter_map(|c| {
                        let entry = c.entry.as_ref()?;
                        Some(StrictColorRow {
                            r: c.rgb.r,
                            g: c.rgb.g,
                            b: c.rgb.b,
                            count: c.count,
                            id: entry.id,
                            name: entry.name.clone(),
                            premium: entry.premium,
                        })
                    })
                    .collect();
                rendering::write_csv(&csv_path, &rows)?;
            }
            ListMode::Annotate { .. } => {
                let rows: Vec<AnnotatedColorRow> = colors
                    .iter()
                    .map(|c| AnnotatedColorRow {
                        r: c.rgb.r,
                        g: c.rgb.g,
                        b: c.rgb.b,
                        count: c.count,
                        id: c.entry.as_ref().map(|e| e.id),
                        name: c.entry.as_ref().map(|e| e.name.clone()),
                        hex: c.entry.as_ref().map(PaletteEntry::hex),
                        premium: c.entry.as_ref().map(|e| e.premium),
                        match_kind: c.match_kind.unwrap_or("none"),
                    })
                    .collect();
                rendering::write_csv(&csv_path, &rows)?;
            }
        }

        let text_path = match mode {
            ListMode::Raw => None,
            ListMode::Strict(_) | ListMode::Annotate { .. } => {
                let path = name.path_in(&self.output_dir, "colors", "txt");
                let lines: Vec<ReportLine<'_>> =
                    colors.iter().map(ListedColor::report_line).collect();
                rendering::write_text_report(&path, &lines)?;
                Some(path)
            }
        };

        tracing::info!(
            image = %image_path.display(),
            distinct = colors.len(),
            mode = mode.as_str(),
            csv = %csv_path.display(),
            "Wrote color listing"
        );

        Ok(ListReport {
            colors,
            csv_path,
            text_path,
        })
    }
}

fn annotate(counts: &[ColorCount], mode: ListMode<'_>) -> Result<Vec<ListedColor>, ScanError> {
    let colors = match mode {
        ListMode::Raw => counts
            .iter()
            .map(|c| ListedColor {
                rgb: c.rgb,
                count: c.count,
                entry: None,
                match_kind: None,
            })
            .collect(),
        ListMode::Strict(palette) => {
            check_compliance(counts, palette)?;
            counts
                .iter()
                .map(|c| ListedColor {
                    rgb: c.rgb,
                    count: c.count,
                    entry: palette.get(c.rgb).cloned(),
                    match_kind: None,
                })
                .collect()
        }
        ListMode::Annotate {
            palette,
            use_nearest,
        } => counts
            .iter()
            .map(|c| {
                let found = palette.color_info(c.rgb, use_nearest);
                ListedColor {
                    rgb: c.rgb,
                    count: c.count,
                    entry: found.entry().cloned(),
                    match_kind: Some(found.kind()),
                }
            })
            .collect(),
    };
    Ok(colors)
}
