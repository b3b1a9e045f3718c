//! CSV tables and the aligned text report.
//!
//! Every CSV starts with a header row, also when there are no data rows,
//! so consumers can rely on the column schema. Booleans are written as
//! `True`/`False`.

use palette_index::Rgb;
use serde::{Serialize, Serializer};
use std::path::Path;

use crate::error::ScanError;

/// A serializable table row with a fixed header.
pub trait TableRow: Serialize {
    const HEADER: &'static [&'static str];
}

/// Write `rows` as CSV to `path`, header first.
pub fn write_csv<R: TableRow>(path: &Path, rows: &[R]) -> Result<(), ScanError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(R::HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "Wrote CSV");
    Ok(())
}

fn title_bool<S: Serializer>(value: &bool, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(if *value { "True" } else { "False" })
}

fn title_bool_opt<S: Serializer>(value: &Option<bool>, s: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => title_bool(v, s),
        None => s.serialize_str(""),
    }
}

/// One matching pixel from the color finder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoordRow {
    pub x: u32,
    pub y: u32,
    #[serde(rename = "X")]
    pub canvas_x: i64,
    #[serde(rename = "Y")]
    pub canvas_y: i64,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub name: String,
    #[serde(serialize_with = "title_bool")]
    pub premium: bool,
}

impl TableRow for CoordRow {
    const HEADER: &'static [&'static str] = &["x", "y", "X", "Y", "r", "g", "b", "name", "premium"];
}

/// Color frequency without palette data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawColorRow {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub count: u64,
}

impl TableRow for RawColorRow {
    const HEADER: &'static [&'static str] = &["r", "g", "b", "count"];
}

/// Color frequency joined with its exact palette entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrictColorRow {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub count: u64,
    pub id: i64,
    pub name: String,
    #[serde(serialize_with = "title_bool")]
    pub premium: bool,
}

impl TableRow for StrictColorRow {
    const HEADER: &'static [&'static str] = &["r", "g", "b", "count", "id", "name", "premium"];
}

/// Color frequency with an exact, nearest or missing palette match.
///
/// Palette columns are empty when `match` is `none`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedColorRow {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub count: u64,
    pub id: Option<i64>,
    pub name: Option<String>,
    pub hex: Option<String>,
    #[serde(serialize_with = "title_bool_opt")]
    pub premium: Option<bool>,
    #[serde(rename = "match")]
    pub match_kind: &'static str,
}

impl TableRow for AnnotatedColorRow {
    const HEADER: &'static [&'static str] = &[
        "r", "g", "b", "count", "id", "name", "hex", "premium", "match",
    ];
}

/// One line of the text report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLine<'a> {
    pub rgb: Rgb,
    pub count: u64,
    pub id: Option<i64>,
    pub name: Option<&'a str>,
    pub premium: bool,
}

/// Render the report with counts and ids right-aligned to the widest value.
///
/// Premium entries are marked with a star; lines without a palette match
/// show `-` as id and `?` as name.
pub fn render_text_report(lines: &[ReportLine<'_>]) -> String {
    let id_text = |line: &ReportLine<'_>| match line.id {
        Some(id) => id.to_string(),
        None => "-".to_string(),
    };
    let count_width = lines
        .iter()
        .map(|l| l.count.to_string().len())
        .max()
        .unwrap_or(1);
    let id_width = lines.iter().map(|l| id_text(l).len()).max().unwrap_or(1);

    let mut out = String::new();
    for line in lines {
        let mark = if line.premium { "★ " } else { "  " };
        out.push_str(&format!(
            "rgb({:>3}, {:>3}, {:>3}): {:>cw$} px | id:{:>iw$} {}{}\n",
            line.rgb.r,
            line.rgb.g,
            line.rgb.b,
            line.count,
            id_text(line),
            mark,
            line.name.unwrap_or("?"),
            cw = count_width,
            iw = id_width,
        ));
    }
    out
}

/// Write the text report as UTF-8.
pub fn write_text_report(path: &Path, lines: &[ReportLine<'_>]) -> Result<(), ScanError> {
    std::fs::write(path, render_text_report(lines))?;
    tracing::debug!(path = %path.display(), lines = lines.len(), "Wrote text report");
    Ok(())
}
