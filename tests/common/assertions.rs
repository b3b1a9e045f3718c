//! Assertion helpers for tests.

use pretty_assertions::assert_eq;
use std::path::Path;

/// Read a CSV file as trimmed lines.
pub fn csv_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()))
        .lines()
        .map(str::to_string)
        .collect()
}

/// Assert the first line of a CSV file is exactly `header`.
pub fn assert_csv_header(path: &Path, header: &str) {
    let lines = csv_lines(path);
    assert_eq!(
        lines.first().map(String::as_str),
        Some(header),
        "Unexpected header in {}",
        path.display()
    );
}

/// Assert a file is a decodable RGBA PNG and return its pixels.
pub fn assert_rgba_png(path: &Path) -> image::RgbaImage {
    let bytes = std::fs::read(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "Expected PNG signature in {}",
        path.display()
    );
    image::load_from_memory(&bytes)
        .expect("Failed to decode PNG")
        .into_rgba8()
}

/// Assert a directory does not exist or is empty.
pub fn assert_no_outputs(dir: &Path) {
    if !dir.exists() {
        return;
    }
    let entries: Vec<_> = std::fs::read_dir(dir)
        .expect("Failed to read dir")
        .filter_map(Result::ok)
        .map(|e| e.file_name())
        .collect();
    assert!(entries.is_empty(), "Expected no outputs, found {entries:?}");
}
