//! Color lister integration tests.

mod common;

use common::colors::*;
use common::*;
use palette_index::Rgb;
use palscan::models::{AppConfig, ColorCount};
use palscan::services::{ColorLister, ListMode};
use palscan::ScanError;
use pretty_assertions::assert_eq;

fn lister(ws: &Workspace) -> ColorLister {
    ColorLister::new(&AppConfig::default()).with_output_dir(ws.out_dir())
}

/// Three black pixels and one white.
fn mostly_black(ws: &Workspace) -> std::path::PathBuf {
    ws.write_image("bw.png", &[&[BLACK, WHITE], &[BLACK, BLACK]])
}

#[test]
fn test_raw_listing_most_frequent_first() {
    let ws = Workspace::new();
    let image = mostly_black(&ws);

    let report = lister(&ws).list(&image, ListMode::Raw, "").unwrap();

    assert_eq!(report.colors[0].rgb, Rgb::new(0, 0, 0));
    assert_eq!(report.colors[0].count, 3);
    assert_eq!(report.total_pixels(), 4);
    assert_eq!(report.text_path, None);
    assert_eq!(report.csv_path, ws.out_dir().join("colors_bw_raw.csv"));
    assert_eq!(
        csv_lines(&report.csv_path),
        vec!["r,g,b,count", "0,0,0,3", "255,255,255,1"]
    );
}

#[test]
fn test_strict_listing_writes_csv_and_report() {
    let ws = Workspace::new();
    let palette = ws.palette();
    let image = ws.write_image("mix.png", &[&[TEAL, BLACK, TEAL], &[BLACK, TEAL, WHITE]]);

    let report = lister(&ws)
        .list(&image, ListMode::Strict(&palette), "p1")
        .unwrap();

    assert_eq!(report.csv_path, ws.out_dir().join("colors_mix_p1_strict.csv"));
    assert_eq!(
        csv_lines(&report.csv_path),
        vec![
            "r,g,b,count,id,name,premium",
            "16,174,166,3,16,Teal,True",
            "0,0,0,2,1,Black,False",
            "255,255,255,1,5,White,False",
        ]
    );

    let text_path = report.text_path.expect("strict mode writes a text report");
    assert_eq!(
        std::fs::read_to_string(text_path).unwrap(),
        "rgb( 16, 174, 166): 3 px | id:16 ★ Teal\n\
         rgb(  0,   0,   0): 2 px | id: 1   Black\n\
         rgb(255, 255, 255): 1 px | id: 5   White\n"
    );
}

#[test]
fn test_strict_listing_fails_on_unknown_color_without_writing() {
    let ws = Workspace::new();
    let palette = ws.palette();
    let image = ws.write_image("off.png", &[&[BLACK, OFF_WHITE, OFF_WHITE]]);

    let error = lister(&ws)
        .list(&image, ListMode::Strict(&palette), "")
        .unwrap_err();

    match &error {
        ScanError::Compliance(compliance) => {
            assert_eq!(
                compliance.offenders,
                vec![ColorCount::new(Rgb::from_bytes(OFF_WHITE), 2)]
            );
        }
        other => panic!("Expected compliance error, got {other:?}"),
    }
    let message = error.to_string();
    assert!(message.contains("#FAFAFA"));
    assert!(message.contains("2 px"));
    assert_no_outputs(&ws.out_dir());
}

#[test]
fn test_annotated_listing_tags_matches() {
    let ws = Workspace::new();
    let palette = ws.palette();
    let image = ws.write_image("a.png", &[&[BLACK, BLACK, OFF_WHITE]]);

    let report = lister(&ws)
        .list(
            &image,
            ListMode::Annotate {
                palette: &palette,
                use_nearest: true,
            },
            "",
        )
        .unwrap();

    assert_eq!(
        csv_lines(&report.csv_path),
        vec![
            "r,g,b,count,id,name,hex,premium,match",
            "0,0,0,2,1,Black,#000000,False,exact",
            "250,250,250,1,5,White,#FFFFFF,False,nearest",
        ]
    );
}

#[test]
fn test_annotated_listing_without_nearest() {
    let ws = Workspace::new();
    let palette = ws.palette();
    let image = ws.write_image("a.png", &[&[BLACK, OFF_WHITE]]);

    let report = lister(&ws)
        .list(
            &image,
            ListMode::Annotate {
                palette: &palette,
                use_nearest: false,
            },
            "",
        )
        .unwrap();

    let lines = csv_lines(&report.csv_path);
    // Ties on count are ordered by ascending RGB
    assert_eq!(lines[1], "0,0,0,1,1,Black,#000000,False,exact");
    assert_eq!(lines[2], "250,250,250,1,,,,,none");

    let text = std::fs::read_to_string(report.text_path.unwrap()).unwrap();
    assert!(text.ends_with("rgb(250, 250, 250): 1 px | id:-   ?\n"));
}

#[test]
fn test_undecodable_image() {
    let ws = Workspace::new();
    let path = ws.path().join("broken.png");
    std::fs::write(&path, b"definitely not an image").unwrap();

    let result = lister(&ws).list(&path, ListMode::Raw, "");

    assert!(matches!(result, Err(ScanError::Image(_))));
    assert_no_outputs(&ws.out_dir());
}
