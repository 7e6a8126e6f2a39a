//! フォーム入力からPDFまでの統合テスト

use chrono::{Local, TimeZone};
use inspection_report::config::Config;
use inspection_report::error::ReportError;
use inspection_report::export::{export_report, PdfFonts};
use inspection_report::form::{collect_report, FormInput};
use inspection_report::scanner::data_url;
use inspection_report_common::raster::{encode_rgba, RasterFormat};
use inspection_report_common::SectionStatus;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn png() -> Vec<u8> {
    encode_rgba(&image::RgbaImage::from_pixel(10, 8, image::Rgba([0, 0, 255, 255])), RasterFormat::Png)
        .expect("PNGエンコード失敗")
}

fn write_form(dir: &Path, json: &str) -> FormInput {
    let path = dir.join("form.json");
    fs::write(&path, json).unwrap();
    FormInput::load(&path).expect("フォーム読み込み失敗")
}

fn config() -> Config {
    Config {
        default_inspector: Some("Config Inspector".to_string()),
        ..Config::default()
    }
}

#[test]
fn test_collect_photos_in_order_with_default_captions() {
    let dir = tempdir().expect("Failed to create temp dir");
    fs::create_dir(dir.path().join("roof")).unwrap();
    fs::write(dir.path().join("front.png"), png()).unwrap();
    fs::write(dir.path().join("roof").join("b.png"), png()).unwrap();
    fs::write(dir.path().join("roof").join("a.png"), png()).unwrap();
    fs::write(dir.path().join("roof").join("readme.txt"), "x").unwrap();

    let inline = data_url::encode("image/png", &png());
    let form = write_form(
        dir.path(),
        &format!(
            r#"{{
                "inspectorName": "J. Doe",
                "sections": [{{
                    "name": "Roof",
                    "status": "not-acceptable",
                    "notes": "Shingles missing.",
                    "photos": [
                        {{"path": "front.png", "caption": "Front"}},
                        {{"dataUrl": "{}", "caption": "  "}}
                    ],
                    "photoDirs": ["roof"]
                }}]
            }}"#,
            inline
        ),
    );

    let now = Local.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap();
    let data = collect_report(&form, dir.path(), &config(), now, false).expect("収集に失敗");

    assert_eq!(data.inspector_name, "J. Doe");
    assert_eq!(data.timestamp, "10/16/2026, 9:30:00 AM");
    let section = &data.sections[0];
    assert_eq!(section.status, SectionStatus::NotAcceptable);
    let captions: Vec<&str> = section.photos.iter().map(|p| p.caption.as_str()).collect();
    assert_eq!(captions, vec!["Front", "Photo 2", "Photo 3", "Photo 4"]);
}

#[test]
fn test_gesture_signature_is_replayed() {
    let dir = tempdir().expect("Failed to create temp dir");
    fs::write(
        dir.path().join("sig.json"),
        r#"[
            {"source": "mouse", "type": "down", "clientX": 30, "clientY": 40},
            {"source": "mouse", "type": "move", "clientX": 200, "clientY": 120},
            {"source": "mouse", "type": "up"}
        ]"#,
    )
    .unwrap();
    let form = write_form(
        dir.path(),
        r#"{"sections": [{"name": "Gutters", "status": "acceptable"}], "signature": {"gesture": "sig.json"}}"#,
    );

    let now = Local.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap();
    let data = collect_report(&form, dir.path(), &config(), now, false).expect("収集に失敗");
    assert!(data.signature.is_some());

    let (_, report) = export_report(&data, dir.path(), &PdfFonts::default()).expect("PDF生成に失敗");
    assert!(report.signature_page);
    assert_eq!(report.pages, 2);
}

#[test]
fn test_blank_gesture_omits_signature() {
    let dir = tempdir().expect("Failed to create temp dir");
    fs::write(
        dir.path().join("sig.json"),
        r#"[{"source": "mouse", "type": "move", "clientX": 30, "clientY": 40}]"#,
    )
    .unwrap();
    let form = write_form(
        dir.path(),
        r#"{"sections": [{"name": "Roof"}], "signature": {"gesture": "sig.json"}}"#,
    );

    let now = Local.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap();
    let data = collect_report(&form, dir.path(), &config(), now, false).expect("収集に失敗");
    assert!(data.signature.is_none());
}

#[test]
fn test_missing_photo_file_is_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let form = write_form(
        dir.path(),
        r#"{"sections": [{"name": "Roof", "photos": [{"path": "missing.jpg"}]}]}"#,
    );

    let now = Local.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap();
    let result = collect_report(&form, dir.path(), &config(), now, false);
    assert!(matches!(result, Err(ReportError::FileNotFound(_))));
}

#[test]
fn test_non_image_data_url_signature_is_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let form = write_form(
        dir.path(),
        &format!(
            r#"{{"sections": [], "signature": {{"dataUrl": "{}"}}}}"#,
            data_url::encode("text/plain", b"hello")
        ),
    );

    let now = Local.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap();
    let result = collect_report(&form, dir.path(), &config(), now, false);
    assert!(matches!(result, Err(ReportError::ImageLoad(_))));
}
