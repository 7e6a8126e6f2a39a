//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use inspection_report::error::ReportError;
use inspection_report::form::FormInput;
use inspection_report::scanner;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"));
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, ReportError::FolderNotFound(_)));
}

/// 空のフォルダをスキャンした場合
#[test]
fn test_scan_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = scanner::scan_folder(dir.path());

    // 空フォルダはエラーではなく空のVecを返す
    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// 存在しないフォームファイル
#[test]
fn test_load_missing_form() {
    let result = FormInput::load(Path::new("/nonexistent/form.json"));
    assert!(matches!(result, Err(ReportError::FileNotFound(_))));
}

/// 壊れたフォームJSON
#[test]
fn test_load_broken_form() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("form.json");
    std::fs::write(&path, "{ sections: ").unwrap();

    let result = FormInput::load(&path);
    assert!(matches!(result, Err(ReportError::JsonParse(_))));
}

/// ReportErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        ReportError::Config("テスト設定エラー".to_string()),
        ReportError::FileNotFound("test.jpg".to_string()),
        ReportError::FolderNotFound("/path/to/folder".to_string()),
        ReportError::ImageLoad("壊れた画像".to_string()),
        ReportError::InvalidForm("セクション名が重複".to_string()),
        ReportError::PdfGeneration("PDF生成エラー".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: ReportError = io_err.into();

    assert!(matches!(err, ReportError::Io(_)));
    let display = format!("{}", err);
    assert!(display.contains("IO"));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_conversion() {
    let common_err = inspection_report_common::Error::Backend("描画エラー".to_string());
    let err: ReportError = common_err.into();

    assert!(matches!(err, ReportError::Common(_)));
    assert!(format!("{}", err).contains("描画エラー"));
}
