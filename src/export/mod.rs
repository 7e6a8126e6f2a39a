pub mod pdf;

pub use pdf::PdfFonts;

use crate::error::Result;
use inspection_report_common::export::{assemble_report, AssemblyReport, RecordingDocument};
use inspection_report_common::ReportData;
use std::path::{Path, PathBuf};

/// 出力先がフォルダ（または拡張子なし）ならレポート名を付ける
fn output_path_for(output: &Path, file_name: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(file_name)
    } else {
        output.to_path_buf()
    }
}

/// PDFを生成し、保存先と組版結果を返す
pub fn export_report(
    data: &ReportData,
    output: &Path,
    fonts: &PdfFonts,
) -> Result<(PathBuf, AssemblyReport)> {
    let output_path = output_path_for(output, &data.file_name());
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let report = pdf::generate_pdf(data, &output_path, fonts)?;
    for fallback in &report.fallbacks {
        log::warn!(
            "{} / {}: キャプションのみ出力 ({})",
            fallback.section,
            fallback.caption,
            fallback.reason
        );
    }
    Ok((output_path, report))
}

/// 保存せずに組版計画だけを得る
pub fn plan_report(data: &ReportData) -> Result<(RecordingDocument, AssemblyReport)> {
    let mut doc = RecordingDocument::new();
    let report = assemble_report(data, &mut doc)?;
    Ok((doc, report))
}
