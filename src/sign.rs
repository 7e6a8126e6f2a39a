//! 署名ジェスチャーの再生と画像書き出し

use crate::config::Config;
use crate::error::{ReportError, Result};
use inspection_report_common::signature::{self, PenStyle, ReplaySummary, SignaturePad, SurfaceGeometry};
use inspection_report_common::RasterFormat;
use std::path::{Path, PathBuf};

/// 設定に従った署名パッド
pub fn new_pad(config: &Config) -> SignaturePad {
    let pen = PenStyle {
        width: config.pen_width,
        ..PenStyle::default()
    };
    SignaturePad::new(
        SurfaceGeometry::new(config.signature_width, config.signature_height),
        pen,
    )
}

/// ジェスチャーログを読み込んで新しいパッドに再生する
pub fn replay_file(
    path: &Path,
    config: &Config,
    container_width: Option<f32>,
) -> Result<(SignaturePad, ReplaySummary)> {
    if !path.exists() {
        return Err(ReportError::FileNotFound(path.display().to_string()));
    }
    let records = signature::parse_gesture_log(&std::fs::read_to_string(path)?)?;

    let mut pad = new_pad(config);
    if let Some(width) = container_width {
        pad.resize(width);
    }
    let summary = signature::replay(&mut pad, &records);
    Ok((pad, summary))
}

/// 書き出し結果
#[derive(Debug, Clone)]
pub struct SignOutcome {
    pub path: PathBuf,
    pub bytes: usize,
    pub strokes: usize,
    pub summary: ReplaySummary,
}

/// 再生した署名を画像として保存する。空白なら何も書かず None
pub fn export_signature(
    gesture: &Path,
    output: &Path,
    format: RasterFormat,
    container_width: Option<f32>,
    config: &Config,
) -> Result<Option<SignOutcome>> {
    let (pad, summary) = replay_file(gesture, config, container_width)?;

    let Some(bytes) = pad.signature(format)? else {
        log::info!("signature is blank, nothing written");
        return Ok(None);
    };

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output, &bytes)?;

    Ok(Some(SignOutcome {
        path: output.to_path_buf(),
        bytes: bytes.len(),
        strokes: pad.strokes_committed(),
        summary,
    }))
}
