//! 写真の取り込み
//!
//! 画像ファイル・フォルダ・data URL から写真バイト列を集める。
//! 画像でない入力は黙って読み飛ばす。

pub mod data_url;

use crate::error::{ReportError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use inspection_report_common::raster::looks_like_image;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp", "tif", "tiff"];

/// 取り込み元
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoSource {
    File(PathBuf),
    DataUrl(String),
}

/// 取り込み要求（キャプションは空欄のまま渡してよい）
#[derive(Debug, Clone)]
pub struct PhotoRequest {
    pub source: PhotoSource,
    pub caption: String,
}

/// 取り込み済み写真
#[derive(Debug, Clone)]
pub struct LoadedPhoto {
    pub bytes: Vec<u8>,
    pub caption: String,
}

/// 拡張子が画像か
pub fn is_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// フォルダ直下の画像ファイル（ファイル名順）
pub fn scan_folder(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(ReportError::FolderNotFound(folder.display().to_string()));
    }

    let mut images: Vec<PathBuf> = WalkDir::new(folder)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_image_extension(p))
        .collect();

    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(images)
}

/// 1件読み込む。画像でなければ None
fn load_one(request: &PhotoRequest) -> Result<Option<LoadedPhoto>> {
    let bytes = match &request.source {
        PhotoSource::File(path) => {
            if !path.exists() {
                return Err(ReportError::FileNotFound(path.display().to_string()));
            }
            std::fs::read(path)?
        }
        PhotoSource::DataUrl(url) => match data_url::decode(url) {
            Some(decoded) if decoded.is_image() => decoded.bytes,
            _ => {
                log::debug!("skip non-image data URL");
                return Ok(None);
            }
        },
    };

    if !looks_like_image(&bytes) {
        log::debug!("skip non-image input: {:?}", request.source);
        return Ok(None);
    }

    Ok(Some(LoadedPhoto {
        bytes,
        caption: request.caption.clone(),
    }))
}

/// 写真を並列に読み込む（結果は要求順）
pub fn load_photos(requests: &[PhotoRequest], show_progress: bool) -> Result<Vec<Option<LoadedPhoto>>> {
    let progress = if show_progress {
        let bar = ProgressBar::new(requests.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("  {bar:30} {pos}/{len} 写真") {
            bar.set_style(style);
        }
        bar
    } else {
        ProgressBar::hidden()
    };

    let loaded = requests
        .par_iter()
        .map(|request| {
            let result = load_one(request);
            progress.inc(1);
            result
        })
        .collect::<Result<Vec<_>>>();

    progress.finish_and_clear();
    loaded
}
