//! フォーム状態の読み込みとレポートデータへの変換
//!
//! ```json
//! {
//!   "inspectorName": "J. Doe",
//!   "sections": [
//!     {
//!       "name": "Roof",
//!       "status": "acceptable",
//!       "notes": "No visible damage.",
//!       "photos": [{ "path": "photos/roof1.jpg", "caption": "" }],
//!       "photoDirs": ["photos/roof"]
//!     }
//!   ],
//!   "signature": { "gesture": "signature.json" }
//! }
//! ```
//!
//! 相対パスはフォームJSONのあるフォルダを基準に解決する。

use crate::config::Config;
use crate::error::{ReportError, Result};
use crate::scanner::{self, data_url, PhotoRequest, PhotoSource};
use crate::sign;
use chrono::{DateTime, Local, Utc};
use inspection_report_common::{FormSection, PhotoRecord, RasterFormat, ReportData, SectionStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// フォーム全体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormInput {
    pub inspector_name: Option<String>,
    pub sections: Vec<SectionInput>,
    pub signature: Option<SignatureInput>,
}

/// セクション入力
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionInput {
    pub name: String,
    pub status: SectionStatus,
    pub notes: String,
    pub photos: Vec<PhotoInput>,
    /// フォルダ内の画像をまとめて追加（ドロップ相当）
    pub photo_dirs: Vec<PathBuf>,
}

/// 写真入力（path か dataUrl のどちらか）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhotoInput {
    pub path: Option<PathBuf>,
    pub data_url: Option<String>,
    pub caption: String,
}

/// 署名入力
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SignatureInput {
    /// ジェスチャーログ（JSON）を再生して描く
    Gesture(PathBuf),
    /// 画像ファイル
    Image(PathBuf),
    DataUrl(String),
}

impl FormInput {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ReportError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// セクション名の重複チェック
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for section in &self.sections {
            let name = section.name.trim();
            if name.is_empty() {
                return Err(ReportError::InvalidForm("セクション名が空です".into()));
            }
            if !seen.insert(name) {
                return Err(ReportError::InvalidForm(format!("セクション名が重複しています: {}", name)));
            }
        }
        Ok(())
    }
}

/// 表示用の生成日時（例: "10/16/2026, 9:05:00 PM"）
pub fn display_timestamp(now: &DateTime<Local>) -> String {
    now.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// ヘッダー表示用の長い日時（例: "Friday, October 16, 2026 at 09:05:00 PM"）
pub fn long_timestamp(now: &DateTime<Local>) -> String {
    now.format("%A, %B %-d, %Y at %I:%M:%S %p").to_string()
}

fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_relative() {
        base_dir.join(path)
    } else {
        path.to_path_buf()
    }
}

/// 写真要求をセクションごとに組み立てる（明示指定 → フォルダの順）
fn photo_requests(section: &SectionInput, base_dir: &Path) -> Result<Vec<PhotoRequest>> {
    let mut requests = Vec::new();

    for photo in &section.photos {
        let source = match (&photo.path, &photo.data_url) {
            (Some(path), _) => PhotoSource::File(resolve(base_dir, path)),
            (None, Some(url)) => PhotoSource::DataUrl(url.clone()),
            (None, None) => {
                return Err(ReportError::InvalidForm(format!(
                    "{}: 写真に path も dataUrl もありません",
                    section.name
                )))
            }
        };
        requests.push(PhotoRequest {
            source,
            caption: photo.caption.clone(),
        });
    }

    for dir in &section.photo_dirs {
        for path in scanner::scan_folder(&resolve(base_dir, dir))? {
            requests.push(PhotoRequest {
                source: PhotoSource::File(path),
                caption: String::new(),
            });
        }
    }

    Ok(requests)
}

/// 署名ラスタを得る。空白の署名は None
pub fn load_signature(input: &SignatureInput, base_dir: &Path, config: &Config) -> Result<Option<Vec<u8>>> {
    match input {
        SignatureInput::Gesture(path) => {
            let (pad, _) = sign::replay_file(&resolve(base_dir, path), config, None)?;
            Ok(pad.signature(RasterFormat::Png)?)
        }
        SignatureInput::Image(path) => {
            let path = resolve(base_dir, path);
            if !path.exists() {
                return Err(ReportError::FileNotFound(path.display().to_string()));
            }
            let bytes = std::fs::read(&path)?;
            if !inspection_report_common::raster::looks_like_image(&bytes) {
                return Err(ReportError::ImageLoad(format!("署名画像を判別できません: {}", path.display())));
            }
            Ok(Some(bytes))
        }
        SignatureInput::DataUrl(url) => match data_url::decode(url) {
            Some(decoded) if decoded.is_image() => Ok(Some(decoded.bytes)),
            _ => Err(ReportError::ImageLoad("署名の data URL が画像ではありません".into())),
        },
    }
}

/// フォーム入力をレポートデータに変換する（提出時に一度だけ）
pub fn collect_report(
    form: &FormInput,
    base_dir: &Path,
    config: &Config,
    now: DateTime<Local>,
    show_progress: bool,
) -> Result<ReportData> {
    form.validate()?;

    // 全セクションの写真をまとめて並列読み込み
    let per_section: Vec<Vec<PhotoRequest>> = form
        .sections
        .iter()
        .map(|s| photo_requests(s, base_dir))
        .collect::<Result<_>>()?;
    let flat: Vec<PhotoRequest> = per_section.iter().flatten().cloned().collect();
    let mut loaded = scanner::load_photos(&flat, show_progress)?.into_iter();

    let mut sections = Vec::with_capacity(form.sections.len());
    for (input, requests) in form.sections.iter().zip(&per_section) {
        let mut section = FormSection::new(input.name.trim());
        section.status = input.status;
        section.notes = input.notes.clone();

        for photo in loaded.by_ref().take(requests.len()).flatten() {
            section.add_photo(PhotoRecord::new(photo.bytes, photo.caption));
        }
        section.fill_default_captions();
        sections.push(section);
    }

    let signature = match &form.signature {
        Some(input) => load_signature(input, base_dir, config)?,
        None => None,
    };

    let inspector = form
        .inspector_name
        .clone()
        .filter(|name| !name.trim().is_empty())
        .or_else(|| config.inspector());

    Ok(ReportData::new(
        display_timestamp(&now),
        now.with_timezone(&Utc).date_naive(),
        inspector.as_deref(),
        sections,
        signature,
    ))
}
