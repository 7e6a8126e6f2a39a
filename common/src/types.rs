//! 点検レポートの型定義
//!
//! - SectionStatus: 各セクションの判定（3値）
//! - PhotoRecord: 添付写真（エンコード済み画像バイト + キャプション）
//! - FormSection: フォーム上の1セクション
//! - ReportData: 提出時点のスナップショット（生成後は不変）

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 検査員名が未入力のときの表示
pub const INSPECTOR_NOT_PROVIDED: &str = "Not provided";

/// セクション判定
///
/// 未選択は必ず `Unset` に落とす（Option で曖昧にしない）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionStatus {
    Acceptable,
    NotAcceptable,
    #[default]
    Unset,
}

impl SectionStatus {
    /// フォームのラジオ値から判定を得る。未知の値・未選択は Unset
    pub fn from_radio_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("acceptable") => SectionStatus::Acceptable,
            Some("not-acceptable") => SectionStatus::NotAcceptable,
            _ => SectionStatus::Unset,
        }
    }

    /// レポートに印字するステータス行
    pub fn report_text(&self) -> &'static str {
        match self {
            SectionStatus::Acceptable => "✓ ACCEPTABLE",
            SectionStatus::NotAcceptable => "✗ NOT ACCEPTABLE",
            SectionStatus::Unset => "Status: Not Set",
        }
    }
}

impl fmt::Display for SectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionStatus::Acceptable => write!(f, "acceptable"),
            SectionStatus::NotAcceptable => write!(f, "not-acceptable"),
            SectionStatus::Unset => write!(f, "not-set"),
        }
    }
}

impl Serialize for SectionStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// null・未知の値は Unset として受け入れる
impl<'de> Deserialize<'de> for SectionStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(SectionStatus::from_radio_value(value.as_deref()))
    }
}

/// 添付写真
#[derive(Clone, PartialEq, Eq)]
pub struct PhotoRecord {
    /// エンコード済み画像（PNG/JPEGなど）。レコードが所有する
    pub image_data: Vec<u8>,
    pub caption: String,
}

impl PhotoRecord {
    pub fn new(image_data: Vec<u8>, caption: impl Into<String>) -> Self {
        Self {
            image_data,
            caption: caption.into(),
        }
    }
}

impl fmt::Debug for PhotoRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhotoRecord")
            .field("image_data", &format_args!("<{} bytes>", self.image_data.len()))
            .field("caption", &self.caption)
            .finish()
    }
}

/// キャプション既定値: 空欄なら "Photo N"（セクション内の1始まり位置）
pub fn default_caption(caption: &str, index: usize) -> String {
    if caption.trim().is_empty() {
        format!("Photo {}", index + 1)
    } else {
        caption.to_string()
    }
}

/// フォームの1セクション
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSection {
    pub name: String,
    pub status: SectionStatus,
    pub notes: String,
    pub photos: Vec<PhotoRecord>,
}

impl FormSection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// 写真を末尾に追加（挿入順を保持）
    pub fn add_photo(&mut self, photo: PhotoRecord) {
        self.photos.push(photo);
    }

    /// 写真を1枚削除。範囲外なら None
    pub fn remove_photo(&mut self, index: usize) -> Option<PhotoRecord> {
        if index < self.photos.len() {
            Some(self.photos.remove(index))
        } else {
            None
        }
    }

    /// 空欄キャプションを "Photo N" で埋める（提出時に一度だけ呼ぶ）
    pub fn fill_default_captions(&mut self) {
        for (index, photo) in self.photos.iter_mut().enumerate() {
            photo.caption = default_caption(&photo.caption, index);
        }
    }
}

/// 提出時点のレポートデータ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportData {
    /// 表示用の生成日時
    pub timestamp: String,
    /// ファイル名に埋め込む生成日（ISO暦日）
    pub generated_on: NaiveDate,
    pub inspector_name: String,
    pub sections: Vec<FormSection>,
    /// 署名ラスタ（エンコード済み）。未署名なら None
    pub signature: Option<Vec<u8>>,
}

impl ReportData {
    /// 検査員名を正規化して構築する
    pub fn new(
        timestamp: impl Into<String>,
        generated_on: NaiveDate,
        inspector_name: Option<&str>,
        sections: Vec<FormSection>,
        signature: Option<Vec<u8>>,
    ) -> Self {
        let inspector_name = match inspector_name.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => INSPECTOR_NOT_PROVIDED.to_string(),
        };

        Self {
            timestamp: timestamp.into(),
            generated_on,
            inspector_name,
            sections,
            signature,
        }
    }

    /// 出力ファイル名
    pub fn file_name(&self) -> String {
        report_file_name(self.generated_on)
    }

    pub fn photo_count(&self) -> usize {
        self.sections.iter().map(|s| s.photos.len()).sum()
    }
}

/// `Building1-Inspection-<YYYY-MM-DD>.pdf`
pub fn report_file_name(date: NaiveDate) -> String {
    format!("Building1-Inspection-{}.pdf", date.format("%Y-%m-%d"))
}
