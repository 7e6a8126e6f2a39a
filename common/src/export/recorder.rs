//! 記録用バックエンド
//!
//! 描画命令をメモリに積むだけの `DocumentBackend`。
//! ドライラン（組版計画の表示）と組版ロジックのテストに使う。

use super::report_core::DocumentBackend;
use crate::error::{Error, Result};
use crate::layout::FontWeight;
use crate::raster;
use crate::text_metrics;
use serde::Serialize;
use std::path::Path;

/// 記録された描画命令
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DocOp {
    #[serde(rename_all = "camelCase")]
    Text {
        page: usize,
        text: String,
        x_mm: f32,
        y_mm: f32,
        size_pt: f32,
        weight: FontWeight,
    },
    #[serde(rename_all = "camelCase")]
    Image {
        page: usize,
        x_mm: f32,
        y_mm: f32,
        width_mm: f32,
        height_mm: f32,
        bytes: usize,
    },
    AddPage {
        page: usize,
    },
}

/// メモリ上の文書
#[derive(Debug, Clone)]
pub struct RecordingDocument {
    ops: Vec<DocOp>,
    pages: usize,
    font_size_pt: f32,
    weight: FontWeight,
    reject_images: bool,
}

impl RecordingDocument {
    /// 1ページ目を持った空の文書
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            pages: 1,
            font_size_pt: 12.0,
            weight: FontWeight::Normal,
            reject_images: false,
        }
    }

    /// すべての画像配置を失敗させる
    pub fn rejecting_images() -> Self {
        Self {
            reject_images: true,
            ..Self::new()
        }
    }

    pub fn ops(&self) -> &[DocOp] {
        &self.ops
    }

    /// 全テキスト（出現順）
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DocOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// テキストが置かれたページ
    pub fn page_of(&self, needle: &str) -> Option<usize> {
        self.ops.iter().find_map(|op| match op {
            DocOp::Text { page, text, .. } if text == needle => Some(*page),
            _ => None,
        })
    }

    pub fn image_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DocOp::Image { .. }))
            .count()
    }

    /// 人が読む形式の組版計画
    pub fn describe(&self) -> String {
        let mut out = format!("pages: {}\n", self.pages);
        for op in &self.ops {
            let line = match op {
                DocOp::Text {
                    page,
                    text,
                    x_mm,
                    y_mm,
                    size_pt,
                    weight,
                } => format!(
                    "  p{} text  ({:>5.1}, {:>5.1}) {}pt {:?}: {}",
                    page, x_mm, y_mm, size_pt, weight, text
                ),
                DocOp::Image {
                    page,
                    x_mm,
                    y_mm,
                    width_mm,
                    height_mm,
                    bytes,
                } => format!(
                    "  p{} image ({:>5.1}, {:>5.1}) {}x{}mm [{} bytes]",
                    page, x_mm, y_mm, width_mm, height_mm, bytes
                ),
                DocOp::AddPage { page } => format!("  --- page {} ---", page),
            };
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.ops)?)
    }
}

impl Default for RecordingDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBackend for RecordingDocument {
    fn set_font(&mut self, size_pt: f32, weight: FontWeight) {
        self.font_size_pt = size_pt;
        self.weight = weight;
    }

    fn text(&mut self, text: &str, x_mm: f32, y_mm: f32) -> Result<()> {
        self.ops.push(DocOp::Text {
            page: self.pages,
            text: text.to_string(),
            x_mm,
            y_mm,
            size_pt: self.font_size_pt,
            weight: self.weight,
        });
        Ok(())
    }

    fn image(&mut self, data: &[u8], x_mm: f32, y_mm: f32, width_mm: f32, height_mm: f32) -> Result<()> {
        if self.reject_images {
            return Err(Error::Backend("image placement rejected".to_string()));
        }
        // PDFバックエンドと同じ復号を通し、配置可否を一致させる
        raster::decode_flattened(data)?;

        self.ops.push(DocOp::Image {
            page: self.pages,
            x_mm,
            y_mm,
            width_mm,
            height_mm,
            bytes: data.len(),
        });
        Ok(())
    }

    fn split_text_to_size(&self, text: &str, max_width_mm: f32) -> Vec<String> {
        text_metrics::split_text_to_size(text, max_width_mm, self.font_size_pt)
    }

    fn add_page(&mut self) -> Result<()> {
        self.pages += 1;
        self.ops.push(DocOp::AddPage { page: self.pages });
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages
    }

    fn save(self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
