//! レポート組版コア
//!
//! `ReportData` を `DocumentBackend` に流し込み、改ページ込みのレイアウトを行う。
//! 縦カーソルは `LayoutCursor` 値として各描画ステップに渡し、更新後の値を返す。

use crate::error::Result;
use crate::layout::{FontWeight, ReportLayout};
use crate::types::{FormSection, PhotoRecord, ReportData};
use std::path::Path;

// ============================================
// バックエンド
// ============================================

/// 文書生成バックエンド（座標はmm、ページ左上原点）
pub trait DocumentBackend {
    /// 以降のテキストのフォント
    fn set_font(&mut self, size_pt: f32, weight: FontWeight);

    /// 現在ページにテキストを置く（y はベースライン）
    fn text(&mut self, text: &str, x_mm: f32, y_mm: f32) -> Result<()>;

    /// 複数行を行送り付きで置く
    fn text_lines(&mut self, lines: &[String], x_mm: f32, y_mm: f32, line_height_mm: f32) -> Result<()> {
        for (i, line) in lines.iter().enumerate() {
            self.text(line, x_mm, y_mm + i as f32 * line_height_mm)?;
        }
        Ok(())
    }

    /// エンコード済み画像を指定サイズで置く（y は上端）
    fn image(&mut self, data: &[u8], x_mm: f32, y_mm: f32, width_mm: f32, height_mm: f32) -> Result<()>;

    /// 現在のフォントで指定幅に折り返す
    fn split_text_to_size(&self, text: &str, max_width_mm: f32) -> Vec<String>;

    /// 新しいページを追加し、以降の描画先にする
    fn add_page(&mut self) -> Result<()>;

    fn page_count(&self) -> usize;

    /// ファイルに書き出す
    fn save(self, path: &Path) -> Result<()>
    where
        Self: Sized;
}

// ============================================
// レイアウトカーソル
// ============================================

/// 縦方向の組版位置
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    /// 1始まりのページ番号
    pub page: usize,
    pub y: f32,
}

impl LayoutCursor {
    pub fn new(page: usize, y: f32) -> Self {
        Self { page, y }
    }

    pub fn advance(self, dy: f32) -> Self {
        Self {
            y: self.y + dy,
            ..self
        }
    }

    /// 閾値を超えていればページ満杯
    pub fn needs_break(&self, threshold_mm: f32) -> bool {
        self.y > threshold_mm
    }

    pub fn next_page(self, top_mm: f32) -> Self {
        Self {
            page: self.page + 1,
            y: top_mm,
        }
    }

    /// 改ページ判定だけを行う純関数版。改ページしたら true を併せて返す
    pub fn break_if_beyond(self, threshold_mm: f32, top_mm: f32) -> (Self, bool) {
        if self.needs_break(threshold_mm) {
            (self.next_page(top_mm), true)
        } else {
            (self, false)
        }
    }
}

// ============================================
// 組版結果
// ============================================

/// 画像配置に失敗しキャプションのみ出力した写真
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoFallback {
    pub section: String,
    /// セクション内の0始まり位置
    pub index: usize,
    pub caption: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyReport {
    pub pages: usize,
    pub photos_placed: usize,
    pub fallbacks: Vec<PhotoFallback>,
    pub signature_page: bool,
}

// ============================================
// 組版
// ============================================

/// レポート組版器
#[derive(Debug, Clone, Default)]
pub struct ReportAssembler {
    layout: ReportLayout,
}

impl ReportAssembler {
    pub fn new(layout: ReportLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &ReportLayout {
        &self.layout
    }

    /// 1回の提出分を組版する（保存は呼び出し側）
    pub fn assemble<B: DocumentBackend>(&self, data: &ReportData, doc: &mut B) -> Result<AssemblyReport> {
        let mut report = AssemblyReport::default();

        let mut cursor = self.render_title_block(data, doc)?;
        for section in &data.sections {
            cursor = self.render_section(cursor, section, doc, &mut report)?;
        }

        if let Some(signature) = &data.signature {
            self.render_signature(cursor, signature, doc)?;
            report.signature_page = true;
        }

        report.pages = doc.page_count();
        log::debug!(
            "assembled {} sections into {} pages ({} photo fallbacks)",
            data.sections.len(),
            report.pages,
            report.fallbacks.len()
        );
        Ok(report)
    }

    /// 1ページ目のタイトルとメタ情報
    pub fn render_title_block<B: DocumentBackend>(&self, data: &ReportData, doc: &mut B) -> Result<LayoutCursor> {
        let l = &self.layout;

        doc.set_font(l.title_font_pt, FontWeight::Normal);
        doc.text(l.title, l.margin_left_mm, l.title_y_mm)?;

        doc.set_font(l.body_font_pt, FontWeight::Normal);
        doc.text(&format!("Generated: {}", data.timestamp), l.margin_left_mm, l.generated_y_mm)?;
        doc.text(&format!("Inspector: {}", data.inspector_name), l.margin_left_mm, l.inspector_y_mm)?;

        Ok(LayoutCursor::new(1, l.content_start_mm))
    }

    /// 閾値超過なら改ページしてカーソルを先頭へ
    pub fn break_page_if<B: DocumentBackend>(
        &self,
        cursor: LayoutCursor,
        threshold_mm: f32,
        doc: &mut B,
    ) -> Result<LayoutCursor> {
        let (next, broke) = cursor.break_if_beyond(threshold_mm, self.layout.page_top_mm);
        if broke {
            doc.add_page()?;
            log::debug!("page break at y={:.1}mm -> page {}", cursor.y, next.page);
        }
        Ok(next)
    }

    /// セクション1件（見出し・ステータス・ノート・写真）
    pub fn render_section<B: DocumentBackend>(
        &self,
        cursor: LayoutCursor,
        section: &FormSection,
        doc: &mut B,
        report: &mut AssemblyReport,
    ) -> Result<LayoutCursor> {
        let l = &self.layout;

        let cursor = self.break_page_if(cursor, l.section_break_mm, doc)?;
        let cursor = self.render_section_header(cursor, section, doc)?;
        let cursor = self.render_notes(cursor, &section.notes, doc)?;

        let mut cursor = cursor;
        for (index, photo) in section.photos.iter().enumerate() {
            cursor = self.render_photo(cursor, section, index, photo, doc, report)?;
        }

        Ok(cursor.advance(l.section_padding_mm))
    }

    /// 見出しとステータス行。両者は必ず同じページに載る
    pub fn render_section_header<B: DocumentBackend>(
        &self,
        cursor: LayoutCursor,
        section: &FormSection,
        doc: &mut B,
    ) -> Result<LayoutCursor> {
        let l = &self.layout;

        doc.set_font(l.header_font_pt, FontWeight::Bold);
        doc.text(&section.name, l.margin_left_mm, cursor.y)?;
        let cursor = cursor.advance(l.header_advance_mm);

        doc.set_font(l.body_font_pt, FontWeight::Normal);
        doc.text(section.status.report_text(), l.margin_left_mm, cursor.y)?;
        Ok(cursor.advance(l.status_advance_mm))
    }

    /// ノート（空なら何もしない）
    pub fn render_notes<B: DocumentBackend>(&self, cursor: LayoutCursor, notes: &str, doc: &mut B) -> Result<LayoutCursor> {
        if notes.is_empty() {
            return Ok(cursor);
        }
        let l = &self.layout;

        let lines = doc.split_text_to_size(notes, l.text_width_mm);
        doc.text_lines(&lines, l.margin_left_mm, cursor.y, l.line_height_mm)?;
        Ok(cursor.advance(l.notes_block_mm(lines.len())))
    }

    /// 写真1枚。配置失敗はキャプションのみで代替し、処理は続行する
    pub fn render_photo<B: DocumentBackend>(
        &self,
        cursor: LayoutCursor,
        section: &FormSection,
        index: usize,
        photo: &PhotoRecord,
        doc: &mut B,
        report: &mut AssemblyReport,
    ) -> Result<LayoutCursor> {
        let l = &self.layout;
        let cursor = self.break_page_if(cursor, l.photo_break_mm, doc)?;

        let placed = doc
            .image(
                &photo.image_data,
                l.margin_left_mm,
                cursor.y,
                l.photo_width_mm,
                l.photo_height_mm,
            )
            .and_then(|_| doc.text(&photo.caption, l.caption_x_mm, cursor.y + l.caption_offset_mm));

        match placed {
            Ok(()) => {
                report.photos_placed += 1;
                Ok(cursor.advance(l.photo_row_mm))
            }
            Err(e) => {
                log::warn!(
                    "photo {} in section '{}' could not be placed, caption only: {}",
                    index + 1,
                    section.name,
                    e
                );
                doc.text(&format!("Photo: {}", photo.caption), l.margin_left_mm, cursor.y)?;
                report.fallbacks.push(PhotoFallback {
                    section: section.name.clone(),
                    index,
                    caption: photo.caption.clone(),
                    reason: e.to_string(),
                });
                Ok(cursor.advance(l.fallback_row_mm))
            }
        }
    }

    /// 署名ページ（常に新しいページ）
    pub fn render_signature<B: DocumentBackend>(
        &self,
        cursor: LayoutCursor,
        signature: &[u8],
        doc: &mut B,
    ) -> Result<LayoutCursor> {
        let l = &self.layout;

        doc.add_page()?;
        let cursor = cursor.next_page(l.page_top_mm);

        doc.set_font(l.header_font_pt, FontWeight::Bold);
        doc.text(l.signature_header, l.margin_left_mm, l.signature_header_y_mm)?;
        doc.image(
            signature,
            l.margin_left_mm,
            l.signature_y_mm,
            l.signature_width_mm,
            l.signature_height_mm,
        )?;

        Ok(LayoutCursor::new(cursor.page, l.signature_y_mm + l.signature_height_mm))
    }
}

/// 既定レイアウトで組版する
pub fn assemble_report<B: DocumentBackend>(data: &ReportData, doc: &mut B) -> Result<AssemblyReport> {
    ReportAssembler::default().assemble(data, doc)
}
