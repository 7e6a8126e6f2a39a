//! printpdf による PDF バックエンド
//!
//! 組版コアは左上原点・mm で座標を渡すので、ここでページ下端基準に反転する。
//! 組み込みフォント（WinAnsi）で表せない ✓/✗ は ZapfDingbats のグリフに差し替える。

use crate::error::{ReportError, Result};
use inspection_report_common::export::{AssemblyReport, DocumentBackend, ReportAssembler};
use inspection_report_common::layout::{pt_to_mm, FontWeight, ReportLayout};
use inspection_report_common::raster::decode_flattened;
use inspection_report_common::{text_metrics, Error as CommonError, ReportData};
use printpdf::{
    BuiltinFont, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, IndirectFontRef, Mm,
    PdfDocument, PdfDocumentReference, PdfLayerReference, Px,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

const MM_PER_INCH: f32 = 25.4;

/// WinAnsi で表せない文字の代替
const REPLACEMENT_CHAR: char = '?';

/// 0x80-0x9F に割り当てられた WinAnsi 文字
const WIN_ANSI_EXTRA: &[char] = &[
    '€', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', 'Ž', '\u{2018}', '\u{2019}', '\u{201C}',
    '\u{201D}', '•', '–', '—', '˜', '™', 'š', '›', 'œ', 'ž', 'Ÿ',
];

fn backend_err(context: &str, e: impl std::fmt::Debug) -> CommonError {
    CommonError::Backend(format!("{}: {:?}", context, e))
}

/// 組み込みフォントで表せる文字か
pub fn win_ansi_encodable(c: char) -> bool {
    matches!(c, ' '..='~' | '\u{A0}'..='\u{FF}') || WIN_ANSI_EXTRA.contains(&c)
}

/// ZapfDingbats の文字コードと字幅（1/1000 em）
fn dingbat(c: char) -> Option<(char, u16)> {
    match c {
        // a20 heavy check mark
        '✓' | '✔' => Some(('4', 846)),
        // a24 heavy ballot X
        '✗' | '✘' => Some(('8', 677)),
        _ => None,
    }
}

/// 組み込みフォント用に分割したテキスト
#[derive(Debug, Clone, PartialEq)]
pub enum TextRun {
    /// Helvetica で書く部分
    Latin(String),
    /// ZapfDingbats の1文字（コードと字幅）
    Dingbat(char, u16),
}

/// テキストを組み込みフォントの書ける単位に分ける。戻り値の2番目は代替した文字数
pub fn builtin_runs(text: &str) -> (Vec<TextRun>, usize) {
    let mut runs = Vec::new();
    let mut latin = String::new();
    let mut replaced = 0;

    for c in text.chars() {
        if let Some((code, width)) = dingbat(c) {
            if !latin.is_empty() {
                runs.push(TextRun::Latin(std::mem::take(&mut latin)));
            }
            runs.push(TextRun::Dingbat(code, width));
        } else if win_ansi_encodable(c) {
            latin.push(c);
        } else {
            latin.push(REPLACEMENT_CHAR);
            replaced += 1;
        }
    }
    if !latin.is_empty() {
        runs.push(TextRun::Latin(latin));
    }
    (runs, replaced)
}

/// フォントファイルの指定（未指定のウェイトは組み込みフォント）
#[derive(Debug, Clone, Default)]
pub struct PdfFonts {
    pub regular: Option<PathBuf>,
    /// 省略時は regular の TrueType を見出しにも使う
    pub bold: Option<PathBuf>,
}

/// 1ウェイト分のフォント
#[derive(Clone)]
struct Face {
    font: IndirectFontRef,
    builtin: bool,
}

fn load_external(doc: &PdfDocumentReference, path: &Path) -> Result<Face> {
    if !path.exists() {
        return Err(ReportError::FileNotFound(path.display().to_string()));
    }
    let font = doc
        .add_external_font(File::open(path)?)
        .map_err(|e| ReportError::PdfGeneration(format!("フォント追加エラー: {:?}", e)))?;
    Ok(Face { font, builtin: false })
}

fn load_builtin(doc: &PdfDocumentReference, font: BuiltinFont) -> Result<Face> {
    let font = doc
        .add_builtin_font(font)
        .map_err(|e| ReportError::PdfGeneration(format!("フォント追加エラー: {:?}", e)))?;
    Ok(Face { font, builtin: true })
}

/// printpdf 文書
pub struct PdfBackend {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: Face,
    bold: Face,
    dingbats: IndirectFontRef,
    layout: ReportLayout,
    pages: usize,
    font_size_pt: f32,
    weight: FontWeight,
}

impl PdfBackend {
    /// 1ページ目を持った文書を作る
    pub fn new(title: &str, layout: &ReportLayout, fonts: &PdfFonts) -> Result<Self> {
        let (doc, page1, layer1) = PdfDocument::new(
            title,
            Mm(layout.page_width_mm),
            Mm(layout.page_height_mm),
            "Layer 1",
        );
        let layer = doc.get_page(page1).get_layer(layer1);

        let regular = match &fonts.regular {
            Some(path) => load_external(&doc, path)?,
            None => load_builtin(&doc, BuiltinFont::Helvetica)?,
        };
        let bold = match (&fonts.bold, &fonts.regular) {
            (Some(path), _) => load_external(&doc, path)?,
            (None, Some(_)) => regular.clone(),
            (None, None) => load_builtin(&doc, BuiltinFont::HelveticaBold)?,
        };
        let dingbats = load_builtin(&doc, BuiltinFont::ZapfDingbats)?.font;

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            dingbats,
            layout: layout.clone(),
            pages: 1,
            font_size_pt: layout.body_font_pt,
            weight: FontWeight::Normal,
        })
    }

    fn face(&self) -> &Face {
        match self.weight {
            FontWeight::Normal => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }

    /// 組み込みフォントで1行書く。✓/✗ は ZapfDingbats で書き、続きを右へずらす
    fn builtin_text(&self, text: &str, x_mm: f32, baseline_mm: f32) {
        let (runs, replaced) = builtin_runs(text);
        if replaced > 0 {
            log::warn!(
                "{} character(s) not representable in the builtin font were replaced with '{}': {}",
                replaced,
                REPLACEMENT_CHAR,
                text
            );
        }

        let font = &self.face().font;
        let mut x = x_mm;
        for run in runs {
            match run {
                TextRun::Latin(s) => {
                    let advance = text_metrics::text_width_mm(&s, self.font_size_pt);
                    self.layer.use_text(s, self.font_size_pt, Mm(x), Mm(baseline_mm), font);
                    x += advance;
                }
                TextRun::Dingbat(code, width) => {
                    self.layer
                        .use_text(code.to_string(), self.font_size_pt, Mm(x), Mm(baseline_mm), &self.dingbats);
                    x += pt_to_mm(width as f32 / 1000.0 * self.font_size_pt);
                }
            }
        }
    }
}

impl DocumentBackend for PdfBackend {
    fn set_font(&mut self, size_pt: f32, weight: FontWeight) {
        self.font_size_pt = size_pt;
        self.weight = weight;
    }

    fn text(&mut self, text: &str, x_mm: f32, y_mm: f32) -> inspection_report_common::Result<()> {
        let baseline = self.layout.flip_y_mm(y_mm);
        let face = self.face();
        if face.builtin {
            self.builtin_text(text, x_mm, baseline);
        } else {
            self.layer
                .use_text(text, self.font_size_pt, Mm(x_mm), Mm(baseline), &face.font);
        }
        Ok(())
    }

    fn image(
        &mut self,
        data: &[u8],
        x_mm: f32,
        y_mm: f32,
        width_mm: f32,
        height_mm: f32,
    ) -> inspection_report_common::Result<()> {
        let rgb = decode_flattened(data)?;
        let (width_px, height_px) = rgb.dimensions();

        let image = Image::from(ImageXObject {
            width: Px(width_px as usize),
            height: Px(height_px as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: true,
            image_data: rgb.into_raw(),
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        });

        // 幅を dpi で合わせ、高さは縦倍率で合わせる（縦横比は枠に従う）
        let dpi = width_px as f32 / (width_mm / MM_PER_INCH);
        let natural_height_mm = height_px as f32 / dpi * MM_PER_INCH;

        image.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(x_mm)),
                translate_y: Some(Mm(self.layout.flip_y_mm(y_mm + height_mm))),
                dpi: Some(dpi),
                scale_y: Some(height_mm / natural_height_mm),
                ..Default::default()
            },
        );
        Ok(())
    }

    fn split_text_to_size(&self, text: &str, max_width_mm: f32) -> Vec<String> {
        text_metrics::split_text_to_size(text, max_width_mm, self.font_size_pt)
    }

    fn add_page(&mut self) -> inspection_report_common::Result<()> {
        let (page, layer) = self.doc.add_page(
            Mm(self.layout.page_width_mm),
            Mm(self.layout.page_height_mm),
            format!("Layer {}", self.pages + 1),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.pages += 1;
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages
    }

    fn save(self, path: &Path) -> inspection_report_common::Result<()> {
        let file = File::create(path)?;
        self.doc
            .save(&mut BufWriter::new(file))
            .map_err(|e| backend_err("PDF保存エラー", e))?;
        Ok(())
    }
}

/// レポートを組版してPDFに保存する
pub fn generate_pdf(data: &ReportData, output_path: &Path, fonts: &PdfFonts) -> Result<AssemblyReport> {
    let assembler = ReportAssembler::default();
    let mut doc = PdfBackend::new(assembler.layout().title, assembler.layout(), fonts)?;

    let report = assembler.assemble(data, &mut doc)?;
    doc.save(output_path)?;

    log::info!("PDF saved: {} ({} pages)", output_path.display(), report.pages);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use inspection_report_common::raster::{encode_rgba, RasterFormat};
    use inspection_report_common::{FormSection, PhotoRecord, SectionStatus};

    fn sample_report(photos: usize) -> ReportData {
        let mut section = FormSection::new("Roof");
        section.status = SectionStatus::Acceptable;
        section.notes = "No visible damage.".to_string();
        for _ in 0..photos {
            let png = encode_rgba(&image::RgbaImage::new(8, 6), RasterFormat::Png).unwrap();
            section.add_photo(PhotoRecord::new(png, ""));
        }
        section.fill_default_captions();

        ReportData::new(
            "10/16/2026, 9:00:00 AM",
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            Some("J. Doe"),
            vec![section],
            None,
        )
    }

    #[test]
    fn test_generate_pdf_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");

        let report = generate_pdf(&sample_report(2), &path, &PdfFonts::default()).unwrap();
        assert_eq!(report.pages, 1);
        assert_eq!(report.photos_placed, 2);

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_undecodable_image_is_error() {
        let layout = ReportLayout::a4_portrait();
        let mut doc = PdfBackend::new("t", &layout, &PdfFonts::default()).unwrap();
        assert!(doc.image(b"garbage", 20.0, 20.0, 50.0, 40.0).is_err());
    }

    #[test]
    fn test_add_page_counts() {
        let layout = ReportLayout::a4_portrait();
        let mut doc = PdfBackend::new("t", &layout, &PdfFonts::default()).unwrap();
        doc.add_page().unwrap();
        doc.add_page().unwrap();
        assert_eq!(doc.page_count(), 3);
    }

    #[test]
    fn test_missing_font_file() {
        let layout = ReportLayout::a4_portrait();
        let fonts = PdfFonts {
            regular: Some(PathBuf::from("/nonexistent/font.ttf")),
            bold: None,
        };
        assert!(matches!(
            PdfBackend::new("t", &layout, &fonts),
            Err(ReportError::FileNotFound(_))
        ));

        let fonts = PdfFonts {
            regular: None,
            bold: Some(PathBuf::from("/nonexistent/bold.ttf")),
        };
        assert!(matches!(
            PdfBackend::new("t", &layout, &fonts),
            Err(ReportError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_builtin_runs_split_status_marks() {
        let (runs, replaced) = builtin_runs("✓ ACCEPTABLE");
        assert_eq!(replaced, 0);
        assert_eq!(
            runs,
            vec![TextRun::Dingbat('4', 846), TextRun::Latin(" ACCEPTABLE".to_string())]
        );

        let (runs, _) = builtin_runs("✗ NOT ACCEPTABLE");
        assert_eq!(runs[0], TextRun::Dingbat('8', 677));
    }

    #[test]
    fn test_builtin_runs_replace_unencodable() {
        let (runs, replaced) = builtin_runs("Roofの点検");
        assert_eq!(replaced, 3);
        assert_eq!(runs, vec![TextRun::Latin("Roof???".to_string())]);

        // en dash と Latin-1 はそのまま
        let (runs, replaced) = builtin_runs("Building 1 – Café");
        assert_eq!(replaced, 0);
        assert_eq!(runs, vec![TextRun::Latin("Building 1 – Café".to_string())]);
    }
}
