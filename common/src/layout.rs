//! レイアウト設定モジュール
//!
//! mm基準のレイアウト定義（Source of Truth）
//! 座標系はページ左上原点・下向き正。テキストのYはベースライン、画像のYは上端。

// ============================================
// mm基準レイアウト（Source of Truth）
// ============================================

/// A4サイズ（mm）
pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

/// 左余白（全要素共通のX）
pub const MARGIN_LEFT_MM: f32 = 20.0;

/// 改ページ後のカーソル位置
pub const PAGE_TOP_MM: f32 = 20.0;

/// メタ情報ブロック直下のカーソル開始位置
pub const CONTENT_START_MM: f32 = 60.0;

/// セクション開始時の改ページ閾値（これを超えたらページ満杯）
pub const SECTION_BREAK_MM: f32 = 250.0;

/// 写真配置前の改ページ閾値（写真1行分の余裕を見る）
pub const PHOTO_BREAK_MM: f32 = 180.0;

/// ノート折り返し幅
pub const TEXT_WIDTH_MM: f32 = 170.0;

// ============================================
// 変換係数
// ============================================

/// mm → pt変換 (1mm = 72/25.4 pt ≈ 2.835pt)
pub const MM_TO_PT: f32 = 72.0 / 25.4;

// ============================================
// フォント
// ============================================

/// フォントの太さ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

// ============================================
// レイアウト設定構造体
// ============================================

/// レポートのレイアウト設定（mm / pt）
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_left_mm: f32,
    pub page_top_mm: f32,

    pub title: &'static str,
    pub title_y_mm: f32,
    pub generated_y_mm: f32,
    pub inspector_y_mm: f32,
    pub content_start_mm: f32,

    pub section_break_mm: f32,
    pub photo_break_mm: f32,

    /// セクション名の送り
    pub header_advance_mm: f32,
    /// ステータス行の送り
    pub status_advance_mm: f32,
    pub text_width_mm: f32,
    pub line_height_mm: f32,
    pub notes_padding_mm: f32,

    pub photo_width_mm: f32,
    pub photo_height_mm: f32,
    pub caption_x_mm: f32,
    /// キャプションのベースライン（写真上端からのオフセット）
    pub caption_offset_mm: f32,
    pub photo_row_mm: f32,
    pub fallback_row_mm: f32,
    pub section_padding_mm: f32,

    pub signature_header: &'static str,
    pub signature_header_y_mm: f32,
    pub signature_y_mm: f32,
    pub signature_width_mm: f32,
    pub signature_height_mm: f32,

    /// フォントサイズ（pt）
    pub title_font_pt: f32,
    pub header_font_pt: f32,
    pub body_font_pt: f32,
}

impl ReportLayout {
    /// A4縦・週次点検レポート用レイアウト
    pub fn a4_portrait() -> Self {
        Self {
            page_width_mm: A4_WIDTH_MM,
            page_height_mm: A4_HEIGHT_MM,
            margin_left_mm: MARGIN_LEFT_MM,
            page_top_mm: PAGE_TOP_MM,

            title: "Building 1 – Owner Weekly Inspection Report",
            title_y_mm: 20.0,
            generated_y_mm: 35.0,
            inspector_y_mm: 45.0,
            content_start_mm: CONTENT_START_MM,

            section_break_mm: SECTION_BREAK_MM,
            photo_break_mm: PHOTO_BREAK_MM,

            header_advance_mm: 8.0,
            status_advance_mm: 10.0,
            text_width_mm: TEXT_WIDTH_MM,
            line_height_mm: 5.0,
            notes_padding_mm: 10.0,

            photo_width_mm: 50.0,
            photo_height_mm: 40.0,
            caption_x_mm: 80.0,
            caption_offset_mm: 20.0,
            photo_row_mm: 50.0,
            fallback_row_mm: 10.0,
            section_padding_mm: 10.0,

            signature_header: "Inspector Signature:",
            signature_header_y_mm: 30.0,
            signature_y_mm: 40.0,
            signature_width_mm: 100.0,
            signature_height_mm: 50.0,

            title_font_pt: 20.0,
            header_font_pt: 16.0,
            body_font_pt: 12.0,
        }
    }

    /// ノートブロックの高さ（行数 × 行送り + パディング）
    pub fn notes_block_mm(&self, line_count: usize) -> f32 {
        line_count as f32 * self.line_height_mm + self.notes_padding_mm
    }

    /// 上端基準Y → PDFの下端基準Y
    pub fn flip_y_mm(&self, y_from_top: f32) -> f32 {
        self.page_height_mm - y_from_top
    }
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self::a4_portrait()
    }
}

// ============================================
// ヘルパー関数
// ============================================

/// mm → pt 変換
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * MM_TO_PT
}

/// pt → mm 変換
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / MM_TO_PT
}
