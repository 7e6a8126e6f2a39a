//! テキスト幅の計測と折り返し
//!
//! 標準14フォントのHelvetica字幅（1/1000em）で計測する。
//! 外部フォント使用時も折り返し幅の目安としてこの表を使う。

use crate::layout::pt_to_mm;

/// ASCII 0x20..=0x7E の Helvetica 字幅
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// 表にない文字の字幅
const FALLBACK_WIDTH: u16 = 556;

fn char_units(c: char) -> u16 {
    let code = c as u32;
    if (0x20..=0x7E).contains(&code) {
        HELVETICA_WIDTHS[(code - 0x20) as usize]
    } else {
        FALLBACK_WIDTH
    }
}

/// 文字列幅（mm）
pub fn text_width_mm(text: &str, font_size_pt: f32) -> f32 {
    let units: u32 = text.chars().map(|c| char_units(c) as u32).sum();
    pt_to_mm(units as f32 / 1000.0 * font_size_pt)
}

/// 指定幅に収まるよう行分割する
///
/// 改行で段落を分け、段落内は空白区切りで詰める。1語が幅を超える場合は文字単位で割る。
pub fn split_text_to_size(text: &str, max_width_mm: f32, font_size_pt: f32) -> Vec<String> {
    let space_mm = text_width_mm(" ", font_size_pt);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        let mut line = String::new();
        let mut line_mm = 0.0_f32;

        for word in paragraph.split(' ') {
            let word_mm = text_width_mm(word, font_size_pt);

            if !line.is_empty() {
                if line_mm + space_mm + word_mm <= max_width_mm {
                    line.push(' ');
                    line.push_str(word);
                    line_mm += space_mm + word_mm;
                    continue;
                }
                lines.push(std::mem::take(&mut line));
            }

            if word_mm <= max_width_mm {
                line.push_str(word);
                line_mm = word_mm;
            } else {
                let mut chunks = break_word(word, max_width_mm, font_size_pt);
                // 最後の断片は次の語と同じ行に続けられる
                line = chunks.pop().unwrap_or_default();
                line_mm = text_width_mm(&line, font_size_pt);
                lines.extend(chunks);
            }
        }

        lines.push(line);
    }

    lines
}

fn break_word(word: &str, max_width_mm: f32, font_size_pt: f32) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut chunk = String::new();

    for c in word.chars() {
        let mut candidate = chunk.clone();
        candidate.push(c);
        if !chunk.is_empty() && text_width_mm(&candidate, font_size_pt) > max_width_mm {
            chunks.push(std::mem::take(&mut chunk));
            chunk.push(c);
        } else {
            chunk = candidate;
        }
    }

    if !chunk.is_empty() {
        chunks.push(chunk);
    }
    chunks
}
