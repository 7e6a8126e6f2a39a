//! ジェスチャーログの再生
//!
//! 記録済みの入力（マウス・タッチ・ビューポート変化）を署名パッドに流し込む。
//!
//! ```json
//! [
//!   {"source": "viewport", "containerWidth": 440},
//!   {"source": "mouse", "type": "down", "clientX": 40, "clientY": 100},
//!   {"source": "mouse", "type": "move", "clientX": 90, "clientY": 120},
//!   {"source": "mouse", "type": "up"}
//! ]
//! ```

use super::input::{PointerInput, TouchInput};
use super::pad::SignaturePad;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// ログの1レコード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum GestureRecord {
    Mouse(PointerInput),
    Touch(TouchInput),
    Viewport {
        #[serde(rename = "containerWidth")]
        container_width: f32,
        #[serde(default)]
        left: f32,
        #[serde(default)]
        top: f32,
    },
    /// クリアボタン
    Clear,
}

/// 再生結果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub records: usize,
    /// 既定動作の抑止を要求したタッチイベント数
    pub suppressed_defaults: usize,
    pub resizes: usize,
    pub clears: usize,
}

/// JSON配列をパース
pub fn parse_gesture_log(json: &str) -> Result<Vec<GestureRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// パッドにログを順に適用
pub fn replay(pad: &mut SignaturePad, records: &[GestureRecord]) -> ReplaySummary {
    let mut summary = ReplaySummary::default();

    for record in records {
        summary.records += 1;
        match record {
            GestureRecord::Mouse(raw) => pad.pointer(raw),
            GestureRecord::Touch(raw) => {
                if pad.touch(raw) {
                    summary.suppressed_defaults += 1;
                }
            }
            GestureRecord::Viewport {
                container_width,
                left,
                top,
            } => {
                pad.resize(*container_width);
                pad.set_origin(*left, *top);
                summary.resizes += 1;
            }
            GestureRecord::Clear => {
                pad.clear();
                summary.clears += 1;
            }
        }
    }

    log::debug!(
        "gesture replay: {} records, {} strokes",
        summary.records,
        pad.strokes_committed()
    );
    summary
}
