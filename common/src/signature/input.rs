//! 入力イベントの正規化
//!
//! マウス・タッチの生イベントを共通の `InputEvent { phase, x, y }` に変換する。
//! 座標はクライアント座標のまま。論理座標への変換は `SurfaceGeometry` が行う。

use serde::{Deserialize, Serialize};

/// 正規化後のフェーズ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputPhase {
    Start,
    Move,
    End,
}

/// 正規化後の入力イベント（クライアント座標）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEvent {
    pub phase: InputPhase,
    pub x: f32,
    pub y: f32,
}

impl InputEvent {
    pub fn new(phase: InputPhase, x: f32, y: f32) -> Self {
        Self { phase, x, y }
    }
}

/// アダプタの変換結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalized {
    pub event: Option<InputEvent>,
    /// ブラウザ既定のスクロール・ズームを抑止すべきか
    pub suppress_default: bool,
}

impl Normalized {
    fn pass(event: Option<InputEvent>) -> Self {
        Self {
            event,
            suppress_default: false,
        }
    }

    fn captured(event: Option<InputEvent>) -> Self {
        Self {
            event,
            suppress_default: true,
        }
    }
}

/// 入力ソースごとのアダプタ
pub trait InputAdapter {
    type Raw;

    fn normalize(&self, raw: &Self::Raw) -> Normalized;
}

// ============================================
// マウス（ポインタ）
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Down,
    Move,
    Up,
    /// 描画面から外れた
    Leave,
}

/// マウスの生イベント
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerInput {
    #[serde(rename = "type")]
    pub kind: PointerKind,
    #[serde(default)]
    pub client_x: f32,
    #[serde(default)]
    pub client_y: f32,
    /// 0 = 主ボタン
    #[serde(default)]
    pub button: u16,
}

/// マウス用アダプタ。主ボタン以外の押下は無視する
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerSource;

impl InputAdapter for PointerSource {
    type Raw = PointerInput;

    fn normalize(&self, raw: &PointerInput) -> Normalized {
        let event = match raw.kind {
            PointerKind::Down if raw.button != 0 => None,
            PointerKind::Down => Some(InputPhase::Start),
            PointerKind::Move => Some(InputPhase::Move),
            PointerKind::Up | PointerKind::Leave => Some(InputPhase::End),
        };
        Normalized::pass(event.map(|phase| InputEvent::new(phase, raw.client_x, raw.client_y)))
    }
}

// ============================================
// タッチ
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchKind {
    Start,
    Move,
    End,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchPoint {
    pub client_x: f32,
    pub client_y: f32,
}

/// タッチの生イベント（現在の接触点一覧付き）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchInput {
    #[serde(rename = "type")]
    pub kind: TouchKind,
    #[serde(default)]
    pub touches: Vec<TouchPoint>,
}

/// タッチ用アダプタ
///
/// 接触点がちょうど1つのときだけ Start/Move を出す。End/Cancel は接触喪失として End。
/// 描画面上では常に既定動作を抑止する。
#[derive(Debug, Clone, Copy, Default)]
pub struct TouchSource;

impl InputAdapter for TouchSource {
    type Raw = TouchInput;

    fn normalize(&self, raw: &TouchInput) -> Normalized {
        let single = match raw.touches.as_slice() {
            [only] => Some(*only),
            _ => None,
        };

        let event = match raw.kind {
            TouchKind::Start => {
                single.map(|t| InputEvent::new(InputPhase::Start, t.client_x, t.client_y))
            }
            TouchKind::Move => {
                single.map(|t| InputEvent::new(InputPhase::Move, t.client_x, t.client_y))
            }
            TouchKind::End | TouchKind::Cancel => {
                let (x, y) = raw
                    .touches
                    .first()
                    .map(|t| (t.client_x, t.client_y))
                    .unwrap_or((0.0, 0.0));
                Some(InputEvent::new(InputPhase::End, x, y))
            }
        };
        Normalized::captured(event)
    }
}
