//! 署名キャプチャ
//!
//! - input: マウス/タッチ → 共通イベント
//! - surface: 表示座標 ↔ 論理座標
//! - state: Idle/Drawing ステートマシン
//! - pad: ラスタ描画とエクスポート
//! - replay: 記録済みジェスチャーの再生

pub mod input;
pub mod pad;
pub mod replay;
pub mod state;
pub mod surface;

pub use input::{InputEvent, InputPhase, PointerInput, TouchInput};
pub use pad::{PenStyle, SignaturePad};
pub use replay::{parse_gesture_log, replay, GestureRecord, ReplaySummary};
pub use state::{DrawState, SignatureStroke};
pub use surface::{LogicalPoint, SurfaceGeometry};
