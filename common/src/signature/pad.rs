//! 署名パッド
//!
//! 入力アダプタ → ステートマシン → ラスタ描画 をつなぐ。
//! ストロークは保持せず、合成済みラスタだけを持つ。

use super::input::{InputAdapter, InputEvent, PointerInput, PointerSource, TouchInput, TouchSource};
use super::state::{step, DrawState, InkCommand};
use super::surface::{LogicalPoint, SurfaceGeometry};
use crate::error::Result;
use crate::raster::{encode_rgba, RasterFormat};
use image::{Rgba, RgbaImage};

/// ペン設定
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenStyle {
    /// 線幅（論理単位）
    pub width: f32,
    pub color: Rgba<u8>,
}

impl Default for PenStyle {
    fn default() -> Self {
        Self {
            width: 2.0,
            color: Rgba([0, 0, 0, 255]),
        }
    }
}

/// 署名キャプチャ
#[derive(Debug, Clone)]
pub struct SignaturePad {
    geometry: SurfaceGeometry,
    state: DrawState,
    raster: RgbaImage,
    pen: PenStyle,
    strokes_committed: usize,
}

impl SignaturePad {
    pub fn new(geometry: SurfaceGeometry, pen: PenStyle) -> Self {
        let (width, height) = geometry.logical_size();
        Self {
            geometry,
            state: DrawState::Idle,
            raster: RgbaImage::new(width, height),
            pen,
            strokes_committed: 0,
        }
    }

    pub fn geometry(&self) -> &SurfaceGeometry {
        &self.geometry
    }

    pub fn state(&self) -> &DrawState {
        &self.state
    }

    pub fn raster(&self) -> &RgbaImage {
        &self.raster
    }

    /// 確定したストローク数（clear でリセット）
    pub fn strokes_committed(&self) -> usize {
        self.strokes_committed
    }

    /// ビューポート変化に追従
    pub fn resize(&mut self, container_width: f32) {
        self.geometry.resize(container_width);
    }

    pub fn set_origin(&mut self, left: f32, top: f32) {
        self.geometry.set_origin(left, top);
    }

    /// 正規化済みイベントを処理
    pub fn dispatch(&mut self, event: InputEvent) {
        let point = self.geometry.to_logical(event.x, event.y);
        let state = std::mem::take(&mut self.state);
        let transition = step(state, event.phase, point);

        if let Some(ink) = transition.ink {
            self.paint(ink);
        }
        if transition.finished.is_some() {
            self.strokes_committed += 1;
        }
        self.state = transition.state;
    }

    /// マウスイベント
    pub fn pointer(&mut self, raw: &PointerInput) {
        if let Some(event) = PointerSource.normalize(raw).event {
            self.dispatch(event);
        }
    }

    /// タッチイベント。既定動作を抑止すべきなら true
    pub fn touch(&mut self, raw: &TouchInput) -> bool {
        let normalized = TouchSource.normalize(raw);
        if let Some(event) = normalized.event {
            self.dispatch(event);
        }
        normalized.suppress_default
    }

    /// ラスタを消去して Idle に戻す
    pub fn clear(&mut self) {
        for pixel in self.raster.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
        self.state = DrawState::Idle;
        self.strokes_committed = 0;
    }

    /// インクが1画素も無ければ true
    pub fn is_blank(&self) -> bool {
        self.raster.pixels().all(|p| p.0[3] == 0)
    }

    /// 現在のラスタをエンコードして返す（未描画なら空白画像）
    pub fn export_raster(&self, format: RasterFormat) -> Result<Vec<u8>> {
        encode_rgba(&self.raster, format)
    }

    /// 署名済みならラスタ、空白なら None
    pub fn signature(&self, format: RasterFormat) -> Result<Option<Vec<u8>>> {
        if self.is_blank() {
            Ok(None)
        } else {
            self.export_raster(format).map(Some)
        }
    }

    fn paint(&mut self, ink: InkCommand) {
        match ink {
            InkCommand::Dot(point) => self.stamp(point),
            InkCommand::Segment(from, to) => {
                let dx = to.x - from.x;
                let dy = to.y - from.y;
                let length = (dx * dx + dy * dy).sqrt();
                // 丸キャップのスタンプを 1/4 単位間隔で並べる
                let steps = (length * 4.0).ceil().max(1.0) as u32;
                for i in 0..=steps {
                    let t = i as f32 / steps as f32;
                    self.stamp(LogicalPoint::new(from.x + dx * t, from.y + dy * t));
                }
            }
        }
    }

    /// 中心 point、直径 = 線幅 の円を塗る（画素中心で判定）
    fn stamp(&mut self, point: LogicalPoint) {
        let radius = (self.pen.width / 2.0).max(0.75);
        let (width, height) = self.raster.dimensions();

        let min_x = (point.x - radius).floor().max(0.0) as u32;
        let min_y = (point.y - radius).floor().max(0.0) as u32;
        let max_x = (point.x + radius).ceil().min(width as f32 - 1.0);
        let max_y = (point.y + radius).ceil().min(height as f32 - 1.0);
        if max_x < 0.0 || max_y < 0.0 {
            return;
        }

        for py in min_y..=max_y as u32 {
            for px in min_x..=max_x as u32 {
                let cx = px as f32 + 0.5 - point.x;
                let cy = py as f32 + 0.5 - point.y;
                if cx * cx + cy * cy <= radius * radius {
                    self.raster.put_pixel(px, py, self.pen.color);
                }
            }
        }
    }
}

impl Default for SignaturePad {
    fn default() -> Self {
        Self::new(SurfaceGeometry::default(), PenStyle::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::input::{InputPhase, PointerKind, TouchKind, TouchPoint};

    fn ink_pixels(pad: &SignaturePad) -> usize {
        pad.raster().pixels().filter(|p| p.0[3] > 0).count()
    }

    #[test]
    fn test_new_pad_is_blank_and_idle() {
        let pad = SignaturePad::default();
        assert!(pad.is_blank());
        assert_eq!(*pad.state(), DrawState::Idle);
        assert_eq!(pad.raster().dimensions(), (400, 200));
    }

    #[test]
    fn test_single_point_gesture_leaves_ink() {
        let mut pad = SignaturePad::default();
        pad.dispatch(InputEvent::new(InputPhase::Start, 100.0, 50.0));
        pad.dispatch(InputEvent::new(InputPhase::End, 100.0, 50.0));
        assert!(!pad.is_blank());
        assert_eq!(pad.strokes_committed(), 1);
    }

    #[test]
    fn test_moves_without_down_leave_no_ink() {
        let mut pad = SignaturePad::default();
        for i in 0..10 {
            pad.dispatch(InputEvent::new(InputPhase::Move, i as f32 * 10.0, 20.0));
        }
        assert!(pad.is_blank());
    }

    #[test]
    fn test_segment_is_continuous() {
        let mut pad = SignaturePad::default();
        pad.dispatch(InputEvent::new(InputPhase::Start, 10.0, 100.0));
        pad.dispatch(InputEvent::new(InputPhase::Move, 110.0, 100.0));
        pad.dispatch(InputEvent::new(InputPhase::End, 110.0, 100.0));

        // 横線上のすべての列にインクがある
        for x in 10..110 {
            let column_has_ink = (98..=101).any(|y| pad.raster().get_pixel(x, y).0[3] > 0);
            assert!(column_has_ink, "gap at x={}", x);
        }
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut pad = SignaturePad::default();
        pad.dispatch(InputEvent::new(InputPhase::Start, 10.0, 10.0));
        pad.dispatch(InputEvent::new(InputPhase::Move, 60.0, 40.0));

        pad.clear();
        assert!(pad.is_blank());
        assert_eq!(*pad.state(), DrawState::Idle);

        pad.clear();
        assert!(pad.is_blank());
        assert_eq!(*pad.state(), DrawState::Idle);
        assert_eq!(pad.strokes_committed(), 0);
    }

    #[test]
    fn test_clear_mid_stroke_stops_drawing() {
        let mut pad = SignaturePad::default();
        pad.dispatch(InputEvent::new(InputPhase::Start, 10.0, 10.0));
        pad.clear();
        pad.dispatch(InputEvent::new(InputPhase::Move, 60.0, 40.0));
        assert!(pad.is_blank());
    }

    #[test]
    fn test_rescaled_input_lands_in_logical_space() {
        let mut pad = SignaturePad::default();
        pad.resize(240.0); // 表示 200×100 → 倍率2
        pad.pointer(&PointerInput {
            kind: PointerKind::Down,
            client_x: 50.0,
            client_y: 25.0,
            button: 0,
        });
        assert!(pad.raster().get_pixel(100, 50).0[3] > 0);
        assert_eq!(pad.raster().get_pixel(50, 25).0[3], 0);
    }

    #[test]
    fn test_resized_gesture_is_geometrically_similar() {
        let draw = |container: f32| {
            let mut pad = SignaturePad::default();
            pad.resize(container);
            let (w, h) = pad.geometry().rendered_size();
            pad.dispatch(InputEvent::new(InputPhase::Start, w * 0.1, h * 0.5));
            pad.dispatch(InputEvent::new(InputPhase::Move, w * 0.9, h * 0.5));
            pad.dispatch(InputEvent::new(InputPhase::End, w * 0.9, h * 0.5));
            pad
        };

        let full = draw(440.0);
        let half = draw(240.0);
        assert_eq!(full.raster(), half.raster());
        assert!(ink_pixels(&full) > 0);
    }

    #[test]
    fn test_touch_draws_and_suppresses_default() {
        let mut pad = SignaturePad::default();
        let touch = |kind, x, y| TouchInput {
            kind,
            touches: vec![TouchPoint {
                client_x: x,
                client_y: y,
            }],
        };

        assert!(pad.touch(&touch(TouchKind::Start, 20.0, 20.0)));
        assert!(pad.touch(&touch(TouchKind::Move, 80.0, 60.0)));
        assert!(pad.state().is_drawing());
        assert!(pad.touch(&TouchInput {
            kind: TouchKind::End,
            touches: vec![],
        }));
        assert!(!pad.state().is_drawing());
        assert!(!pad.is_blank());
    }

    #[test]
    fn test_export_blank_raster_is_not_error() {
        let pad = SignaturePad::default();
        let png = pad.export_raster(RasterFormat::Png).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (400, 200));
        assert!(decoded.pixels().all(|p| p.0[3] == 0));
        assert!(pad.signature(RasterFormat::Png).unwrap().is_none());
    }

    #[test]
    fn test_export_signed_raster_round_trips_ink() {
        let mut pad = SignaturePad::default();
        pad.dispatch(InputEvent::new(InputPhase::Start, 200.0, 100.0));
        let png = pad.signature(RasterFormat::Png).unwrap().unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(200, 100).0[3], 255);
    }
}
