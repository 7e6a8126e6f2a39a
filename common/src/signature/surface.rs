//! 描画面の座標系
//!
//! 論理解像度（既定 400×200）は表示サイズと独立。入力座標は
//! (logical / rendered) 倍して論理座標に写す。

/// 既定の論理解像度
pub const DEFAULT_LOGICAL_WIDTH: u32 = 400;
pub const DEFAULT_LOGICAL_HEIGHT: u32 = 200;

/// コンテナ幅から差し引く左右余白の合計
pub const CONTAINER_PADDING: f32 = 40.0;

/// 論理座標上の点
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogicalPoint {
    pub x: f32,
    pub y: f32,
}

impl LogicalPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 描画面のジオメトリ（論理サイズ・表示サイズ・表示原点）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceGeometry {
    logical_width: u32,
    logical_height: u32,
    rendered_width: f32,
    rendered_height: f32,
    origin_x: f32,
    origin_y: f32,
}

impl SurfaceGeometry {
    /// 等倍表示で初期化
    pub fn new(logical_width: u32, logical_height: u32) -> Self {
        let logical_width = logical_width.max(1);
        let logical_height = logical_height.max(1);
        Self {
            logical_width,
            logical_height,
            rendered_width: logical_width as f32,
            rendered_height: logical_height as f32,
            origin_x: 0.0,
            origin_y: 0.0,
        }
    }

    pub fn logical_size(&self) -> (u32, u32) {
        (self.logical_width, self.logical_height)
    }

    pub fn rendered_size(&self) -> (f32, f32) {
        (self.rendered_width, self.rendered_height)
    }

    /// 表示原点（クライアント座標での左上）
    pub fn set_origin(&mut self, left: f32, top: f32) {
        self.origin_x = left;
        self.origin_y = top;
    }

    /// ビューポート変化時に表示サイズを再計算する（アスペクト比維持）
    ///
    /// 幅は min(container - 40, 論理幅)、1未満にはしない。
    pub fn resize(&mut self, container_width: f32) {
        let max_width = (container_width - CONTAINER_PADDING).min(self.logical_width as f32);
        let rendered_width = max_width.max(1.0);
        let ratio = rendered_width / self.logical_width as f32;

        self.rendered_width = rendered_width;
        self.rendered_height = self.logical_height as f32 * ratio;
    }

    /// (sx, sy) = 論理 / 表示
    pub fn scale(&self) -> (f32, f32) {
        (
            self.logical_width as f32 / self.rendered_width,
            self.logical_height as f32 / self.rendered_height,
        )
    }

    /// クライアント座標 → 論理座標
    pub fn to_logical(&self, client_x: f32, client_y: f32) -> LogicalPoint {
        let (sx, sy) = self.scale();
        LogicalPoint::new((client_x - self.origin_x) * sx, (client_y - self.origin_y) * sy)
    }

    /// 論理座標 → クライアント座標
    pub fn to_client(&self, point: LogicalPoint) -> (f32, f32) {
        let (sx, sy) = self.scale();
        (point.x / sx + self.origin_x, point.y / sy + self.origin_y)
    }
}

impl Default for SurfaceGeometry {
    fn default() -> Self {
        Self::new(DEFAULT_LOGICAL_WIDTH, DEFAULT_LOGICAL_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_resize_preserves_aspect_ratio() {
        let mut geometry = SurfaceGeometry::default();
        geometry.resize(240.0);
        let (w, h) = geometry.rendered_size();
        assert!(approx(w, 200.0));
        assert!(approx(h, 100.0));

        // 広いコンテナでも論理幅を超えない
        geometry.resize(2000.0);
        assert_eq!(geometry.rendered_size(), (400.0, 200.0));
    }

    #[test]
    fn test_resize_tiny_container_clamped() {
        let mut geometry = SurfaceGeometry::default();
        geometry.resize(10.0);
        let (w, h) = geometry.rendered_size();
        assert!(approx(w, 1.0));
        assert!(h > 0.0);
        let (sx, sy) = geometry.scale();
        assert!(sx.is_finite() && sy.is_finite());
    }

    #[test]
    fn test_to_logical_scales_linearly() {
        let mut geometry = SurfaceGeometry::default();
        geometry.resize(240.0);
        geometry.set_origin(30.0, 50.0);

        let p = geometry.to_logical(30.0 + 100.0, 50.0 + 25.0);
        assert!(approx(p.x, 200.0));
        assert!(approx(p.y, 50.0));
    }

    #[test]
    fn test_mapping_is_invertible() {
        let mut geometry = SurfaceGeometry::new(400, 200);
        geometry.resize(173.0);
        geometry.set_origin(12.0, 7.5);

        for &(cx, cy) in &[(12.0, 7.5), (50.0, 40.0), (140.0, 72.0)] {
            let logical = geometry.to_logical(cx, cy);
            let (bx, by) = geometry.to_client(logical);
            assert!(approx(bx, cx) && approx(by, cy));
        }
    }
}
