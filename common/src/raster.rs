//! ラスタ画像ユーティリティ

use crate::error::{Error, Result};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;

/// エクスポート形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RasterFormat {
    /// 透過背景のまま
    #[default]
    Png,
    /// 白背景に合成
    Jpeg,
}

impl std::str::FromStr for RasterFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "png" => Ok(RasterFormat::Png),
            "jpeg" | "jpg" => Ok(RasterFormat::Jpeg),
            _ => Err(format!("Unknown raster format: {}. Use png or jpeg", s)),
        }
    }
}

/// 透過画素を白背景に合成する
pub fn flatten_onto_white(rgba: &RgbaImage) -> RgbImage {
    let (width, height) = rgba.dimensions();
    let mut rgb = RgbImage::new(width, height);
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let Rgba([r, g, b, a]) = *pixel;
        let alpha = a as f32 / 255.0;
        let blend = |c: u8| (c as f32 * alpha + 255.0 * (1.0 - alpha)).round() as u8;
        rgb.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
    }
    rgb
}

/// RGBAラスタをエンコードする
pub fn encode_rgba(rgba: &RgbaImage, format: RasterFormat) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    let written = match format {
        RasterFormat::Png => {
            DynamicImage::ImageRgba8(rgba.clone()).write_to(&mut cursor, ImageFormat::Png)
        }
        RasterFormat::Jpeg => DynamicImage::ImageRgb8(flatten_onto_white(rgba))
            .write_to(&mut cursor, ImageFormat::Jpeg),
    };
    written.map_err(|e| Error::RasterEncode(e.to_string()))?;
    Ok(cursor.into_inner())
}

/// エンコード済み画像を復号し、白背景に合成する
///
/// 配置前の検証にも使うので、ヘッダだけ正しく本体が壊れたデータはここで弾く。
pub fn decode_flattened(data: &[u8]) -> Result<RgbImage> {
    let decoded = image::load_from_memory(data)?;
    let (width, height) = (decoded.width(), decoded.height());
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage(width, height));
    }
    Ok(flatten_onto_white(&decoded.to_rgba8()))
}

/// 先頭バイトが既知の画像形式か
pub fn looks_like_image(bytes: &[u8]) -> bool {
    image::guess_format(bytes).is_ok()
}
