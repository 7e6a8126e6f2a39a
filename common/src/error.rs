//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Raster encode error: {0}")]
    RasterEncode(String),

    #[error("Empty image: {0}x{1}")]
    EmptyImage(u32, u32),

    #[error("Document backend error: {0}")]
    Backend(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
