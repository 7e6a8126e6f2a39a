//! 建物点検レポート生成ツール
//!
//! フォーム入力（JSON）と写真・署名から点検レポートPDFを作る。

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod form;
pub mod scanner;
pub mod sign;
