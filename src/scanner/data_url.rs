//! data URL のデコード
//!
//! `data:image/png;base64,....` 形式のみ受け付ける。

use base64::{engine::general_purpose::STANDARD, Engine as _};
use regex::Regex;

lazy_static::lazy_static! {
    static ref DATA_URL_RE: Regex =
        Regex::new(r"(?s)^data:(?P<mime>[\w.+-]+/[\w.+-]+)?(?P<params>(;[^,;]+)*?)(?P<b64>;base64)?,(?P<data>.*)$").unwrap();
}

/// デコード済みの data URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl DataUrl {
    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

/// data URL をデコード。形式不正・base64 以外は None
pub fn decode(url: &str) -> Option<DataUrl> {
    let caps = DATA_URL_RE.captures(url.trim())?;
    caps.name("b64")?;

    let mime = caps
        .name("mime")
        .map(|m| m.as_str().to_lowercase())
        .unwrap_or_else(|| "text/plain".to_string());
    let payload: String = caps["data"].chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD.decode(payload).ok()?;

    Some(DataUrl { mime, bytes })
}

/// バイト列を data URL に
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}
