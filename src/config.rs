use crate::error::{ReportError, Result};
use inspection_report_common::signature::surface::{DEFAULT_LOGICAL_HEIGHT, DEFAULT_LOGICAL_WIDTH};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 検査員名の環境変数（設定ファイルより優先）
pub const INSPECTOR_ENV: &str = "INSPECTION_INSPECTOR";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_inspector: Option<String>,
    pub output_dir: Option<PathBuf>,
    /// ✓/✗ を含むテキスト用の TrueType フォント
    pub font_path: Option<PathBuf>,
    /// 見出し用の TrueType フォント（省略時は font_path を流用）
    pub bold_font_path: Option<PathBuf>,
    pub signature_width: u32,
    pub signature_height: u32,
    pub pen_width: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_inspector: None,
            output_dir: None,
            font_path: None,
            bold_font_path: None,
            signature_width: DEFAULT_LOGICAL_WIDTH,
            signature_height: DEFAULT_LOGICAL_HEIGHT,
            pen_width: 2.0,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ReportError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("inspection-report").join("config.json"))
    }

    /// 既定の検査員名（環境変数を優先）
    pub fn inspector(&self) -> Option<String> {
        if let Ok(name) = std::env::var(INSPECTOR_ENV) {
            if !name.trim().is_empty() {
                return Some(name);
            }
        }

        self.default_inspector.clone()
    }

    pub fn set_inspector(&mut self, name: String) -> Result<()> {
        self.default_inspector = Some(name);
        self.save()
    }

    pub fn set_output_dir(&mut self, dir: PathBuf) -> Result<()> {
        self.output_dir = Some(dir);
        self.save()
    }

    pub fn set_font_path(&mut self, path: PathBuf) -> Result<()> {
        if !path.exists() {
            return Err(ReportError::FileNotFound(path.display().to_string()));
        }
        self.font_path = Some(path);
        self.save()
    }

    pub fn set_bold_font_path(&mut self, path: PathBuf) -> Result<()> {
        if !path.exists() {
            return Err(ReportError::FileNotFound(path.display().to_string()));
        }
        self.bold_font_path = Some(path);
        self.save()
    }
}
