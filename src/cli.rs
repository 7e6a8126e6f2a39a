use clap::{Parser, Subcommand};
use inspection_report_common::RasterFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inspection-report")]
#[command(about = "建物点検レポート生成ツール（署名・写真付きPDF）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// フォームJSONからレポートPDFを生成
    Generate {
        /// フォームJSONファイル
        #[arg(required = true)]
        form: PathBuf,

        /// 出力ファイル/ディレクトリ（デフォルト: 設定の出力先、なければカレント）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 本文用TrueTypeフォント（省略時は組み込みHelvetica、✓/✗ はZapfDingbats）
        #[arg(long)]
        font: Option<PathBuf>,

        /// 見出し用TrueTypeフォント（省略時は --font を見出しにも使う）
        #[arg(long)]
        bold_font: Option<PathBuf>,

        /// 検査員名（フォームの値より優先）
        #[arg(long)]
        inspector: Option<String>,
    },

    /// PDFを書かずに組版計画を表示
    Plan {
        /// フォームJSONファイル
        #[arg(required = true)]
        form: PathBuf,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// ジェスチャーログを再生して署名画像を書き出す
    Sign {
        /// ジェスチャーログJSONファイル
        #[arg(required = true)]
        gesture: PathBuf,

        /// 出力画像ファイル
        #[arg(short, long, required = true)]
        output: PathBuf,

        /// 画像形式 (png/jpeg)
        #[arg(long, default_value = "png")]
        format: RasterFormat,

        /// 表示コンテナ幅（px）。指定時は再生前にリサイズ
        #[arg(long)]
        container_width: Option<f32>,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 既定の検査員名を設定
        #[arg(long)]
        set_inspector: Option<String>,

        /// 既定の出力先を設定
        #[arg(long)]
        set_output_dir: Option<PathBuf>,

        /// 既定の本文フォントを設定
        #[arg(long)]
        set_font: Option<PathBuf>,

        /// 既定の見出しフォントを設定
        #[arg(long)]
        set_bold_font: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_sign_jpeg() {
        let cli = Cli::parse_from(["inspection-report", "sign", "g.json", "-o", "s.jpg", "--format", "jpeg"]);
        match cli.command {
            Commands::Sign { format, .. } => assert_eq!(format, RasterFormat::Jpeg),
            _ => panic!("expected sign"),
        }
    }

    #[test]
    fn test_parse_generate_fonts() {
        let cli = Cli::parse_from([
            "inspection-report", "generate", "form.json", "--font", "r.ttf", "--bold-font", "b.ttf",
        ]);
        match cli.command {
            Commands::Generate { font, bold_font, .. } => {
                assert_eq!(font, Some(PathBuf::from("r.ttf")));
                assert_eq!(bold_font, Some(PathBuf::from("b.ttf")));
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_global_verbose() {
        let cli = Cli::parse_from(["inspection-report", "plan", "form.json", "-v"]);
        assert!(cli.verbose);
    }
}
