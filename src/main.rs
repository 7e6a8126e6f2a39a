use chrono::Local;
use clap::Parser;
use inspection_report::{cli, config, error, export, form, sign};
use export::PdfFonts;
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use std::path::{Path, PathBuf};

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// フォームを読み込み、基準フォルダと合わせて返す
fn load_form(path: &Path) -> Result<(form::FormInput, PathBuf)> {
    let input = form::FormInput::load(path)?;
    let base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    Ok((input, base_dir))
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Generate { form: form_path, output, font, bold_font, inspector } => {
            let now = Local::now();
            println!("📋 inspection-report - レポート生成");
            println!("   {}\n", form::long_timestamp(&now));

            // 1. フォーム読み込み
            println!("[1/3] フォームを読み込み中...");
            let (mut input, base_dir) = load_form(&form_path)?;
            if inspector.is_some() {
                input.inspector_name = inspector;
            }
            println!("✔ {}セクション\n", input.sections.len());

            // 2. 写真・署名の取り込み
            println!("[2/3] 写真と署名を取り込み中...");
            let data = form::collect_report(&input, &base_dir, &config, now, !cli.verbose)?;
            println!(
                "✔ 写真{}枚 / 署名{}\n",
                data.photo_count(),
                if data.signature.is_some() { "あり" } else { "なし" }
            );

            // 3. PDF出力
            println!("[3/3] PDFを生成中...");
            let output_dir = output
                .or_else(|| config.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from("."));
            let fonts = PdfFonts {
                regular: font.or_else(|| config.font_path.clone()),
                bold: bold_font.or_else(|| config.bold_font_path.clone()),
            };
            let (path, report) = export::export_report(&data, &output_dir, &fonts)?;
            println!("✔ PDF出力: {} ({}ページ)", path.display(), report.pages);
            if !report.fallbacks.is_empty() {
                println!("⚠ 画像を配置できなかった写真: {}枚（キャプションのみ）", report.fallbacks.len());
            }

            println!("\n✅ Report generated successfully!");
        }

        Commands::Plan { form: form_path, json } => {
            let (input, base_dir) = load_form(&form_path)?;
            let data = form::collect_report(&input, &base_dir, &config, Local::now(), false)?;
            let (doc, report) = export::plan_report(&data)?;

            if json {
                println!("{}", doc.to_json()?);
            } else {
                println!("📐 {}", data.file_name());
                print!("{}", doc.describe());
                println!(
                    "写真: 配置{}枚 / キャプションのみ{}枚",
                    report.photos_placed,
                    report.fallbacks.len()
                );
            }
        }

        Commands::Sign { gesture, output, format, container_width } => {
            println!("✍ inspection-report - 署名書き出し\n");
            match sign::export_signature(&gesture, &output, format, container_width, &config)? {
                Some(outcome) => {
                    println!(
                        "✔ 署名を保存: {} ({} bytes, {}ストローク)",
                        outcome.path.display(),
                        outcome.bytes,
                        outcome.strokes
                    );
                }
                None => println!("署名が空のため出力しませんでした"),
            }
        }

        Commands::Config { show, set_inspector, set_output_dir, set_font, set_bold_font } => {
            let mut config = config;

            if let Some(name) = set_inspector {
                config.set_inspector(name)?;
                println!("✔ 検査員名を設定しました");
            }

            if let Some(dir) = set_output_dir {
                config.set_output_dir(dir)?;
                println!("✔ 出力先を設定しました");
            }

            if let Some(path) = set_font {
                config.set_font_path(path)?;
                println!("✔ フォントを設定しました");
            }

            if let Some(path) = set_bold_font {
                config.set_bold_font_path(path)?;
                println!("✔ 見出しフォントを設定しました");
            }

            if show {
                let unset = || "未設定".to_string();
                println!("設定:");
                println!("  パス: {}", Config::config_path()?.display());
                println!("  検査員: {}", config.inspector().unwrap_or_else(unset));
                println!(
                    "  出力先: {}",
                    config.output_dir.as_ref().map(|p| p.display().to_string()).unwrap_or_else(unset)
                );
                println!(
                    "  フォント: {}",
                    config.font_path.as_ref().map(|p| p.display().to_string()).unwrap_or_else(unset)
                );
                println!(
                    "  見出しフォント: {}",
                    config.bold_font_path.as_ref().map(|p| p.display().to_string()).unwrap_or_else(unset)
                );
                println!("  署名サイズ: {}x{}", config.signature_width, config.signature_height);
                println!("  ペン幅: {}", config.pen_width);
            }
        }
    }

    Ok(())
}
