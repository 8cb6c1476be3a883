use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use item_clip_translator::clipboard::{ClipboardPipeline, SystemClipboard};
use item_clip_translator::config::{Cli, TranslatorConfig};
use item_clip_translator::constants::{is_item_text, watcher_config::EXIT_COMMAND};
use item_clip_translator::stats::{print_stats_report, TranslationStats};
use item_clip_translator::utils::{init_logging, read_input};
use item_clip_translator::{DictionaryStore, Translator};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志系统
    init_logging(cli.verbose, cli.quiet);

    let config = TranslatorConfig::from(&cli);
    config.validate()?;

    // 词典加载失败时直接退出，不带着残缺词典运行
    let store = DictionaryStore::load_from_dir(config.data_dir())
        .with_context(|| format!("加载词典失败: {}", config.data_dir().display()))?;
    let translator = Arc::new(Translator::new(store).with_rarity_label(config.rarity_label()));

    let total_start = Instant::now();
    let result = match &cli.input {
        Some(path) => translate_once(&cli, &config, &translator, path),
        None => watch_until_exit(&config, translator).await,
    };

    match result {
        Ok(stats) => {
            if cli.stats {
                print_stats_report(&stats, total_start.elapsed());
            }
        }
        Err(e) => {
            error!("❌ 运行失败: {:#}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

/// 单次翻译：读取文件或标准输入，结果写到标准输出
fn translate_once(
    cli: &Cli,
    config: &TranslatorConfig,
    translator: &Translator,
    path: &Path,
) -> Result<TranslationStats> {
    let text = read_input(path)?;
    let mut stats = TranslationStats::default();

    if !cli.force && !is_item_text(&text, config.marker()) {
        warn!("⚠️  输入不包含物品类别标记 \"{}\"，原样输出", config.marker());
        print!("{}", text);
        return Ok(stats);
    }

    let translated = translator.translate_with_stats(&text, &mut stats);
    print!("{}", translated);
    std::io::stdout().flush().context("写入标准输出失败")?;
    Ok(stats)
}

/// 监听剪贴板，直到输入 exit 或收到 Ctrl+C
async fn watch_until_exit(
    config: &TranslatorConfig,
    translator: Arc<Translator>,
) -> Result<TranslationStats> {
    let clipboard = SystemClipboard::new().context("无法访问系统剪贴板")?;
    let pipeline = ClipboardPipeline::spawn(clipboard, translator, config);

    info!("👀 正在监听剪贴板...");
    print!("To exit, press Ctrl+C or type '{}': ", EXIT_COMMAND);
    std::io::stdout().flush().context("写入标准输出失败")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("读取标准输入失败")? {
                    Some(input) if input.trim() == EXIT_COMMAND => break,
                    Some(_) => continue,
                    None => {
                        // 标准输入已关闭，只能通过 Ctrl+C 退出
                        let _ = tokio::signal::ctrl_c().await;
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    info!("正在停止，等待队列中的物品文本翻译完成...");
    let stats = pipeline.shutdown().await?;
    Ok(stats)
}
