//! 剪贴板监听模块
//!
//! 此模块负责：
//! - 抽象剪贴板读写（系统剪贴板 / 内存剪贴板）
//! - 轮询剪贴板变化，把物品文本放入有界队列
//! - 从队列取出文本、翻译并写回剪贴板
//!
//! 队列满时监听任务会等待，不会丢弃任何物品文本。
//! 停止信号发出后监听任务退出并关闭队列，翻译任务处理完剩余文本后退出。

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::TranslatorConfig;
use crate::constants::is_item_text;
use crate::error::Result;
use crate::stats::TranslationStats;
use crate::translation_error;
use crate::translator::Translator;

/// 剪贴板读写抽象
pub trait Clipboard: Send {
    /// 读取文本，剪贴板中没有文本时返回 `None`
    fn read_text(&mut self) -> Result<Option<String>>;

    /// 写入文本
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// 系统剪贴板
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new()
            .map_err(|e| translation_error!(clipboard, "初始化", e))?;
        Ok(Self { inner })
    }
}

impl Clipboard for SystemClipboard {
    fn read_text(&mut self) -> Result<Option<String>> {
        match self.inner.get_text() {
            Ok(text) => Ok(Some(text)),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(e) => Err(translation_error!(clipboard, "读取", e)),
        }
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        self.inner
            .set_text(text)
            .map_err(|e| translation_error!(clipboard, "写入", e))
    }
}

/// 内存剪贴板，克隆后共享同一份内容
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    content: Arc<Mutex<Option<String>>>,
    writes: Arc<Mutex<Vec<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// 模拟用户复制
    pub fn set(&self, text: &str) {
        if let Ok(mut content) = self.content.lock() {
            *content = Some(text.to_string());
        }
    }

    /// 当前内容
    pub fn get(&self) -> Option<String> {
        self.content.lock().ok().and_then(|content| content.clone())
    }

    /// 通过 `write_text` 写入过的全部文本
    pub fn written(&self) -> Vec<String> {
        self.writes
            .lock()
            .map(|writes| writes.clone())
            .unwrap_or_default()
    }
}

impl Clipboard for MemoryClipboard {
    fn read_text(&mut self) -> Result<Option<String>> {
        Ok(self.get())
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        self.set(text);
        self.writes
            .lock()
            .map_err(|_| translation_error!(clipboard, "写入", "内存剪贴板锁已损坏"))?
            .push(text.to_string());
        Ok(())
    }
}

/// 待翻译任务
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub text: String,
}

type SharedClipboard<C> = Arc<Mutex<C>>;

fn read_shared<C: Clipboard>(clipboard: &SharedClipboard<C>) -> Result<Option<String>> {
    clipboard
        .lock()
        .map_err(|_| translation_error!(clipboard, "读取", "剪贴板锁已损坏"))?
        .read_text()
}

fn write_shared<C: Clipboard>(clipboard: &SharedClipboard<C>, text: &str) -> Result<()> {
    clipboard
        .lock()
        .map_err(|_| translation_error!(clipboard, "写入", "剪贴板锁已损坏"))?
        .write_text(text)
}

/// 剪贴板监听任务（生产者）
///
/// 启动时已有的剪贴板内容视为已处理，只响应之后的变化。
pub async fn watch_clipboard<C: Clipboard>(
    clipboard: SharedClipboard<C>,
    queue: mpsc::Sender<Job>,
    marker: String,
    poll_interval: Duration,
    mut stop: watch::Receiver<bool>,
) {
    let mut last_seen = read_shared(&clipboard).ok().flatten();
    let mut ticker = tokio::time::interval(poll_interval);

    loop {
        tokio::select! {
            _ = stop.changed() => break,
            _ = ticker.tick() => {}
        }

        let current = match read_shared(&clipboard) {
            Ok(Some(text)) => text,
            Ok(None) => continue,
            Err(e) => {
                warn!("⚠️  {}", e);
                continue;
            }
        };

        if last_seen.as_deref() == Some(current.as_str()) {
            continue;
        }
        last_seen = Some(current.clone());

        if !is_item_text(&current, &marker) {
            debug!("剪贴板内容不是物品文本，跳过");
            continue;
        }

        debug!("📋 检测到物品文本 ({} 字节)", current.len());
        tokio::select! {
            _ = stop.changed() => break,
            sent = queue.send(Job { text: current }) => {
                if sent.is_err() {
                    warn!("翻译任务已退出，停止监听");
                    break;
                }
            }
        }
    }

    info!("剪贴板监听已停止");
}

/// 翻译任务（消费者），队列关闭且清空后返回累计统计
pub async fn run_translation_worker<C: Clipboard>(
    clipboard: SharedClipboard<C>,
    translator: Arc<Translator>,
    mut queue: mpsc::Receiver<Job>,
) -> TranslationStats {
    let mut stats = TranslationStats::default();

    while let Some(job) = queue.recv().await {
        let translated = translator.translate_with_stats(&job.text, &mut stats);
        match write_shared(&clipboard, &translated) {
            Ok(()) => info!("✅ 已翻译并写回剪贴板 ({} 行)", translated.lines().count()),
            Err(e) => warn!("⚠️  {}", e),
        }
    }

    info!("翻译任务已结束，共处理 {} 个物品文本", stats.payloads);
    stats
}

/// 正在运行的监听/翻译任务
pub struct ClipboardPipeline {
    stop: watch::Sender<bool>,
    watcher: JoinHandle<()>,
    worker: JoinHandle<TranslationStats>,
}

impl ClipboardPipeline {
    /// 启动监听任务与翻译任务
    pub fn spawn<C>(clipboard: C, translator: Arc<Translator>, config: &TranslatorConfig) -> Self
    where
        C: Clipboard + 'static,
    {
        let clipboard = Arc::new(Mutex::new(clipboard));
        // 容量为0时 `mpsc::channel` 会panic
        let (queue_tx, queue_rx) = mpsc::channel(config.queue_capacity().max(1));
        let (stop, stop_rx) = watch::channel(false);

        let watcher = tokio::spawn(watch_clipboard(
            Arc::clone(&clipboard),
            queue_tx,
            config.marker().to_string(),
            config.poll_interval(),
            stop_rx,
        ));
        let worker = tokio::spawn(run_translation_worker(clipboard, translator, queue_rx));

        Self {
            stop,
            watcher,
            worker,
        }
    }

    /// 发出停止信号，等待队列清空后返回统计
    pub async fn shutdown(self) -> Result<TranslationStats> {
        // 监听任务可能已经退出，发送失败无需处理
        let _ = self.stop.send(true);

        self.watcher
            .await
            .map_err(|e| anyhow::anyhow!("监听任务异常退出: {}", e))?;
        let stats = self
            .worker
            .await
            .map_err(|e| anyhow::anyhow!("翻译任务异常退出: {}", e))?;
        Ok(stats)
    }
}
