//! 配置管理模块
//!
//! 提供CLI参数解析和翻译器配置管理功能

// 标准库导入
use std::path::{Path, PathBuf};
use std::time::Duration;

// 第三方crate导入
use clap::Parser;

// 本地模块导入
use crate::constants::{data_config, item_format, watcher_config};
use crate::error::Result;
use crate::translation_error;

/// 翻译器配置结构体
///
/// 支持Builder模式进行链式配置。
///
/// # Examples
///
/// ```rust
/// use item_clip_translator::config::TranslatorConfig;
///
/// let config = TranslatorConfig::new()
///     .with_data_dir("./data")
///     .with_poll_interval_ms(200)
///     .with_queue_capacity(16);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    /// 词典数据目录
    data_dir: PathBuf,
    /// 物品类别标记
    marker: String,
    /// 稀有度标签
    rarity_label: String,
    /// 剪贴板轮询间隔（毫秒）
    poll_interval_ms: u64,
    /// 待翻译队列容量
    queue_capacity: usize,
}

impl TranslatorConfig {
    /// 创建新的配置实例
    ///
    /// 返回具有默认值的配置实例：
    /// - 数据目录: `./data`
    /// - 物品标记: `アイテムクラス`
    /// - 稀有度标签: `Rarity:`
    /// - 轮询间隔: 300ms
    /// - 队列容量: 10
    pub fn new() -> Self {
        Self {
            data_dir: PathBuf::from(data_config::DEFAULT_DATA_DIR),
            marker: item_format::ITEM_CLASS_MARKER.to_string(),
            rarity_label: item_format::RARITY_LABEL.to_string(),
            poll_interval_ms: watcher_config::DEFAULT_POLL_INTERVAL_MS,
            queue_capacity: watcher_config::DEFAULT_QUEUE_CAPACITY,
        }
    }

    /// 获取数据目录
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// 获取物品类别标记
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// 获取稀有度标签
    pub fn rarity_label(&self) -> &str {
        &self.rarity_label
    }

    /// 获取轮询间隔
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// 获取队列容量
    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }

    /// 设置数据目录
    pub fn with_data_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.data_dir = dir.as_ref().to_path_buf();
        self
    }

    /// 设置物品类别标记
    pub fn with_marker(mut self, marker: &str) -> Self {
        self.marker = marker.to_string();
        self
    }

    /// 设置稀有度标签
    pub fn with_rarity_label(mut self, label: &str) -> Self {
        self.rarity_label = label.to_string();
        self
    }

    /// 设置轮询间隔（毫秒）
    pub fn with_poll_interval_ms(mut self, millis: u64) -> Self {
        self.poll_interval_ms = millis;
        self
    }

    /// 设置队列容量
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        if self.marker.is_empty() {
            return Err(translation_error!(config, "marker", "物品类别标记不能为空"));
        }
        if self.rarity_label.is_empty() {
            return Err(translation_error!(config, "rarity_label", "稀有度标签不能为空"));
        }
        if self.poll_interval_ms == 0 {
            return Err(translation_error!(config, "poll_interval_ms", "轮询间隔必须大于0"));
        }
        if self.queue_capacity == 0 {
            return Err(translation_error!(config, "queue_capacity", "队列容量必须大于0"));
        }
        Ok(())
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&Cli> for TranslatorConfig {
    fn from(cli: &Cli) -> Self {
        TranslatorConfig::new()
            .with_data_dir(&cli.data_dir)
            .with_marker(&cli.marker)
            .with_rarity_label(&cli.rarity_label)
            .with_poll_interval_ms(cli.poll_interval_ms)
            .with_queue_capacity(cli.queue_capacity)
    }
}

/// CLI参数结构
#[derive(Parser, Debug)]
#[command(author, version, about = "游戏物品剪贴板翻译工具 - 监听剪贴板并用内置词典翻译物品文本", long_about = None)]
pub struct Cli {
    /// 词典数据目录 (dictionary.json / stats.json / words.json)
    #[arg(short, long, value_name = "DIR", default_value = data_config::DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// 单次翻译模式：翻译文件内容并输出到标准输出 ("-" 表示标准输入)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// 物品类别标记
    #[arg(long, default_value = item_format::ITEM_CLASS_MARKER)]
    pub marker: String,

    /// 稀有度标签
    #[arg(long, default_value = item_format::RARITY_LABEL)]
    pub rarity_label: String,

    /// 剪贴板轮询间隔（毫秒）
    #[arg(long, default_value_t = watcher_config::DEFAULT_POLL_INTERVAL_MS)]
    pub poll_interval_ms: u64,

    /// 待翻译队列容量
    #[arg(long, default_value_t = watcher_config::DEFAULT_QUEUE_CAPACITY)]
    pub queue_capacity: usize,

    /// 单次翻译模式下忽略物品类别标记
    #[arg(long)]
    pub force: bool,

    /// 详细输出模式
    #[arg(short, long)]
    pub verbose: bool,

    /// 静默模式 (仅输出错误)
    #[arg(short, long)]
    pub quiet: bool,

    /// 退出时显示翻译统计
    #[arg(long)]
    pub stats: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TranslatorConfig::default();
        assert_eq!(config.data_dir(), Path::new("./data"));
        assert_eq!(config.marker(), "アイテムクラス");
        assert_eq!(config.rarity_label(), "Rarity:");
        assert_eq!(config.poll_interval(), Duration::from_millis(300));
        assert_eq!(config.queue_capacity(), 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        assert!(TranslatorConfig::new().with_queue_capacity(0).validate().is_err());
        assert!(TranslatorConfig::new().with_poll_interval_ms(0).validate().is_err());
        assert!(TranslatorConfig::new().with_marker("").validate().is_err());
    }

    #[test]
    fn test_cli_to_config() {
        let cli = Cli::parse_from([
            "item-clip-translator",
            "--data-dir",
            "/tmp/poe",
            "--queue-capacity",
            "4",
            "--rarity-label",
            "Seltenheit:",
        ]);
        assert!(cli.input.is_none());

        let config = TranslatorConfig::from(&cli);
        assert_eq!(config.data_dir(), Path::new("/tmp/poe"));
        assert_eq!(config.queue_capacity(), 4);
        assert_eq!(config.rarity_label(), "Seltenheit:");
        assert_eq!(config.marker(), "アイテムクラス");
    }
}
