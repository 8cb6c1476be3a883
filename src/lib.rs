//! Item Clip Translator - 游戏物品剪贴板翻译库
//!
//! 核心是纯同步的翻译引擎：行分类、数值模板匹配、前后缀组合与分隔线省略规则。
//! 外围提供词典加载、配置、统计以及剪贴板监听/翻译任务。

pub mod classifier;
pub mod clipboard;
pub mod config;
pub mod constants;
pub mod dictionary;
pub mod error;
pub mod resolver;
pub mod stats;
pub mod template;
pub mod translator;
pub mod utils;

pub use dictionary::{AffixEntry, DictionaryEntry, DictionaryStore, TemplatedEntry};
pub use error::{Result, TranslationError};
pub use translator::Translator;
