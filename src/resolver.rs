//! 文本解析模块
//!
//! 按优先级为单行文本寻找译文：
//! 1. 数值模板（表顺序，第一个整行匹配的模板生效）
//! 2. 精确词条
//! 3. 前后缀组合
//!
//! 全部未命中时原样返回，这不是错误。

use crate::dictionary::DictionaryStore;

/// 自由文本的命中方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Templated(String),
    Exact(String),
    Affix(String),
    Untranslated,
}

impl Resolution {
    /// 取出译文，未命中时返回原文
    pub fn into_text(self, original: &str) -> String {
        match self {
            Resolution::Templated(text) | Resolution::Exact(text) | Resolution::Affix(text) => text,
            Resolution::Untranslated => original.to_string(),
        }
    }
}

/// 自由文本解析器
#[derive(Debug, Clone, Copy)]
pub struct FreeformResolver<'a> {
    store: &'a DictionaryStore,
}

impl<'a> FreeformResolver<'a> {
    pub fn new(store: &'a DictionaryStore) -> Self {
        Self { store }
    }

    /// 依次尝试模板、精确词条、前后缀组合
    pub fn resolve(&self, line: &str) -> Resolution {
        if let Some(text) = self.match_template(line) {
            return Resolution::Templated(text);
        }
        if let Some(text) = self.store.lookup_phrase(line) {
            return Resolution::Exact(text.to_string());
        }
        if let Some(text) = self.combine_affixes(line) {
            return Resolution::Affix(text);
        }
        Resolution::Untranslated
    }

    /// 只查精确词条，用于键值行和标签行
    pub fn lookup_or_keep(&self, text: &str) -> String {
        self.store
            .lookup_phrase(text)
            .unwrap_or(text)
            .to_string()
    }

    fn match_template(&self, line: &str) -> Option<String> {
        self.store
            .templates()
            .iter()
            .find_map(|template| template.apply(line))
    }

    /// 前缀和后缀各自独立取表中第一个命中项，两者都存在时直接拼接译文。
    /// 前缀与后缀在原文中重叠（例如整行只是一个词缀）时不算组合命中。
    fn combine_affixes(&self, line: &str) -> Option<String> {
        let affixes = self.store.affixes();
        let prefix = affixes.iter().find(|af| line.starts_with(af.source.as_str()))?;
        let suffix = affixes.iter().find(|af| line.ends_with(af.source.as_str()))?;
        if prefix.source.len() + suffix.source.len() > line.len() {
            return None;
        }
        Some(format!("{}{}", prefix.target, suffix.target))
    }
}
