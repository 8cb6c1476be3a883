//! 词典存储模块
//!
//! 此模块负责：
//! - 定义三张词典表的记录结构（精确词条、数值模板、前后缀）
//! - 从数据目录加载 JSON 词典文件
//! - 在启动时一次性编译全部模板，之后只读共享
//!
//! 表内顺序即匹配优先级：第一个命中的记录生效。

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::constants::data_config::{AFFIX_FILE, DICTIONARY_FILE, STATS_FILE};
use crate::error::{Result, TranslationError};
use crate::template::CompiledTemplate;
use crate::translation_error;

/// 精确词条：整行/整词翻译（物品类别、字段名等）
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DictionaryEntry {
    #[serde(rename = "Japanese")]
    pub source: String,
    #[serde(rename = "English")]
    pub target: String,
}

/// 数值模板记录
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TemplatedEntry {
    #[serde(rename = "Japanese")]
    pub source_template: String,
    #[serde(rename = "English")]
    pub target_template: String,
}

/// 前后缀记录，既可作为前缀也可作为后缀匹配
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AffixEntry {
    #[serde(rename = "Japanese")]
    pub source: String,
    #[serde(rename = "English")]
    pub target: String,
}

impl DictionaryEntry {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}

impl TemplatedEntry {
    pub fn new(source_template: &str, target_template: &str) -> Self {
        Self {
            source_template: source_template.to_string(),
            target_template: target_template.to_string(),
        }
    }
}

impl AffixEntry {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}

/// 只读词典存储
///
/// 构造完成后不再修改，可以通过 `Arc` 在多个任务间无锁共享。
#[derive(Debug, Clone, Default)]
pub struct DictionaryStore {
    phrases: Vec<DictionaryEntry>,
    templates: Vec<CompiledTemplate>,
    affixes: Vec<AffixEntry>,
}

impl DictionaryStore {
    /// 由三张表构造词典，模板在此处全部编译
    pub fn from_tables(
        phrases: Vec<DictionaryEntry>,
        templates: Vec<TemplatedEntry>,
        affixes: Vec<AffixEntry>,
    ) -> Result<Self> {
        ensure_affix_sources(&affixes)?;

        let compiled = templates
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                CompiledTemplate::compile(&entry.source_template, &entry.target_template).map_err(
                    |e| match e {
                        TranslationError::TemplateSyntax { template, reason } => {
                            translation_error!(template, template, format!("第{}条: {}", index + 1, reason))
                        }
                        other => other,
                    },
                )
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("已编译 {} 条数值模板", compiled.len());

        Ok(Self {
            phrases,
            templates: compiled,
            affixes,
        })
    }

    /// 从数据目录加载 `dictionary.json`、`stats.json`、`words.json`
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(translation_error!(
                dictionary,
                dir.display(),
                "数据目录不存在或不是目录"
            ));
        }

        let phrases: Vec<DictionaryEntry> = read_table(&dir.join(DICTIONARY_FILE))?;
        let templates: Vec<TemplatedEntry> = read_table(&dir.join(STATS_FILE))?;
        let affixes: Vec<AffixEntry> = read_table(&dir.join(AFFIX_FILE))?;

        let store = Self::from_tables(phrases, templates, affixes)?;
        info!(
            "📚 词典加载完成: {} 条词条, {} 条模板, {} 条词缀",
            store.phrases.len(),
            store.templates.len(),
            store.affixes.len()
        );
        Ok(store)
    }

    /// 精确查找整段文本，表内第一个命中的记录生效
    pub fn lookup_phrase(&self, text: &str) -> Option<&str> {
        self.phrases
            .iter()
            .find(|entry| entry.source == text)
            .map(|entry| entry.target.as_str())
    }

    /// 编译后的模板，按表顺序
    pub fn templates(&self) -> &[CompiledTemplate] {
        &self.templates
    }

    /// 前后缀表，按表顺序
    pub fn affixes(&self) -> &[AffixEntry] {
        &self.affixes
    }

    pub fn phrase_count(&self) -> usize {
        self.phrases.len()
    }

    pub fn template_count(&self) -> usize {
        self.templates.len()
    }

    pub fn affix_count(&self) -> usize {
        self.affixes.len()
    }
}

/// 读取一张 JSON 词典表
fn read_table<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>> {
    let content = fs::read_to_string(path)
        .map_err(|e| translation_error!(dictionary, path.display(), e))?;

    let table: Vec<T> = serde_json::from_str(&content)
        .map_err(|e| translation_error!(dictionary, path.display(), e))?;

    debug!("读取 {}: {} 条记录", path.display(), table.len());
    Ok(table)
}

/// 源文本为空的词缀既是任意行的前缀也是后缀，视为损坏数据
fn ensure_affix_sources(affixes: &[AffixEntry]) -> Result<()> {
    if let Some(index) = affixes.iter().position(|af| af.source.is_empty()) {
        return Err(translation_error!(
            dictionary,
            AFFIX_FILE,
            format!("第{}条记录的源文本为空", index + 1)
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_data_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join("item-clip-translator-tests")
            .join(format!("{}_{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_tables(dir: &Path, dictionary: &str, stats: &str, words: &str) {
        fs::write(dir.join(DICTIONARY_FILE), dictionary).unwrap();
        fs::write(dir.join(STATS_FILE), stats).unwrap();
        fs::write(dir.join(AFFIX_FILE), words).unwrap();
    }

    #[test]
    fn test_lookup_first_match_wins() {
        let store = DictionaryStore::from_tables(
            vec![
                DictionaryEntry::new("両手剣", "Two Hand Swords"),
                DictionaryEntry::new("両手剣", "Two-Handed Swords"),
            ],
            vec![],
            vec![],
        )
        .unwrap();

        assert_eq!(store.lookup_phrase("両手剣"), Some("Two Hand Swords"));
        assert_eq!(store.lookup_phrase("片手剣"), None);
    }

    #[test]
    fn test_malformed_template_fails_construction() {
        let result = DictionaryStore::from_tables(
            vec![],
            vec![
                TemplatedEntry::new("{0} to Life", "+{0} Life"),
                TemplatedEntry::new("{0 to Mana", "+{0} Mana"),
            ],
            vec![],
        );

        match result {
            Err(TranslationError::TemplateSyntax { reason, .. }) => {
                assert!(reason.starts_with("第2条"));
            }
            other => panic!("unexpected result: {:?}", other.map(|s| s.template_count())),
        }
    }

    #[test]
    fn test_empty_affix_source_rejected() {
        let result = DictionaryStore::from_tables(
            vec![],
            vec![],
            vec![AffixEntry::new("恐怖の", "Dread "), AffixEntry::new("", "x")],
        );
        match result {
            Err(TranslationError::DictionaryLoad { path, source }) => {
                assert_eq!(path, AFFIX_FILE);
                assert!(source.starts_with("第2条"));
            }
            _ => panic!("expected DictionaryLoad error"),
        }
    }

    #[test]
    fn test_empty_phrase_source_only_matches_empty_text() {
        let store = DictionaryStore::from_tables(
            vec![DictionaryEntry::new("", "(blank)")],
            vec![TemplatedEntry::new("", "")],
            vec![],
        )
        .unwrap();

        assert_eq!(store.lookup_phrase(""), Some("(blank)"));
        assert_eq!(store.lookup_phrase("両手剣"), None);
        assert!(store.templates()[0].apply("両手剣").is_none());
    }

    #[test]
    fn test_load_from_dir() {
        let dir = temp_data_dir("load");
        write_tables(
            &dir,
            r#"[{"English": "Rarity", "Japanese": "レアリティ"}]"#,
            r#"[{"English": "+{0} to maximum Life", "Japanese": "最大ライフ +{0}"}]"#,
            r#"[{"English": "Dread ", "Japanese": "恐怖の"}, {"English": "Bite", "Japanese": "噛みつき"}]"#,
        );

        let store = DictionaryStore::load_from_dir(&dir).unwrap();
        assert_eq!(store.phrase_count(), 1);
        assert_eq!(store.template_count(), 1);
        assert_eq!(store.affix_count(), 2);
        assert_eq!(store.lookup_phrase("レアリティ"), Some("Rarity"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_rejects_bad_records() {
        let dir = temp_data_dir("bad_records");
        write_tables(&dir, r#"[{"English": "Rarity"}]"#, "[]", "[]");

        let result = DictionaryStore::load_from_dir(&dir);
        match result {
            Err(TranslationError::DictionaryLoad { path, .. }) => {
                assert!(path.ends_with(DICTIONARY_FILE));
            }
            _ => panic!("expected DictionaryLoad error"),
        }

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        let dir = temp_data_dir("missing");
        fs::write(dir.join(DICTIONARY_FILE), "[]").unwrap();

        assert!(DictionaryStore::load_from_dir(&dir).is_err());
        assert!(DictionaryStore::load_from_dir(&dir.join("nope")).is_err());

        fs::remove_dir_all(&dir).unwrap();
    }
}
