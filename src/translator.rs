//! 物品文本翻译模块
//!
//! 逐行分类并翻译整段剪贴板文本，稀有度行之后紧跟的一条分隔线会被省略。

use tracing::{debug, trace};

use crate::classifier::{classify, LineKind};
use crate::constants::item_format::{KEY_VALUE_SEPARATOR, LABEL_SEPARATOR, RARITY_LABEL};
use crate::dictionary::DictionaryStore;
use crate::resolver::{FreeformResolver, Resolution};
use crate::stats::{LineOutcome, TranslationStats};

/// 物品文本翻译器
///
/// 纯同步、无副作用：同样的输入总是得到同样的输出，
/// 可以通过 `Arc<Translator>` 在多个任务间共享。
#[derive(Debug, Clone)]
pub struct Translator {
    store: DictionaryStore,
    rarity_label: String,
}

impl Translator {
    pub fn new(store: DictionaryStore) -> Self {
        Self {
            store,
            rarity_label: RARITY_LABEL.to_string(),
        }
    }

    /// 设置稀有度标签（译文包含它时省略紧随其后的分隔线）
    pub fn with_rarity_label(mut self, label: &str) -> Self {
        self.rarity_label = label.to_string();
        self
    }

    pub fn store(&self) -> &DictionaryStore {
        &self.store
    }

    pub fn rarity_label(&self) -> &str {
        &self.rarity_label
    }

    /// 翻译整段剪贴板文本
    pub fn translate(&self, text: &str) -> String {
        let mut stats = TranslationStats::default();
        self.translate_with_stats(text, &mut stats)
    }

    /// 翻译整段文本并累计统计
    ///
    /// 每行输出后都追加 `\n`，因此非空输出总以换行结尾。
    pub fn translate_with_stats(&self, text: &str, stats: &mut TranslationStats) -> String {
        let normalized = normalize_line_endings(text);
        let mut output = String::with_capacity(normalized.len());
        let mut suppress_next_divider = false;

        stats.payloads += 1;
        for line in normalized.lines() {
            if suppress_next_divider && classify(line) == LineKind::Divider {
                suppress_next_divider = false;
                stats.record(LineOutcome::SuppressedDivider);
                continue;
            }

            let (translated, outcome) = self.translate_line(line);
            if translated.contains(self.rarity_label.as_str()) {
                suppress_next_divider = true;
            }

            trace!(?outcome, "{} => {}", line, translated);
            stats.record(outcome);
            output.push_str(&translated);
            output.push('\n');
        }

        debug!(
            "翻译完成: {} 行, 未翻译 {} 行",
            stats.lines, stats.untranslated
        );
        output
    }

    /// 翻译单行
    pub fn translate_line(&self, line: &str) -> (String, LineOutcome) {
        let resolver = FreeformResolver::new(&self.store);

        match classify(line) {
            LineKind::KeyValue { key, value } => {
                let text = format!(
                    "{}{}{}",
                    resolver.lookup_or_keep(key),
                    KEY_VALUE_SEPARATOR,
                    resolver.lookup_or_keep(value)
                );
                (text, LineOutcome::KeyValue)
            }
            LineKind::Label { label } => {
                let text = format!("{}{}", resolver.lookup_or_keep(label), LABEL_SEPARATOR);
                (text, LineOutcome::Label)
            }
            LineKind::Divider => (line.to_string(), LineOutcome::Divider),
            LineKind::Freeform => {
                let resolution = resolver.resolve(line);
                let outcome = match resolution {
                    Resolution::Templated(_) => LineOutcome::Templated,
                    Resolution::Exact(_) => LineOutcome::Exact,
                    Resolution::Affix(_) => LineOutcome::Affix,
                    Resolution::Untranslated => LineOutcome::Untranslated,
                };
                (resolution.into_text(line), outcome)
            }
        }
    }
}

/// 统一换行符为 `\n`
fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{AffixEntry, DictionaryEntry, TemplatedEntry};

    fn translator() -> Translator {
        let store = DictionaryStore::from_tables(
            vec![
                DictionaryEntry::new("アイテムクラス", "Item Class"),
                DictionaryEntry::new("両手剣", "Two Hand Swords"),
                DictionaryEntry::new("レアリティ", "Rarity"),
                DictionaryEntry::new("レア", "Rare"),
                DictionaryEntry::new("要求", "Requirements"),
                DictionaryEntry::new("レベル", "Level"),
            ],
            vec![TemplatedEntry::new("最大ライフ +{0}", "+{0} to maximum Life")],
            vec![
                AffixEntry::new("恐怖の", "Dread "),
                AffixEntry::new("噛みつき", "Bite"),
            ],
        )
        .unwrap();
        Translator::new(store)
    }

    #[test]
    fn test_translate_line_kinds() {
        let t = translator();
        assert_eq!(
            t.translate_line("アイテムクラス: 両手剣"),
            ("Item Class: Two Hand Swords".to_string(), LineOutcome::KeyValue)
        );
        assert_eq!(
            t.translate_line("要求:"),
            ("Requirements:".to_string(), LineOutcome::Label)
        );
        assert_eq!(
            t.translate_line("--------"),
            ("--------".to_string(), LineOutcome::Divider)
        );
        assert_eq!(
            t.translate_line("最大ライフ +45"),
            ("+45 to maximum Life".to_string(), LineOutcome::Templated)
        );
        assert_eq!(
            t.translate_line("恐怖の噛みつき"),
            ("Dread Bite".to_string(), LineOutcome::Affix)
        );
        assert_eq!(
            t.translate_line("未知の文"),
            ("未知の文".to_string(), LineOutcome::Untranslated)
        );
    }

    #[test]
    fn test_key_value_keeps_later_separators() {
        let t = translator();
        assert_eq!(t.translate_line("レベル: 5: Bonus").0, "Level: 5: Bonus");
    }

    #[test]
    fn test_divider_after_rarity_is_suppressed() {
        let t = translator();
        let input = "レアリティ: レア\n--------\n恐怖の噛みつき\n--------\n両手剣";
        assert_eq!(
            t.translate(input),
            "Rarity: Rare\nDread Bite\n--------\nTwo Hand Swords\n"
        );
    }

    #[test]
    fn test_suppression_skips_only_one_divider() {
        let t = translator();
        let input = "レアリティ: レア\n恐怖の噛みつき\n--------\n--------\n";
        assert_eq!(t.translate(input), "Rarity: Rare\nDread Bite\n--------\n");
    }

    #[test]
    fn test_line_endings_and_terminator() {
        let t = translator();
        assert_eq!(t.translate("両手剣\r\nレア\rx"), "Two Hand Swords\nRare\nx\n");
        assert_eq!(t.translate("両手剣\n"), "Two Hand Swords\n");
        assert_eq!(t.translate("両手剣\n\n"), "Two Hand Swords\n\n");
        assert_eq!(t.translate(""), "");
    }

    #[test]
    fn test_deterministic() {
        let t = translator();
        let input = "レアリティ: レア\n--------\n最大ライフ +10\n";
        assert_eq!(t.translate(input), t.translate(input));
    }

    #[test]
    fn test_custom_rarity_label() {
        let t = translator().with_rarity_label("Two Hand");
        assert_eq!(t.rarity_label(), "Two Hand");
        assert_eq!(t.translate("両手剣\n--------\nx"), "Two Hand Swords\nx\n");
    }

    #[test]
    fn test_stats_are_recorded() {
        let t = translator();
        let mut stats = TranslationStats::default();
        t.translate_with_stats("レアリティ: レア\n--------\n最大ライフ +1\n未知\n", &mut stats);

        assert_eq!(stats.payloads, 1);
        assert_eq!(stats.lines, 4);
        assert_eq!(stats.key_value, 1);
        assert_eq!(stats.suppressed_dividers, 1);
        assert_eq!(stats.templated, 1);
        assert_eq!(stats.untranslated, 1);
    }
}
