/// 常量配置
///
/// 该文件定义了词典文件、物品文本格式和剪贴板监听相关的默认值，方便统一管理和维护

/// 词典数据文件配置
pub mod data_config {
    /// 默认数据目录
    pub const DEFAULT_DATA_DIR: &str = "./data";

    /// 精确词条表（物品类别、字段名等）
    pub const DICTIONARY_FILE: &str = "dictionary.json";

    /// 数值模板表（词缀数值行）
    pub const STATS_FILE: &str = "stats.json";

    /// 前后缀组合表（稀有物品名称）
    pub const AFFIX_FILE: &str = "words.json";
}

/// 物品文本格式配置
pub mod item_format {
    /// 物品类别标记，剪贴板文本包含它时才视为游戏物品
    pub const ITEM_CLASS_MARKER: &str = "アイテムクラス";

    /// 稀有度字段翻译后的标签
    pub const RARITY_LABEL: &str = "Rarity:";

    /// 分隔线
    pub const DIVIDER: &str = "--------";

    /// 键值行分隔符
    pub const KEY_VALUE_SEPARATOR: &str = ": ";

    /// 标签行分隔符
    pub const LABEL_SEPARATOR: char = ':';

    /// 单个模板允许的最大参数数量
    pub const MAX_TEMPLATE_SLOTS: usize = 9;
}

/// 剪贴板监听配置
pub mod watcher_config {
    /// 默认轮询间隔（毫秒）
    pub const DEFAULT_POLL_INTERVAL_MS: u64 = 300;

    /// 默认队列容量
    pub const DEFAULT_QUEUE_CAPACITY: usize = 10;

    /// 退出命令
    pub const EXIT_COMMAND: &str = "exit";
}

/// 判断剪贴板文本是否为游戏物品文本
pub fn is_item_text(text: &str, marker: &str) -> bool {
    !marker.is_empty() && text.contains(marker)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_text_detection() {
        let text = "アイテムクラス: 両手剣\nレアリティ: レア\n";
        assert!(is_item_text(text, item_format::ITEM_CLASS_MARKER));
        assert!(!is_item_text("Item Class: Two Hand Swords", item_format::ITEM_CLASS_MARKER));
        assert!(!is_item_text(text, ""));
    }

    #[test]
    fn test_divider_length() {
        assert_eq!(item_format::DIVIDER.len(), 8);
        assert!(item_format::DIVIDER.chars().all(|c| c == '-'));
    }
}
