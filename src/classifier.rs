//! 行分类模块
//!
//! 按固定顺序判断一行物品文本属于哪种类型：键值行、标签行、分隔线或自由文本。

use crate::constants::item_format::{DIVIDER, KEY_VALUE_SEPARATOR, LABEL_SEPARATOR};

/// 行类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `key: value`，在第一个 `": "` 处拆分，后续分隔符保留在 value 中
    KeyValue { key: &'a str, value: &'a str },
    /// `label:`，冒号之后的内容被丢弃
    Label { label: &'a str },
    /// `--------`，原样输出
    Divider,
    /// 其他文本，交给自由文本解析
    Freeform,
}

/// 判断行类型
pub fn classify(line: &str) -> LineKind<'_> {
    if let Some((key, value)) = line.split_once(KEY_VALUE_SEPARATOR) {
        LineKind::KeyValue { key, value }
    } else if let Some((label, _)) = line.split_once(LABEL_SEPARATOR) {
        LineKind::Label { label }
    } else if line.contains(DIVIDER) {
        LineKind::Divider
    } else {
        LineKind::Freeform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_value_splits_at_first_separator() {
        assert_eq!(
            classify("Level: 5: Bonus"),
            LineKind::KeyValue {
                key: "Level",
                value: "5: Bonus"
            }
        );
        assert_eq!(
            classify("レアリティ: レア"),
            LineKind::KeyValue {
                key: "レアリティ",
                value: "レア"
            }
        );
    }

    #[test]
    fn test_label_discards_payload() {
        assert_eq!(classify("要求:"), LineKind::Label { label: "要求" });
        assert_eq!(classify("要求:レベル"), LineKind::Label { label: "要求" });
    }

    #[test]
    fn test_divider() {
        assert_eq!(classify("--------"), LineKind::Divider);
        assert_eq!(classify("x--------x"), LineKind::Divider);
        assert_eq!(classify("-------"), LineKind::Freeform);
    }

    #[test]
    fn test_separator_precedence() {
        // 含冒号的分隔线仍按键值/标签处理
        assert_eq!(
            classify("--------: x"),
            LineKind::KeyValue {
                key: "--------",
                value: "x"
            }
        );
        assert_eq!(classify("a:--------"), LineKind::Label { label: "a" });
    }

    #[test]
    fn test_freeform() {
        assert_eq!(classify("最大ライフ +45"), LineKind::Freeform);
        assert_eq!(classify(""), LineKind::Freeform);
    }
}
