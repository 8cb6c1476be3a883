//! 数值模板编译模块
//!
//! 将 `stats.json` 中的模板（如 `最大ライフ +{0}`）编译为整行锚定的正则匹配器，
//! 参数占位符形式：
//! - `{N}`：无符号整数，匹配一个或多个ASCII数字
//! - `{N:+d}`：有符号整数，必须带 `+` 或 `-` 号
//! - `{N:其他格式}`：按无符号整数处理
//!
//! 模板中的其余文本全部按字面量匹配。

// 第三方crate导入
use regex::Regex;

// 本地模块导入
use crate::constants::item_format::MAX_TEMPLATE_SLOTS;
use crate::error::Result;
use crate::translation_error;

/// 参数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// 显式正负号 + 数字
    Signed,
    /// 纯数字
    Unsigned,
}

impl SlotKind {
    fn pattern(self) -> &'static str {
        match self {
            SlotKind::Signed => "([+-][0-9]+)",
            SlotKind::Unsigned => "([0-9]+)",
        }
    }
}

/// 参数槽描述，按在源模板中出现的顺序排列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub ordinal: u8,
    pub kind: SlotKind,
}

/// 模板片段
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(Slot),
}

/// 编译后的模板
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    matcher: Regex,
    slots: Vec<Slot>,
    /// 目标模板片段，占位符按序号引用 `slots`
    target: Vec<Segment>,
}

impl CompiledTemplate {
    /// 编译一条模板
    ///
    /// 源模板与目标模板必须语法正确，目标模板引用的序号必须在源模板中出现过。
    pub fn compile(source_template: &str, target_template: &str) -> Result<Self> {
        let source = parse_segments(source_template)?;

        let mut slots: Vec<Slot> = Vec::new();
        let mut pattern = String::from("^");
        for segment in &source {
            match segment {
                Segment::Literal(text) => pattern.push_str(&regex::escape(text)),
                Segment::Placeholder(slot) => {
                    if slots.iter().any(|s| s.ordinal == slot.ordinal) {
                        return Err(translation_error!(
                            template,
                            source_template,
                            format!("参数序号 {} 重复", slot.ordinal)
                        ));
                    }
                    slots.push(*slot);
                    pattern.push_str(slot.kind.pattern());
                }
            }
        }
        pattern.push('$');

        if slots.len() > MAX_TEMPLATE_SLOTS {
            return Err(translation_error!(
                template,
                source_template,
                format!("参数数量 {} 超过上限 {}", slots.len(), MAX_TEMPLATE_SLOTS)
            ));
        }

        let target = parse_segments(target_template)?;
        for segment in &target {
            if let Segment::Placeholder(slot) = segment {
                if !slots.iter().any(|s| s.ordinal == slot.ordinal) {
                    return Err(translation_error!(
                        template,
                        target_template,
                        format!("参数序号 {} 未在源模板中出现", slot.ordinal)
                    ));
                }
            }
        }

        let matcher = Regex::new(&pattern)
            .map_err(|e| translation_error!(template, source_template, e))?;

        Ok(Self {
            matcher,
            slots,
            target,
        })
    }

    /// 参数槽列表
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// 尝试匹配整行，成功时返回代入参数后的目标文本
    pub fn apply(&self, line: &str) -> Option<String> {
        let captures = self.matcher.captures(line)?;

        let mut result = String::with_capacity(line.len());
        for segment in &self.target {
            match segment {
                Segment::Literal(text) => result.push_str(text),
                Segment::Placeholder(slot) => {
                    let index = self.slots.iter().position(|s| s.ordinal == slot.ordinal)?;
                    result.push_str(captures.get(index + 1)?.as_str());
                }
            }
        }
        Some(result)
    }
}

/// 从左到右扫描模板，拆分为字面量与占位符
fn parse_segments(template: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.chars();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                let mut body = String::new();
                let mut closed = false;
                for inner in chars.by_ref() {
                    match inner {
                        '}' => {
                            closed = true;
                            break;
                        }
                        '{' => {
                            return Err(translation_error!(template, template, "占位符中出现嵌套的 '{'"));
                        }
                        _ => body.push(inner),
                    }
                }
                if !closed {
                    return Err(translation_error!(template, template, "未闭合的 '{'"));
                }

                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Placeholder(parse_placeholder(template, &body)?));
            }
            '}' => {
                return Err(translation_error!(template, template, "多余的 '}'"));
            }
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

/// 解析占位符内部文本：`N` 或 `N:格式`
fn parse_placeholder(template: &str, body: &str) -> Result<Slot> {
    let (ordinal, flag) = match body.split_once(':') {
        Some((ordinal, flag)) => (ordinal, Some(flag)),
        None => (body, None),
    };

    let ordinal = match ordinal.as_bytes() {
        [digit] if digit.is_ascii_digit() => digit - b'0',
        _ => {
            return Err(translation_error!(
                template,
                template,
                format!("参数序号必须是一位数字: {{{}}}", body)
            ));
        }
    };

    // 只有 `+d` 表示带符号，其余格式一律按无符号数字匹配
    let kind = match flag {
        Some("+d") => SlotKind::Signed,
        _ => SlotKind::Unsigned,
    };

    Ok(Slot { ordinal, kind })
}
