use std::time::Duration;

/// 单行翻译结果类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Templated,
    Exact,
    Affix,
    KeyValue,
    Label,
    Divider,
    SuppressedDivider,
    Untranslated,
}

/// 翻译统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TranslationStats {
    pub payloads: usize,
    pub lines: usize,
    pub templated: usize,
    pub exact: usize,
    pub affix: usize,
    pub key_value: usize,
    pub labels: usize,
    pub dividers: usize,
    pub suppressed_dividers: usize,
    pub untranslated: usize,
}

impl TranslationStats {
    /// 记录一行的处理结果
    pub fn record(&mut self, outcome: LineOutcome) {
        self.lines += 1;
        match outcome {
            LineOutcome::Templated => self.templated += 1,
            LineOutcome::Exact => self.exact += 1,
            LineOutcome::Affix => self.affix += 1,
            LineOutcome::KeyValue => self.key_value += 1,
            LineOutcome::Label => self.labels += 1,
            LineOutcome::Divider => self.dividers += 1,
            LineOutcome::SuppressedDivider => self.suppressed_dividers += 1,
            LineOutcome::Untranslated => self.untranslated += 1,
        }
    }

    /// 自由文本命中率
    pub fn freeform_hit_rate(&self) -> Option<f64> {
        let hits = self.templated + self.exact + self.affix;
        let total = hits + self.untranslated;
        if total == 0 {
            None
        } else {
            Some(hits as f64 / total as f64)
        }
    }
}

/// 打印翻译统计
pub fn print_stats_report(stats: &TranslationStats, total_duration: Duration) {
    println!("\n📊 翻译统计报告:");
    println!("═══════════════════════════════════════");

    println!("📋 处理量:");
    println!("   物品文本: {} 个", stats.payloads);
    println!("   文本行: {} 行", stats.lines);
    println!("   运行时长: {}", format_duration(total_duration));

    println!("\n🔤 行类型:");
    println!("   键值行: {} 行", stats.key_value);
    println!("   标签行: {} 行", stats.labels);
    println!("   分隔线: {} 行 (省略 {} 行)", stats.dividers, stats.suppressed_dividers);

    println!("\n🎯 自由文本:");
    println!("   模板命中: {} 行", stats.templated);
    println!("   词条命中: {} 行", stats.exact);
    println!("   词缀组合: {} 行", stats.affix);
    println!("   未翻译: {} 行", stats.untranslated);

    if let Some(rate) = stats.freeform_hit_rate() {
        println!("   命中率: {:.1}%", rate * 100.0);
    }
}

/// 格式化持续时间
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else {
        format!("{:.3}s", duration.as_secs_f64())
    }
}
