use crate::model::ScanResult;

pub const ALL_CLEAR: &str = "✅ 内容安全，无明显违规！";
pub const REWRITE_ADVICE: &str = "✅ 建议根据改写版优化发布，降低违规风险。";

/// Render a review as Markdown: score, level, then either the all-clear line or
/// the match list followed by the highlighted and rewritten text.
pub fn render_report(result: &ScanResult, highlighted: &str, rewritten: &str) -> String {
    let mut out = String::new();
    out.push_str("## 审核结果\n\n");
    out.push_str(&format!("内容安全得分：{}/100\n\n", result.risk_score));
    out.push_str(&format!("违规等级评估：**{}**\n\n", result.risk_level.label()));

    if result.matches.is_empty() {
        out.push_str(ALL_CLEAR);
        out.push('\n');
        return out;
    }

    out.push_str(&format!("⚠️ 共检测到 {} 个敏感点：\n\n", result.matches.len()));
    for m in &result.matches {
        let replacement = result.suggestions.get(&m.term).unwrap_or_default();
        out.push_str(&format!(
            "- 类型：**{}** ➡️ 敏感词：`{}` ➡️ 建议替换为：`{}`\n",
            m.category, m.term, replacement
        ));
    }

    out.push_str("\n### 违规词高亮\n\n");
    out.push_str(highlighted);
    out.push_str("\n\n### 智能改写文案\n\n");
    out.push_str(rewritten);
    out.push_str("\n\n");
    out.push_str(REWRITE_ADVICE);
    out.push('\n');
    out
}
