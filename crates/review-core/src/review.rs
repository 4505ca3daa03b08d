/// One-call review of a submission: scan, highlight, rewrite and report.
///
/// `Reviewer` owns the process-wide term index (loaded once, never reloaded) and
/// the suggestion policy. It is cheap to share behind an `Arc`.
use std::sync::Arc;

use tracing::debug;

use crate::error::CoreError;
use crate::markup::{self, SubstitutionMode};
use crate::model::{ScanResult, TermIndex};
use crate::report;
use crate::scanner;
use crate::suggestion::{Chooser, SuggestionPolicy, ThreadChooser};

#[derive(Debug, Clone)]
pub struct Review {
    pub result: ScanResult,
    /// Original text with matched terms wrapped in emphasis markup.
    pub highlighted: String,
    /// Original text with matched terms replaced by their suggestions.
    pub rewritten: String,
    /// Markdown rendering of the whole review.
    pub report: String,
}

pub struct Reviewer {
    index: Arc<TermIndex>,
    policy: SuggestionPolicy,
    mode: SubstitutionMode,
    chooser: Arc<dyn Chooser>,
    load_error: Option<String>,
}

impl Reviewer {
    pub fn new(index: Arc<TermIndex>) -> Self {
        Self {
            index,
            policy: SuggestionPolicy::default(),
            mode: SubstitutionMode::default(),
            chooser: Arc::new(ThreadChooser),
            load_error: None,
        }
    }

    pub fn with_policy(mut self, policy: SuggestionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_mode(mut self, mode: SubstitutionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_chooser(mut self, chooser: Arc<dyn Chooser>) -> Self {
        self.chooser = chooser;
        self
    }

    /// Records why the index is empty, for display to the operator.
    pub fn with_load_error(mut self, load_error: Option<String>) -> Self {
        self.load_error = load_error;
        self
    }

    pub fn index(&self) -> &TermIndex {
        &self.index
    }

    pub fn policy(&self) -> &SuggestionPolicy {
        &self.policy
    }

    pub fn mode(&self) -> SubstitutionMode {
        self.mode
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Draw one replacement phrase for `category` with this reviewer's chooser.
    pub fn suggest(&self, category: &str) -> &str {
        self.policy.suggest_for(category, self.chooser.as_ref())
    }

    /// Review `text`. Empty or whitespace-only input is rejected before scanning.
    pub fn review(&self, text: &str) -> Result<Review, CoreError> {
        if text.trim().is_empty() {
            return Err(CoreError::EmptyInput);
        }

        let result = scanner::assess_risk(text, &self.index, &self.policy, self.chooser.as_ref());
        let highlighted = markup::highlight(text, &result.matches, self.mode);
        let rewritten = markup::rewrite(text, &result.suggestions, self.mode);
        let report = report::render_report(&result, &highlighted, &rewritten);

        debug!(
            chars = text.chars().count(),
            matches = result.matches.len(),
            score = result.risk_score,
            level = result.risk_level.label(),
            "review complete"
        );

        Ok(Review {
            result,
            highlighted,
            rewritten,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RiskLevel;
    use crate::suggestion::FirstChooser;

    fn reviewer(pairs: &[(&str, &str)]) -> Reviewer {
        let index: TermIndex = pairs.iter().copied().collect();
        Reviewer::new(Arc::new(index)).with_chooser(Arc::new(FirstChooser))
    }

    #[test]
    fn rejects_blank_input() {
        let reviewer = reviewer(&[("政治相关", "选举")]);
        for text in ["", "   ", "\n\t", "\u{3000}"] {
            assert!(matches!(reviewer.review(text), Err(CoreError::EmptyInput)));
        }
        assert_eq!(CoreError::EmptyInput.to_string(), "请先输入内容。");
    }

    #[test]
    fn review_combines_all_outputs() {
        let reviewer = reviewer(&[("政治相关", "选举")]);
        let review = reviewer.review("今天聊聊选举话题").unwrap();

        assert_eq!(review.result.risk_score, 30);
        assert_eq!(review.result.risk_level, RiskLevel::High);
        assert_eq!(review.rewritten, "今天聊聊社会话题话题");
        assert!(review.highlighted.contains(&format!(
            "{}选举{}",
            markup::MARK_OPEN,
            markup::MARK_CLOSE
        )));
        assert!(review.report.contains("建议替换为：`社会话题`"));
    }

    #[test]
    fn clean_text_passes_through() {
        let reviewer = reviewer(&[("政治相关", "选举")]);
        let review = reviewer.review("<b>今天天气不错</b>").unwrap();
        assert_eq!(review.result.risk_level, RiskLevel::Low);
        assert_eq!(review.highlighted, "<b>今天天气不错</b>");
        assert_eq!(review.rewritten, "<b>今天天气不错</b>");
        assert!(review.report.contains(report::ALL_CLEAR));
    }

    #[test]
    fn empty_index_keeps_load_error() {
        let reviewer = Reviewer::new(Arc::new(TermIndex::empty()))
            .with_load_error(Some("敏感词库加载失败：missing".to_string()));
        assert_eq!(reviewer.load_error(), Some("敏感词库加载失败：missing"));
        assert_eq!(reviewer.review("选举").unwrap().result.risk_score, 100);
    }

    #[test]
    fn mode_is_applied() {
        let reviewer = reviewer(&[("金融投资诱导", "稳赚"), ("金融投资诱导", "理财")])
            .with_mode(SubstitutionMode::SinglePass);
        assert_eq!(reviewer.mode(), SubstitutionMode::SinglePass);
        let review = reviewer.review("稳赚理财").unwrap();
        assert_eq!(review.rewritten, "理财知识理财知识");
    }

    #[test]
    fn suggest_uses_policy() {
        let reviewer = reviewer(&[]);
        assert_eq!(reviewer.suggest("色情低俗"), "趣味分享");
        assert_eq!(reviewer.suggest("未知"), crate::suggestion::DEFAULT_REPLACEMENT);
    }
}
