/// Risk scanner: checks a submission against every term of a `TermIndex`.
///
/// Matching is plain case-sensitive substring containment. A term counts once per
/// category no matter how often it occurs. An empty term is a substring of every
/// text, so it always matches.
use crate::model::{Match, RiskLevel, ScanResult, SuggestionMap, TermIndex};
use crate::suggestion::{Chooser, SuggestionPolicy};

/// Score reported when nothing matched.
pub const SAFE_SCORE: i32 = 100;
/// Points deducted per match before the cap applies.
pub const PENALTY_PER_MATCH: i32 = 10;
/// Upper bound on the score once anything matched.
pub const MATCH_SCORE_CAP: i32 = 30;
/// Scores strictly below this are `High`, the rest `Medium`.
pub const HIGH_RISK_BELOW: i32 = 50;

pub fn assess_risk(
    text: &str,
    index: &TermIndex,
    policy: &SuggestionPolicy,
    chooser: &dyn Chooser,
) -> ScanResult {
    let mut matches = Vec::new();
    let mut suggestions = SuggestionMap::new();

    for (category, terms) in index.iter() {
        for term in terms {
            if !text.contains(term.as_str()) {
                continue;
            }
            matches.push(Match {
                category: category.to_string(),
                term: term.clone(),
            });
            suggestions.insert(term.as_str(), policy.suggest_for(category, chooser));
        }
    }

    let (risk_score, risk_level) = score(matches.len());
    ScanResult {
        matches,
        risk_level,
        risk_score,
        suggestions,
    }
}

/// Maps a match count to `(score, level)`.
///
/// With any match the cap of 30 always wins, so the level is always `High`; past
/// ten matches the score goes negative. Both are kept as-is.
pub fn score(match_count: usize) -> (i32, RiskLevel) {
    if match_count == 0 {
        return (SAFE_SCORE, RiskLevel::Low);
    }
    let n = i32::try_from(match_count).unwrap_or(i32::MAX);
    let score = SAFE_SCORE
        .saturating_sub(n.saturating_mul(PENALTY_PER_MATCH))
        .min(MATCH_SCORE_CAP);
    let level = if score < HIGH_RISK_BELOW {
        RiskLevel::High
    } else {
        RiskLevel::Medium
    };
    (score, level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestion::{FirstChooser, ThreadChooser};

    fn index(pairs: &[(&str, &str)]) -> TermIndex {
        pairs.iter().copied().collect()
    }

    #[test]
    fn election_scenario() {
        let index = index(&[("政治相关", "选举")]);
        let result = assess_risk(
            "今天聊聊选举话题",
            &index,
            &SuggestionPolicy::default(),
            &ThreadChooser,
        );

        assert_eq!(
            result.matches,
            [Match {
                category: "政治相关".to_string(),
                term: "选举".to_string(),
            }]
        );
        assert_eq!(result.risk_score, 30);
        assert_eq!(result.risk_level, RiskLevel::High);
        let suggestion = result.suggestions.get("选举").unwrap();
        assert!(["社会话题", "资讯分享"].contains(&suggestion));
    }

    #[test]
    fn empty_index_is_safe() {
        let result = assess_risk(
            "任意内容",
            &TermIndex::empty(),
            &SuggestionPolicy::default(),
            &ThreadChooser,
        );
        assert!(result.matches.is_empty());
        assert!(result.suggestions.is_empty());
        assert_eq!(result.risk_score, 100);
        assert_eq!(result.risk_level, RiskLevel::Low);
    }

    #[test]
    fn empty_text_is_safe() {
        let index = index(&[("政治相关", "选举")]);
        let result = assess_risk("", &index, &SuggestionPolicy::default(), &ThreadChooser);
        assert!(result.matches.is_empty());
        assert_eq!(result.risk_score, 100);
    }

    #[test]
    fn presence_not_count() {
        let index = index(&[("夸大宣传", "最")]);
        let result = assess_risk(
            "最好最快最便宜",
            &index,
            &SuggestionPolicy::default(),
            &FirstChooser,
        );
        assert_eq!(result.matches.len(), 1);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let index = index(&[("其他高危词", "VX")]);
        let policy = SuggestionPolicy::default();
        assert!(assess_risk("加我vx", &index, &policy, &FirstChooser)
            .matches
            .is_empty());
        assert_eq!(
            assess_risk("加我VX", &index, &policy, &FirstChooser)
                .matches
                .len(),
            1
        );
    }

    #[test]
    fn same_term_under_two_categories() {
        let index = index(&[("诱导转移联系", "加微信"), ("其他高危词", "加微信")]);
        let result = assess_risk(
            "私信加微信",
            &index,
            &SuggestionPolicy::default(),
            &FirstChooser,
        );

        let categories: Vec<&str> = result.matches.iter().map(|m| m.category.as_str()).collect();
        assert_eq!(categories, ["诱导转移联系", "其他高危词"]);
        assert_eq!(result.suggestions.len(), 1);
        assert_eq!(result.suggestions.get("加微信"), Some("信息提示"));
        assert_eq!(result.risk_score, 30);
    }

    #[test]
    fn duplicate_terms_in_one_category_match_twice() {
        let index = index(&[("夸大宣传", "第一"), ("夸大宣传", "第一")]);
        let result = assess_risk(
            "全网第一",
            &index,
            &SuggestionPolicy::default(),
            &FirstChooser,
        );
        assert_eq!(result.matches.len(), 2);
        assert_eq!(result.suggestions.len(), 1);
    }

    #[test]
    fn matches_follow_index_order() {
        let index = index(&[
            ("赌博博彩相关", "下注"),
            ("金融投资诱导", "稳赚"),
            ("赌博博彩相关", "彩票"),
        ]);
        let result = assess_risk(
            "稳赚不赔，彩票下注",
            &index,
            &SuggestionPolicy::default(),
            &FirstChooser,
        );
        let terms: Vec<&str> = result.matches.iter().map(|m| m.term.as_str()).collect();
        assert_eq!(terms, ["下注", "彩票", "稳赚"]);
        let suggested: Vec<&str> = result.suggestions.iter().map(|(t, _)| t).collect();
        assert_eq!(suggested, ["下注", "彩票", "稳赚"]);
    }

    #[test]
    fn empty_term_matches_any_text() {
        let index = index(&[("其他高危词", "")]);
        let result = assess_risk("abc", &index, &SuggestionPolicy::default(), &FirstChooser);
        assert_eq!(
            result.matches,
            [Match {
                category: "其他高危词".to_string(),
                term: String::new(),
            }]
        );
        assert_eq!(result.risk_score, 30);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(result.suggestions.get(""), Some("信息提示"));
    }

    #[test]
    fn score_is_capped_and_never_medium() {
        assert_eq!(score(0), (100, RiskLevel::Low));
        assert_eq!(score(1), (30, RiskLevel::High));
        assert_eq!(score(7), (30, RiskLevel::High));
        assert_eq!(score(8), (20, RiskLevel::High));
        assert_eq!(score(10), (0, RiskLevel::High));
        assert_eq!(score(12), (-20, RiskLevel::High));
        for n in 1..200 {
            assert_eq!(score(n).1, RiskLevel::High);
        }
    }
}
