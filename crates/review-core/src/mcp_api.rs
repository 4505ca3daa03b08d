use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::RiskLevel;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ReviewContentParams {
    /// The copy to review. Must contain at least one non-whitespace character.
    pub text: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SuggestReplacementParams {
    /// Category label such as "政治相关" or "夸大宣传".
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MatchEntry {
    pub category: String,
    pub term: String,
    /// Suggested replacement for `term`. Shared by all entries with the same term.
    pub replacement: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReviewContentResponse {
    pub risk_score: i32,
    pub risk_level: RiskLevel,
    /// Display label for `risk_level`, e.g. "高风险".
    pub risk_label: String,
    pub matches: Vec<MatchEntry>,
    /// Input text with matched terms wrapped in `<mark>` tags.
    pub highlighted: String,
    /// Input text with matched terms replaced.
    pub rewritten: String,
    /// Markdown summary of the review.
    pub report: String,
    /// Present when the term table failed to load and the index is empty.
    pub term_table_error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryInfo {
    pub name: String,
    pub term_count: usize,
    /// Replacement phrases the policy draws from for this category.
    pub candidates: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryListResponse {
    pub categories: Vec<CategoryInfo>,
    pub total_terms: usize,
    /// Replacement used for categories without their own candidates.
    pub fallback_replacement: String,
    pub term_table_error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SuggestReplacementResponse {
    pub category: String,
    pub replacement: String,
    /// False when the category has no candidates and the fallback was used.
    pub known_category: bool,
}
