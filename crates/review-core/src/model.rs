use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A category of sensitive terms, e.g. "政治相关" with its flagged words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TermCategory {
    /// Category label as it appears in the term table.
    pub name: String,
    /// Terms in table row order. Duplicates are kept.
    pub terms: Vec<String>,
}

/// Mapping from category name to its ordered terms.
///
/// Categories keep first-seen order so scans are reproducible for a given table.
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TermIndex {
    categories: Vec<TermCategory>,
}

impl TermIndex {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Appends `term` to `category`, creating the category on first sight.
    pub(crate) fn push(&mut self, category: impl Into<String>, term: impl Into<String>) {
        let category = category.into();
        let term = term.into();
        match self.categories.iter_mut().find(|c| c.name == category) {
            Some(existing) => existing.terms.push(term),
            None => self.categories.push(TermCategory {
                name: category,
                terms: vec![term],
            }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|c| (c.name.as_str(), c.terms.as_slice()))
    }

    pub fn categories(&self) -> &[TermCategory] {
        &self.categories
    }

    pub fn terms(&self, category: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.terms.as_slice())
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of terms across all categories, duplicates included.
    pub fn term_count(&self) -> usize {
        self.categories.iter().map(|c| c.terms.len()).sum()
    }
}

impl<C, T> FromIterator<(C, T)> for TermIndex
where
    C: Into<String>,
    T: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (C, T)>>(iter: I) -> Self {
        let mut index = TermIndex::empty();
        for (category, term) in iter {
            index.push(category, term);
        }
        index
    }
}

/// A (category, term) pair found present in the submitted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Match {
    pub category: String,
    pub term: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Suggestion {
    pub term: String,
    pub replacement: String,
}

/// Insertion-ordered map from matched term to its chosen replacement.
///
/// Re-inserting a term overwrites the replacement in place; the term keeps the
/// position of its first insertion. Deserializing goes through `insert` too, so a
/// list with a repeated term yields one entry holding the last replacement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct SuggestionMap {
    entries: Vec<Suggestion>,
}

impl SuggestionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, term: impl Into<String>, replacement: impl Into<String>) {
        let term = term.into();
        let replacement = replacement.into();
        match self.entries.iter_mut().find(|s| s.term == term) {
            Some(existing) => existing.replacement = replacement,
            None => self.entries.push(Suggestion { term, replacement }),
        }
    }

    pub fn get(&self, term: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|s| s.term == term)
            .map(|s| s.replacement.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|s| (s.term.as_str(), s.replacement.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Suggestion> for SuggestionMap {
    fn from_iter<I: IntoIterator<Item = Suggestion>>(iter: I) -> Self {
        let mut map = SuggestionMap::new();
        for Suggestion { term, replacement } in iter {
            map.insert(term, replacement);
        }
        map
    }
}

impl<'de> Deserialize<'de> for SuggestionMap {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<Suggestion>::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// User-facing label shown next to the score.
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "低风险",
            RiskLevel::Medium => "中风险",
            RiskLevel::High => "高风险",
        }
    }
}

/// Outcome of scanning one submission against a `TermIndex`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ScanResult {
    /// Matches in category-then-term order of the index.
    pub matches: Vec<Match>,
    pub risk_level: RiskLevel,
    /// 100 when nothing matched, otherwise `min(100 - 10n, 30)`.
    pub risk_score: i32,
    pub suggestions: SuggestionMap,
}
