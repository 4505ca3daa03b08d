/// Replacement phrase policy for matched terms.
///
/// Each category maps to a small list of neutral phrases. A `Chooser` picks one
/// candidate per call; production uses uniform random selection so rewritten copy
/// varies between submissions.
use rand::seq::IndexedRandom;

/// Phrase used for categories the policy does not know.
pub const DEFAULT_REPLACEMENT: &str = "内容优化";

const REFERENCE_TABLE: [(&str, [&str; 2]); 8] = [
    ("政治相关", ["社会话题", "资讯分享"]),
    ("金融投资诱导", ["理财知识", "经验交流"]),
    ("色情低俗", ["趣味分享", "互动娱乐"]),
    ("夸大宣传", ["真实体验", "合理预期"]),
    ("医疗健康虚假", ["健康小贴士", "科学参考"]),
    ("诱导转移联系", ["官方咨询", "正规渠道"]),
    ("赌博博彩相关", ["娱乐内容", "兴趣讨论"]),
    ("其他高危词", ["信息提示", "内容优化"]),
];

/// Picks one phrase from a candidate list.
pub trait Chooser: Send + Sync {
    /// Returns one of `candidates`, or `None` when the list is empty.
    fn choose<'a>(&self, candidates: &'a [String]) -> Option<&'a String>;
}

/// Uniform random selection from the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadChooser;

impl Chooser for ThreadChooser {
    fn choose<'a>(&self, candidates: &'a [String]) -> Option<&'a String> {
        candidates.choose(&mut rand::rng())
    }
}

/// Always the first candidate. Makes review output reproducible.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstChooser;

impl Chooser for FirstChooser {
    fn choose<'a>(&self, candidates: &'a [String]) -> Option<&'a String> {
        candidates.first()
    }
}

#[derive(Debug, Clone)]
struct CategoryCandidates {
    category: String,
    candidates: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SuggestionPolicy {
    table: Vec<CategoryCandidates>,
    fallback: Vec<String>,
}

impl SuggestionPolicy {
    /// An empty policy where every category maps to `fallback`.
    ///
    /// An empty `fallback` is replaced by `DEFAULT_REPLACEMENT`.
    pub fn new(fallback: impl Into<String>) -> Self {
        let fallback = fallback.into();
        let fallback = if fallback.is_empty() {
            DEFAULT_REPLACEMENT.to_string()
        } else {
            fallback
        };
        Self {
            table: Vec::new(),
            fallback: vec![fallback],
        }
    }

    /// Registers candidates for `category`, replacing any earlier entry.
    /// Empty candidate strings are dropped; a category left with none uses the fallback.
    pub fn with_category<I, S>(mut self, category: impl Into<String>, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let category = category.into();
        let candidates: Vec<String> = candidates
            .into_iter()
            .map(Into::into)
            .filter(|c: &String| !c.is_empty())
            .collect();

        self.table.retain(|entry| entry.category != category);
        if !candidates.is_empty() {
            self.table.push(CategoryCandidates {
                category,
                candidates,
            });
        }
        self
    }

    /// Candidates for `category`, or the single fallback phrase when unknown.
    pub fn candidates(&self, category: &str) -> &[String] {
        self.table
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.candidates.as_slice())
            .unwrap_or(&self.fallback)
    }

    pub fn is_known(&self, category: &str) -> bool {
        self.table.iter().any(|entry| entry.category == category)
    }

    pub fn fallback(&self) -> &str {
        &self.fallback[0]
    }

    /// Known categories in registration order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.table.iter().map(|entry| entry.category.as_str())
    }

    /// Picks a replacement phrase for `category`. Never returns an empty string.
    pub fn suggest_for(&self, category: &str, chooser: &dyn Chooser) -> &str {
        chooser
            .choose(self.candidates(category))
            .map(String::as_str)
            .unwrap_or_else(|| self.fallback())
    }
}

impl Default for SuggestionPolicy {
    fn default() -> Self {
        REFERENCE_TABLE.iter().fold(
            SuggestionPolicy::new(DEFAULT_REPLACEMENT),
            |policy, (category, candidates)| policy.with_category(*category, *candidates),
        )
    }
}
