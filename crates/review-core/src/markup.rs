/// Text transforms driven by scan output: emphasis markup and term substitution.
///
/// Two substitution strategies are available:
/// - `Sequential` replaces one term at a time over the progressively edited
///   string. Later terms can hit text inserted by earlier ones (markup, or a
///   replacement phrase).
///   An empty term matches at every character boundary, as `str::replace` does.
/// - `SinglePass` locates every non-empty term against the original text, resolves
///   overlaps leftmost-longest, and writes the output once. Empty terms are skipped.
use std::str::FromStr;

use regex::{Captures, Regex};
use tracing::warn;

use crate::model::{Match, SuggestionMap};

pub const MARK_OPEN: &str = "<mark style='background-color: #FFDD57'>";
pub const MARK_CLOSE: &str = "</mark>";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubstitutionMode {
    #[default]
    Sequential,
    SinglePass,
}

impl SubstitutionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SubstitutionMode::Sequential => "sequential",
            SubstitutionMode::SinglePass => "single-pass",
        }
    }
}

impl FromStr for SubstitutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(SubstitutionMode::Sequential),
            "single-pass" | "single_pass" | "singlepass" => Ok(SubstitutionMode::SinglePass),
            other => Err(format!(
                "unknown substitution mode '{other}' (expected 'sequential' or 'single-pass')"
            )),
        }
    }
}

/// Wraps every occurrence of each matched term in `MARK_OPEN`/`MARK_CLOSE`.
pub fn highlight(text: &str, matches: &[Match], mode: SubstitutionMode) -> String {
    let terms: Vec<&str> = matches.iter().map(|m| m.term.as_str()).collect();

    if mode == SubstitutionMode::SinglePass {
        match alternation(&terms) {
            Alternation::Nothing => return text.to_string(),
            Alternation::Pattern(re) => {
                return re
                    .replace_all(text, |caps: &Captures| {
                        format!("{MARK_OPEN}{}{MARK_CLOSE}", &caps[0])
                    })
                    .into_owned();
            }
            Alternation::Unavailable => {}
        }
    }

    let mut highlighted = text.to_string();
    for term in terms {
        highlighted = highlighted.replace(term, &format!("{MARK_OPEN}{term}{MARK_CLOSE}"));
    }
    highlighted
}

/// Substitutes each suggested term with its replacement.
pub fn rewrite(text: &str, suggestions: &SuggestionMap, mode: SubstitutionMode) -> String {
    if mode == SubstitutionMode::SinglePass {
        let terms: Vec<&str> = suggestions.iter().map(|(term, _)| term).collect();
        match alternation(&terms) {
            Alternation::Nothing => return text.to_string(),
            Alternation::Pattern(re) => {
                return re
                    .replace_all(text, |caps: &Captures| {
                        let found = &caps[0];
                        suggestions.get(found).unwrap_or(found).to_string()
                    })
                    .into_owned();
            }
            Alternation::Unavailable => {}
        }
    }

    let mut rewritten = text.to_string();
    for (term, replacement) in suggestions.iter() {
        rewritten = rewritten.replace(term, replacement);
    }
    rewritten
}

enum Alternation {
    /// No non-empty term; the text is returned unchanged.
    Nothing,
    Pattern(Regex),
    /// The pattern failed to compile; callers use the sequential path.
    Unavailable,
}

/// Builds a literal alternation over the non-empty `terms`, longest first, so the
/// regex engine's leftmost-first semantics yield leftmost-longest matches.
fn alternation(terms: &[&str]) -> Alternation {
    let mut unique: Vec<&str> = Vec::with_capacity(terms.len());
    for term in terms.iter().copied().filter(|t| !t.is_empty()) {
        if !unique.contains(&term) {
            unique.push(term);
        }
    }
    if unique.is_empty() {
        return Alternation::Nothing;
    }
    unique.sort_by(|a, b| b.len().cmp(&a.len()));

    let pattern = unique
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<String>>()
        .join("|");

    match Regex::new(&pattern) {
        Ok(re) => Alternation::Pattern(re),
        Err(e) => {
            warn!(error = %e, terms = unique.len(), "single-pass pattern failed to compile, using sequential substitution");
            Alternation::Unavailable
        }
    }
}
