use std::fmt;

use super::match_result::MatchResult;
use super::outcome::RuleId;

/// Per-entry result of matching one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    pub id: RuleId,
    pub original_text: String,
    pub matched: bool,
    pub final_match: bool,
}

/// Detailed match report returned by
/// [`RuleSet::match_detailed()`](super::RuleSet::match_detailed).
///
/// Lists every error-free entry in evaluation order with its `matched` and
/// `final_match` flags, plus the label derived from the final match.
#[derive(Debug, Clone)]
#[must_use]
pub struct MatchReport {
    result: Option<MatchResult>,
    entries: Vec<RuleMatch>,
}

impl MatchReport {
    pub(crate) fn new(result: Option<MatchResult>, entries: Vec<RuleMatch>) -> Self {
        Self { result, entries }
    }

    /// The label, same as [`RuleSet::matches()`](super::RuleSet::matches).
    #[must_use]
    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn entries(&self) -> &[RuleMatch] {
        &self.entries
    }

    /// The entry selected as authoritative, if any entry matched.
    #[must_use]
    pub fn final_match(&self) -> Option<&RuleMatch> {
        self.entries.iter().find(|e| e.final_match)
    }

    /// Entries that matched, in evaluation order.
    pub fn matched(&self) -> impl Iterator<Item = &RuleMatch> {
        self.entries.iter().filter(|e| e.matched)
    }

    #[must_use]
    pub fn get(&self, id: RuleId) -> Option<&RuleMatch> {
        self.entries.iter().find(|e| e.id == id)
    }
}

impl fmt::Display for MatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.result, self.final_match()) {
            (Some(result), Some(entry)) => write!(f, "match: {} [{result}]", entry.original_text)?,
            _ => write!(f, "match: none")?,
        }
        let matched: Vec<&str> = self.matched().map(|e| e.original_text.as_str()).collect();
        write!(f, ", matched: [{}]", matched.join(", "))
    }
}
