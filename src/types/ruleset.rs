use std::collections::BTreeSet;
use std::fmt;

use super::attributes::ProvisioningAttributes;
use super::match_report::MatchReport;
use super::match_result::MatchResult;
use super::outcome::ParsingOutcome;
use crate::parse::ParserKind;

/// Parsed, sorted and validated rule entries. Immutable and thread-safe;
/// designed to live behind `Arc`.
///
/// Entries are kept in evaluation order: erroneous entries first, then by
/// plan, then from least to most specific.
///
/// # Example
///
/// ```
/// use hap_rules::{ParserKind, ProvisioningAttributes, RuleSet};
///
/// let rules = RuleSet::parse(["azure", "azure(PR=westeurope)->EU"], ParserKind::Grammar);
/// let request = ProvisioningAttributes::new("azure", "azure").platform_region("westeurope");
/// let result = rules.matches(&request).unwrap();
/// assert!(result.eu_access());
/// ```
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub(crate) outcomes: Vec<ParsingOutcome>,
}

impl RuleSet {
    /// Parse every entry with the selected parser, then sort and validate
    /// the set. Entry failures are recorded on the outcomes.
    pub fn parse<I, S>(entries: I, parser: ParserKind) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parser = parser.parser();
        let outcomes = entries
            .into_iter()
            .map(|entry| ParsingOutcome::parse(entry.as_ref(), parser))
            .collect();
        crate::compile::compile(outcomes)
    }

    /// Match a request. Returns the label of the last matching entry in
    /// evaluation order, or `None` if no entry matched.
    #[must_use]
    pub fn matches(&self, request: &ProvisioningAttributes) -> Option<MatchResult> {
        crate::evaluate::evaluate(&self.outcomes, request)
    }

    /// Match a request, reporting the outcome for every error-free entry.
    pub fn match_detailed(&self, request: &ProvisioningAttributes) -> MatchReport {
        crate::evaluate::evaluate_detailed(&self.outcomes, request)
    }

    #[must_use]
    pub fn outcomes(&self) -> &[ParsingOutcome] {
        &self.outcomes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Original entry texts in evaluation order.
    #[must_use]
    pub fn evaluation_order(&self) -> Vec<&str> {
        self.outcomes.iter().map(ParsingOutcome::original_text).collect()
    }

    /// Plans covered by at least one entry that parsed cleanly.
    #[must_use]
    pub fn plans(&self) -> BTreeSet<&str> {
        self.outcomes
            .iter()
            .filter_map(ParsingOutcome::compiled_rule)
            .map(|rule| rule.plan())
            .collect()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.outcomes.iter().any(ParsingOutcome::has_errors)
    }

    /// Every error message keyed by the original text of its entry.
    #[must_use]
    pub fn errors(&self) -> Vec<(&str, String)> {
        self.outcomes
            .iter()
            .flat_map(|outcome| {
                outcome
                    .error_messages()
                    .into_iter()
                    .map(move |msg| (outcome.original_text(), msg))
            })
            .collect()
    }

    /// A readable summary of all erroneous entries, or `None` if the set is
    /// clean.
    #[must_use]
    pub fn first_error(&self) -> Option<String> {
        if !self.has_errors() {
            return None;
        }
        let mut summary = String::from("errors occurred during rules parsing:");
        for outcome in self.outcomes.iter().filter(|o| o.has_errors()) {
            summary.push_str(&format!(
                "\n  {}: {}",
                outcome.original_text(),
                outcome.error_messages().join("; ")
            ));
        }
        Some(summary)
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RuleSet({} entries, {} with errors, {} plans)",
            self.outcomes.len(),
            self.outcomes.iter().filter(|o| o.has_errors()).count(),
            self.plans().len(),
        )
    }
}
