use std::fmt;

use tracing::debug;
use uuid::Uuid;

use super::error::ValidationError;
use super::parsed_rule::ParsedRule;
use super::rule::CompiledRule;
use crate::parse::{ParseError, Parser};

/// Opaque identity assigned to every rule entry when it is parsed.
///
/// Survives sorting, so match reports can be correlated with the entry that
/// produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(Uuid);

impl RuleId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RuleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything known about one rule entry: its text, parse result and the
/// errors collected while parsing and validating the set.
#[derive(Debug, Clone)]
pub struct ParsingOutcome {
    pub(crate) id: RuleId,
    pub(crate) original_text: String,
    pub(crate) parsed_rule: Option<ParsedRule>,
    pub(crate) compiled_rule: Option<CompiledRule>,
    pub(crate) parsing_errors: Vec<ParseError>,
    pub(crate) processing_errors: Vec<ValidationError>,
}

impl ParsingOutcome {
    /// Parse one entry. Failures are captured in the outcome, never returned.
    pub fn parse(text: &str, parser: &dyn Parser) -> Self {
        let (parsed_rule, parsing_errors) = match parser.parse(text) {
            Ok(rule) => (Some(rule), Vec::new()),
            Err(errors) => (None, errors),
        };
        debug!(
            rule = text,
            errors = parsing_errors.len(),
            "parsed rule entry"
        );
        let compiled_rule = parsed_rule.as_ref().map(crate::compile_rule);
        Self {
            id: RuleId::new(),
            original_text: text.to_owned(),
            parsed_rule,
            compiled_rule,
            parsing_errors,
            processing_errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> RuleId {
        self.id
    }

    #[must_use]
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    #[must_use]
    pub fn parsed_rule(&self) -> Option<&ParsedRule> {
        self.parsed_rule.as_ref()
    }

    /// The matchable rule, present only when parsing succeeded.
    #[must_use]
    pub fn compiled_rule(&self) -> Option<&CompiledRule> {
        if self.has_parsing_errors() {
            return None;
        }
        self.compiled_rule.as_ref()
    }

    #[must_use]
    pub fn parsing_errors(&self) -> &[ParseError] {
        &self.parsing_errors
    }

    #[must_use]
    pub fn processing_errors(&self) -> &[ValidationError] {
        &self.processing_errors
    }

    #[must_use]
    pub fn has_parsing_errors(&self) -> bool {
        !self.parsing_errors.is_empty()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.has_parsing_errors() || !self.processing_errors.is_empty()
    }

    /// Rendered messages of every error attached to this entry.
    #[must_use]
    pub fn error_messages(&self) -> Vec<String> {
        self.parsing_errors
            .iter()
            .map(ToString::to_string)
            .chain(self.processing_errors.iter().map(ToString::to_string))
            .collect()
    }

    /// Reject the entry if its plan is not one of `supported`.
    pub(crate) fn check_plan(&mut self, supported: &[String]) {
        let Some(rule) = &self.parsed_rule else {
            return;
        };
        if !supported.iter().any(|plan| *plan == rule.plan) {
            self.parsing_errors.push(ParseError::UnsupportedPlan {
                plan: rule.plan.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::ParserKind;

    #[test]
    fn ids_are_unique() {
        assert_ne!(RuleId::new(), RuleId::new());
    }

    #[test]
    fn successful_parse_has_compiled_rule() {
        let outcome = ParsingOutcome::parse("aws(PR=cf-eu10)", ParserKind::Grammar.parser());
        assert!(!outcome.has_errors());
        assert_eq!(outcome.original_text(), "aws(PR=cf-eu10)");
        assert_eq!(outcome.compiled_rule().unwrap().wildcard_count(), 1);
    }

    #[test]
    fn failed_parse_keeps_errors() {
        let outcome = ParsingOutcome::parse("aws(PR=", ParserKind::Grammar.parser());
        assert!(outcome.has_parsing_errors());
        assert!(outcome.parsed_rule().is_none());
        assert!(outcome.compiled_rule().is_none());
        assert!(!outcome.error_messages().is_empty());
    }

    #[test]
    fn unsupported_plan_is_a_parsing_error() {
        let mut outcome = ParsingOutcome::parse("gcp", ParserKind::Naive.parser());
        outcome.check_plan(&["aws".to_owned(), "azure".to_owned()]);
        assert!(outcome.has_parsing_errors());
        assert!(outcome.compiled_rule().is_none());
        assert!(matches!(
            &outcome.parsing_errors()[0],
            ParseError::UnsupportedPlan { plan } if plan == "gcp"
        ));
    }
}
