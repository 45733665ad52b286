use std::collections::BTreeSet;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::parse::ParserKind;
use crate::{
    ConfigError, MatchReport, MatchResult, ParsingOutcome, ProvisioningAttributes, RuleSet,
};

/// On-disk rule file: a YAML document with a `rule` list.
///
/// ```yaml
/// rule:
///   - aws
///   - aws(PR=cf-eu10)->EU
///   - azure(PR=*)
/// ```
#[cfg(feature = "config")]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub rule: Vec<String>,
}

/// Builder for a [`RuleService`].
///
/// # Example
///
/// ```
/// use hap_rules::{ParserKind, ProvisioningAttributes, RuleService};
///
/// let service = RuleService::builder()
///     .parser(ParserKind::Naive)
///     .required_plans(["aws"])
///     .load_str("aws; aws(PR=cf-eu10)->EU")
///     .unwrap();
///
/// let request = ProvisioningAttributes::new("aws", "aws").platform_region("cf-eu10");
/// assert!(service.matches(&request).unwrap().eu_access());
/// ```
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct RuleServiceBuilder {
    parser: ParserKind,
    supported_plans: Option<Vec<String>>,
    required_plans: Vec<String>,
}

impl RuleServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parser(mut self, kind: ParserKind) -> Self {
        self.parser = kind;
        self
    }

    /// Restrict entries to these plans. Entries naming any other plan are
    /// recorded as erroneous.
    pub fn supported_plans<I, S>(mut self, plans: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_plans = Some(plans.into_iter().map(Into::into).collect());
        self
    }

    /// Plans that must be covered by at least one error-free entry.
    pub fn required_plans<I, S>(mut self, plans: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_plans = plans.into_iter().map(Into::into).collect();
        self
    }

    /// Parse, sort and validate the entries.
    ///
    /// Entry failures never abort the load; they are recorded on the
    /// outcomes and reported by [`RuleService::first_error()`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySource`] if there are no entries and
    /// [`ConfigError::MissingPlanRules`] if a required plan is not covered.
    pub fn load<I, S>(self, entries: I) -> Result<RuleService, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parser = self.parser.parser();
        let mut outcomes: Vec<ParsingOutcome> = entries
            .into_iter()
            .map(|entry| ParsingOutcome::parse(entry.as_ref(), parser))
            .collect();
        if outcomes.is_empty() {
            return Err(ConfigError::EmptySource);
        }

        if let Some(supported) = &self.supported_plans {
            for outcome in &mut outcomes {
                outcome.check_plan(supported);
            }
        }

        let rules = crate::compile::compile(outcomes);

        let covered = rules.plans();
        let missing: BTreeSet<&str> = self
            .required_plans
            .iter()
            .map(String::as_str)
            .filter(|plan| !covered.contains(plan))
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingPlanRules {
                plans: missing.into_iter().map(str::to_owned).collect(),
            });
        }

        info!(
            entries = rules.len(),
            erroneous = rules.outcomes().iter().filter(|o| o.has_parsing_errors()).count(),
            validation_errors = rules
                .outcomes()
                .iter()
                .map(|o| o.processing_errors().len())
                .sum::<usize>(),
            parser = ?self.parser,
            "HAP rules loaded"
        );

        Ok(RuleService {
            rules,
            parser: self.parser,
        })
    }

    /// Load entries separated by `;` or newlines. Blank entries are ignored.
    ///
    /// # Errors
    ///
    /// Same as [`load()`](Self::load).
    pub fn load_str(self, text: &str) -> Result<RuleService, ConfigError> {
        self.load(
            text.split([';', '\n'])
                .map(str::trim)
                .filter(|entry| !entry.is_empty()),
        )
    }

    /// Load a YAML rules document (see [`RulesConfig`]).
    ///
    /// # Errors
    ///
    /// Returns [`HapError::Yaml`](crate::HapError::Yaml) for malformed YAML,
    /// otherwise the same errors as [`load()`](Self::load).
    #[cfg(feature = "config")]
    pub fn load_yaml(self, text: &str) -> Result<RuleService, crate::HapError> {
        let config: RulesConfig = serde_yaml::from_str(text)?;
        Ok(self.load(&config.rule)?)
    }

    /// Read and load a YAML rules file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoSource`] for an empty path,
    /// [`HapError::Io`](crate::HapError::Io) if the file cannot be read,
    /// otherwise the same errors as [`load_yaml()`](Self::load_yaml).
    #[cfg(feature = "config")]
    pub fn load_file(self, path: impl AsRef<std::path::Path>) -> Result<RuleService, crate::HapError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(ConfigError::NoSource.into());
        }
        let text = std::fs::read_to_string(path)?;
        self.load_yaml(&text)
    }
}

/// Loaded HAP rules. Immutable after load; thread-safe and designed to live
/// behind `Arc`.
#[derive(Debug, Clone)]
pub struct RuleService {
    rules: RuleSet,
    parser: ParserKind,
}

impl RuleService {
    pub fn builder() -> RuleServiceBuilder {
        RuleServiceBuilder::new()
    }

    /// Load entries with the default grammar parser.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySource`] if there are no entries.
    pub fn load<I, S>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        RuleServiceBuilder::new().load(entries)
    }

    /// Match a request. `None` means no rule applies; it is not an error.
    #[must_use]
    pub fn matches(&self, request: &ProvisioningAttributes) -> Option<MatchResult> {
        self.rules.matches(request)
    }

    pub fn match_detailed(&self, request: &ProvisioningAttributes) -> MatchReport {
        self.rules.match_detailed(request)
    }

    /// Aggregate of every erroneous entry, or `None` if all entries are clean.
    #[must_use]
    pub fn first_error(&self) -> Option<String> {
        self.rules.first_error()
    }

    /// `(original text, message)` for every error in the set.
    #[must_use]
    pub fn errors(&self) -> Vec<(&str, String)> {
        self.rules.errors()
    }

    /// Outcomes in evaluation order.
    #[must_use]
    pub fn outcomes(&self) -> &[ParsingOutcome] {
        self.rules.outcomes()
    }

    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    #[must_use]
    pub fn parser_kind(&self) -> ParserKind {
        self.parser
    }
}
