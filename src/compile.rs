use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::{CompiledRule, ParsedRule, ParsingOutcome, Pattern, RuleSet, ValidationError};

/// Lift a parsed rule into its matchable form.
#[must_use]
pub fn compile_rule(rule: &ParsedRule) -> CompiledRule {
    let platform_region = Pattern::from_value(rule.platform_region.as_deref());
    let hyperscaler_region = Pattern::from_value(rule.hyperscaler_region.as_deref());
    let wildcard_count = u8::from(platform_region.is_wildcard())
        + u8::from(hyperscaler_region.is_wildcard());

    CompiledRule {
        plan: rule.plan.clone(),
        platform_region,
        hyperscaler_region,
        eu_access: rule.eu_access,
        shared: rule.shared,
        platform_region_suffix: rule.platform_region_suffix,
        hyperscaler_region_suffix: rule.hyperscaler_region_suffix,
        wildcard_count,
    }
}

impl From<&ParsedRule> for CompiledRule {
    fn from(rule: &ParsedRule) -> Self {
        compile_rule(rule)
    }
}

/// Sort the outcomes into evaluation order and validate the set.
pub(crate) fn compile(mut outcomes: Vec<ParsingOutcome>) -> RuleSet {
    crate::sort::sort_outcomes(&mut outcomes);
    validate(&mut outcomes);
    RuleSet { outcomes }
}

/// Attach uniqueness and ambiguity errors to the offending outcomes.
///
/// Skipped entirely when any entry failed to parse.
pub(crate) fn validate(outcomes: &mut [ParsingOutcome]) {
    if outcomes.iter().any(ParsingOutcome::has_parsing_errors) {
        return;
    }
    check_uniqueness(outcomes);
    check_ambiguity(outcomes);

    for outcome in outcomes.iter() {
        for err in &outcome.processing_errors {
            warn!(rule = %outcome.original_text, error = %err, "rule validation failed");
        }
    }
}

/// Every occurrence of a signature after the first is a duplicate.
fn check_uniqueness(outcomes: &mut [ParsingOutcome]) {
    let mut seen = HashSet::new();
    for outcome in outcomes.iter_mut() {
        let Some(rule) = outcome.compiled_rule() else {
            continue;
        };
        let signature = rule.signature();
        if !seen.insert(signature.clone()) {
            outcome
                .processing_errors
                .push(ValidationError::Duplicate { signature });
        }
    }
}

/// A rule constraining only the platform region and a rule constraining only
/// the hyperscaler region of the same plan both match a request carrying both
/// regions, with equal specificity. The pair is ambiguous unless a rule
/// constraining both regions resolves the overlap.
fn check_ambiguity(outcomes: &mut [ParsingOutcome]) {
    let mut resolved: HashSet<String> = HashSet::new();
    let mut platform_only: Vec<(usize, &CompiledRule)> = Vec::new();
    let mut hyperscaler_only: HashMap<&str, Vec<(usize, &CompiledRule)>> = HashMap::new();

    for (idx, outcome) in outcomes.iter().enumerate() {
        if outcome.has_errors() {
            continue;
        }
        let Some(rule) = outcome.compiled_rule() else {
            continue;
        };
        match (rule.platform_region.is_wildcard(), rule.hyperscaler_region.is_wildcard()) {
            (false, false) => {
                resolved.insert(rule.signature());
            }
            (false, true) => platform_only.push((idx, rule)),
            (true, false) => hyperscaler_only.entry(rule.plan()).or_default().push((idx, rule)),
            (true, true) => {}
        }
    }

    let mut found: Vec<(usize, ValidationError)> = Vec::new();
    for &(pr_idx, pr_rule) in &platform_only {
        let Some(candidates) = hyperscaler_only.get(pr_rule.plan()) else {
            continue;
        };
        for &(hr_idx, hr_rule) in candidates {
            let missing = format!(
                "{}({},{})",
                pr_rule.plan(),
                pr_rule.platform_region,
                hr_rule.hyperscaler_region
            );
            if resolved.contains(&missing) {
                continue;
            }
            let (first, second) = if pr_idx < hr_idx {
                (pr_rule, hr_rule)
            } else {
                (hr_rule, pr_rule)
            };
            found.push((
                pr_idx.max(hr_idx),
                ValidationError::Ambiguous {
                    first: first.signature(),
                    second: second.signature(),
                    missing,
                },
            ));
        }
    }

    found.sort_by_key(|(idx, _)| *idx);
    for (idx, err) in found {
        outcomes[idx].processing_errors.push(err);
    }
}
