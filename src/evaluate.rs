use tracing::trace;

use crate::{CompiledRule, MatchReport, MatchResult, ParsingOutcome, ProvisioningAttributes, RuleMatch};

/// Last matching rule in evaluation order, skipping entries that failed to parse.
fn last_match<'a>(
    outcomes: &'a [ParsingOutcome],
    request: &ProvisioningAttributes,
) -> Option<(usize, &'a CompiledRule)> {
    outcomes
        .iter()
        .enumerate()
        .rev()
        .filter_map(|(idx, outcome)| outcome.compiled_rule().map(|rule| (idx, rule)))
        .find(|(_, rule)| rule.matches(request))
}

pub(crate) fn evaluate(
    outcomes: &[ParsingOutcome],
    request: &ProvisioningAttributes,
) -> Option<MatchResult> {
    let (idx, rule) = last_match(outcomes, request)?;
    trace!(rule = %outcomes[idx].original_text(), plan = %request.plan, "final match");
    Some(rule.result_for(request))
}

pub(crate) fn evaluate_detailed(
    outcomes: &[ParsingOutcome],
    request: &ProvisioningAttributes,
) -> MatchReport {
    let winner = last_match(outcomes, request);

    let entries = outcomes
        .iter()
        .enumerate()
        .filter_map(|(idx, outcome)| {
            let rule = outcome.compiled_rule()?;
            let matched = rule.matches(request);
            if matched {
                trace!(rule = %outcome.original_text(), "matched");
            }
            Some(RuleMatch {
                id: outcome.id(),
                original_text: outcome.original_text().to_owned(),
                matched,
                final_match: winner.is_some_and(|(w, _)| w == idx),
            })
        })
        .collect();

    MatchReport::new(winner.map(|(_, rule)| rule.result_for(request)), entries)
}

#[cfg(test)]
mod tests {
    use crate::{MatchResult, ParserKind, ProvisioningAttributes, RuleSet};

    fn rules(entries: &[&str]) -> RuleSet {
        RuleSet::parse(entries.iter().copied(), ParserKind::Grammar)
    }

    fn aws(pr: &str, hr: &str) -> ProvisioningAttributes {
        ProvisioningAttributes::new("aws", "aws")
            .platform_region(pr)
            .hyperscaler_region(hr)
    }

    #[test]
    fn plan_only_rule_matches_any_region() {
        let result = rules(&["aws"]).matches(&aws("cf-eu10", "eu-west-2"));
        assert_eq!(result, Some(MatchResult::new("aws", false, false)));
    }

    #[test]
    fn most_specific_rule_wins() {
        let set = rules(&[
            "aws(PR=cf-eu10,HR=eu-west-2)->S",
            "aws(PR=cf-eu10)->EU",
            "aws",
        ]);
        let result = set.matches(&aws("cf-eu10", "eu-west-2")).unwrap();
        assert!(result.shared());
        assert!(!result.eu_access());

        let result = set.matches(&aws("cf-eu10", "us-east-1")).unwrap();
        assert!(result.eu_access());

        let result = set.matches(&aws("cf-us10", "us-east-1")).unwrap();
        assert_eq!(result, MatchResult::new("aws", false, false));
    }

    #[test]
    fn wildcard_suffixes_compose() {
        let result = rules(&["aws(PR=*,HR=*)"])
            .matches(&aws("cf-eu10", "eu-west-2"))
            .unwrap();
        assert_eq!(result.hyperscaler_type(), "aws_cf-eu10_eu-west-2");

        let result = rules(&["aws(PR=cf-eu10,HR=*)->EU"])
            .matches(&aws("cf-eu10", "eu-central-1"))
            .unwrap();
        assert_eq!(result.hyperscaler_type(), "aws_eu-central-1");
    }

    #[test]
    fn no_match_for_other_plan() {
        let request = ProvisioningAttributes::new("gcp", "gcp");
        assert_eq!(rules(&["aws", "azure"]).matches(&request), None);
    }

    #[test]
    fn entries_with_parse_errors_never_match() {
        let set = rules(&["aws", "aws(PR=cf-eu10,PR=x)->EU"]);
        let result = set.matches(&aws("cf-eu10", "")).unwrap();
        assert!(!result.eu_access());
    }

    #[test]
    fn detailed_report_flags() {
        let set = rules(&["aws", "aws(PR=cf-eu10)->EU", "azure", "aws("]);
        let report = set.match_detailed(&aws("cf-eu10", "eu-west-2"));

        assert_eq!(report.entries().len(), 3);
        let matched: Vec<&str> = report.matched().map(|e| e.original_text.as_str()).collect();
        assert_eq!(matched, vec!["aws", "aws(PR=cf-eu10)->EU"]);
        assert_eq!(
            report.final_match().unwrap().original_text,
            "aws(PR=cf-eu10)->EU"
        );
        assert_eq!(report.entries().iter().filter(|e| e.final_match).count(), 1);
        assert_eq!(report.result(), set.matches(&aws("cf-eu10", "eu-west-2")).as_ref());
    }

    #[test]
    fn detailed_report_without_match() {
        let report = rules(&["aws"]).match_detailed(&ProvisioningAttributes::new("azure", "azure"));
        assert!(report.result().is_none());
        assert!(report.final_match().is_none());
        assert_eq!(report.to_string(), "match: none, matched: []");
    }
}
