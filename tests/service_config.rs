#![cfg(feature = "config")]

use std::io::Write;

use hap_rules::{ConfigError, HapError, ParserKind, ProvisioningAttributes, RuleService, RulesConfig};

const RULES_YAML: &str = "\
rule:
  - aws
  - aws(PR=cf-eu10)->EU
  - aws(PR=cf-us10,HR=*)->S,EU
  - azure(PR=*)
  - trial->S
";

fn write_rules(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn load_rules_file() {
    let file = write_rules(RULES_YAML);
    let service = RuleService::builder()
        .required_plans(["aws", "azure", "trial"])
        .load_file(file.path())
        .unwrap();

    assert_eq!(service.outcomes().len(), 5);
    assert!(service.first_error().is_none());

    let request = ProvisioningAttributes::new("azure", "azure").platform_region("cf-eu20");
    assert_eq!(
        service.matches(&request).unwrap().hyperscaler_type(),
        "azure_cf-eu20"
    );
}

#[test]
fn naive_and_grammar_load_same_file() {
    let file = write_rules(RULES_YAML);
    let naive = RuleService::builder()
        .parser(ParserKind::Naive)
        .load_file(file.path())
        .unwrap();
    let grammar = RuleService::builder().load_file(file.path()).unwrap();
    assert_eq!(naive.parser_kind(), ParserKind::Naive);
    assert_eq!(
        naive.rules().evaluation_order(),
        grammar.rules().evaluation_order()
    );
}

#[test]
fn missing_required_plan_in_file() {
    let file = write_rules(RULES_YAML);
    let err = RuleService::builder()
        .required_plans(["gcp", "aws"])
        .load_file(file.path())
        .unwrap_err();
    assert!(matches!(
        err,
        HapError::Config(ConfigError::MissingPlanRules { ref plans }) if plans == &["gcp"]
    ));
}

#[test]
fn file_errors() {
    assert!(matches!(
        RuleService::builder().load_file(""),
        Err(HapError::Config(ConfigError::NoSource))
    ));

    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        RuleService::builder().load_file(dir.path().join("missing.yaml")),
        Err(HapError::Io(_))
    ));

    let file = write_rules("rule: {not: a list}");
    assert!(matches!(
        RuleService::builder().load_file(file.path()),
        Err(HapError::Yaml(_))
    ));

    let file = write_rules("rule: []\n");
    assert!(matches!(
        RuleService::builder().load_file(file.path()),
        Err(HapError::Config(ConfigError::EmptySource))
    ));

    let file = write_rules("other: 1\n");
    assert!(matches!(
        RuleService::builder().load_file(file.path()),
        Err(HapError::Config(ConfigError::EmptySource))
    ));
}

#[test]
fn rules_config_round_trip() {
    let config: RulesConfig = serde_yaml::from_str(RULES_YAML).unwrap();
    assert_eq!(config.rule.len(), 5);
    assert_eq!(config.rule[2], "aws(PR=cf-us10,HR=*)->S,EU");
    let yaml = serde_yaml::to_string(&config).unwrap();
    assert_eq!(serde_yaml::from_str::<RulesConfig>(&yaml).unwrap(), config);
}

#[test]
fn errors_reported_not_raised() {
    let file = write_rules("rule:\n  - aws\n  - aws\n  - azure(PR=\n");
    let service = RuleService::builder().load_file(file.path()).unwrap();
    let errors = service.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].0, "azure(PR=");
}
