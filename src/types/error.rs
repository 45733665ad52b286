use thiserror::Error;

/// Problems found when checking a rule set as a whole.
///
/// Attached to the offending [`ParsingOutcome`](super::ParsingOutcome); they
/// never abort loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("rule is not unique: {signature}")]
    Duplicate { signature: String },

    #[error("rules {first} and {second} are ambiguous: missing {missing}")]
    Ambiguous {
        first: String,
        second: String,
        missing: String,
    },
}

/// Errors that prevent a rule set from being loaded at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("no HAP rules source provided")]
    NoSource,

    #[error("HAP rules source contains no rule entries")]
    EmptySource,

    #[error("one or more plans does not have rule defined: {}", plans.join(", "))]
    MissingPlanRules { plans: Vec<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_message() {
        let err = ValidationError::Duplicate {
            signature: "aws(eu1,eu1)".into(),
        };
        assert_eq!(err.to_string(), "rule is not unique: aws(eu1,eu1)");
    }

    #[test]
    fn ambiguous_message() {
        let err = ValidationError::Ambiguous {
            first: "aws(x,)".into(),
            second: "aws(,y)".into(),
            missing: "aws(x,y)".into(),
        };
        assert_eq!(
            err.to_string(),
            "rules aws(x,) and aws(,y) are ambiguous: missing aws(x,y)"
        );
    }

    #[test]
    fn missing_plans_message() {
        let err = ConfigError::MissingPlanRules {
            plans: vec!["aws".into(), "trial".into()],
        };
        assert_eq!(
            err.to_string(),
            "one or more plans does not have rule defined: aws, trial"
        );
    }

    #[test]
    fn empty_source_message() {
        assert_eq!(
            ConfigError::EmptySource.to_string(),
            "HAP rules source contains no rule entries"
        );
    }
}
