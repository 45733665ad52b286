mod attributes;
mod error;
mod match_report;
mod match_result;
mod outcome;
mod parsed_rule;
mod pattern;
mod rule;
mod ruleset;

pub use attributes::ProvisioningAttributes;
pub use error::{ConfigError, ValidationError};
pub use match_report::{MatchReport, RuleMatch};
pub use match_result::MatchResult;
pub use outcome::{ParsingOutcome, RuleId};
pub(crate) use parsed_rule::WILDCARD;
pub use parsed_rule::{InputAttribute, OutputAttribute, ParsedRule};
pub use pattern::Pattern;
pub use rule::CompiledRule;
pub use ruleset::RuleSet;
