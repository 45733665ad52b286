mod compile;
mod error;
mod evaluate;
pub mod parse;
mod service;
mod sort;
mod types;

pub use compile::compile_rule;
pub use error::HapError;
pub use parse::{GrammarParser, NaiveParser, ParseError, Parser, ParserKind, SyntaxError};
#[cfg(feature = "config")]
pub use service::RulesConfig;
pub use service::{RuleService, RuleServiceBuilder};
pub use sort::{compare as compare_outcomes, sort_outcomes};
pub use types::{
    CompiledRule, ConfigError, InputAttribute, MatchReport, MatchResult, OutputAttribute,
    ParsedRule, ParsingOutcome, Pattern, ProvisioningAttributes, RuleId, RuleMatch, RuleSet,
    ValidationError,
};
