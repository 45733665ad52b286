mod error;
mod grammar;
mod lexer;
mod naive;

pub use error::{ParseError, SyntaxError};
pub use grammar::GrammarParser;
pub use naive::NaiveParser;

use crate::ParsedRule;

/// Turns one rule entry into a [`ParsedRule`].
///
/// Implementations are interchangeable: for input accepted by the grammar
/// they produce equal rules.
pub trait Parser: Send + Sync {
    /// Parse a single entry such as `aws(PR=cf-eu10)->EU`.
    ///
    /// # Errors
    ///
    /// Returns every [`ParseError`] found in the entry.
    fn parse(&self, entry: &str) -> Result<ParsedRule, Vec<ParseError>>;
}

/// Selects the parser implementation used when loading rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParserKind {
    /// String splitting. Fast and permissive, limited error detection.
    Naive,
    /// Token stream and grammar with positioned syntax errors.
    #[default]
    Grammar,
}

impl ParserKind {
    #[must_use]
    pub fn parser(self) -> &'static dyn Parser {
        match self {
            ParserKind::Naive => &NaiveParser,
            ParserKind::Grammar => &GrammarParser,
        }
    }
}

/// Parse a single entry with the selected parser.
///
/// # Errors
///
/// Returns every [`ParseError`] found in the entry.
pub fn parse(entry: &str, kind: ParserKind) -> Result<ParsedRule, Vec<ParseError>> {
    kind.parser().parse(entry)
}
