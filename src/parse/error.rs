use std::fmt;

use thiserror::Error;

/// A grammar violation at a position in the rule text.
///
/// Lines are 1-based, columns are 0-based character offsets within the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    line: usize,
    column: usize,
    message: String,
}

impl SyntaxError {
    pub(crate) fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}:{} {}", self.line, self.column, self.message)
    }
}

impl std::error::Error for SyntaxError {}

/// Errors that make a single rule entry unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("syntax error: {0}")]
    Syntax(SyntaxError),

    #[error("{attribute} already set")]
    DuplicateAttribute { attribute: String },

    #[error("{attribute} is empty")]
    EmptyValue { attribute: String },

    #[error("plan {plan} is not supported")]
    UnsupportedPlan { plan: String },
}

impl From<SyntaxError> for ParseError {
    fn from(err: SyntaxError) -> Self {
        ParseError::Syntax(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_display() {
        let err = SyntaxError::new(1, 5, "mismatched input ')'");
        assert_eq!(err.to_string(), "line 1:5 mismatched input ')'");
        assert_eq!(
            ParseError::from(err).to_string(),
            "syntax error: line 1:5 mismatched input ')'"
        );
    }

    #[test]
    fn semantic_error_display() {
        let err = ParseError::DuplicateAttribute {
            attribute: "PR".into(),
        };
        assert_eq!(err.to_string(), "PR already set");

        let err = ParseError::EmptyValue {
            attribute: "plan".into(),
        };
        assert_eq!(err.to_string(), "plan is empty");
    }
}
