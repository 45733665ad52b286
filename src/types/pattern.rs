use std::fmt;

/// Constraint on one request attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Pattern {
    Literal(String),
    Wildcard,
}

impl Pattern {
    /// Absent or empty values compile to [`Pattern::Wildcard`].
    #[must_use]
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => Pattern::Literal(v.to_owned()),
            _ => Pattern::Wildcard,
        }
    }

    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Pattern::Literal(literal) => literal == value,
            Pattern::Wildcard => true,
        }
    }

    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Pattern::Wildcard)
    }

    /// The literal value, or `None` for a wildcard.
    #[must_use]
    pub fn literal(&self) -> Option<&str> {
        match self {
            Pattern::Literal(literal) => Some(literal),
            Pattern::Wildcard => None,
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Literal(literal) => write!(f, "{literal}"),
            Pattern::Wildcard => write!(f, "*"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_matches_everything() {
        let p = Pattern::Wildcard;
        assert!(p.matches(""));
        assert!(p.matches("westeurope"));
    }

    #[test]
    fn literal_matches_exactly() {
        let p = Pattern::Literal("cf-eu10".into());
        assert!(p.matches("cf-eu10"));
        assert!(!p.matches("cf-eu11"));
        assert!(!p.matches(""));
    }

    #[test]
    fn from_value() {
        assert_eq!(Pattern::from_value(None), Pattern::Wildcard);
        assert_eq!(Pattern::from_value(Some("")), Pattern::Wildcard);
        assert_eq!(
            Pattern::from_value(Some("eu")),
            Pattern::Literal("eu".into())
        );
    }
}
