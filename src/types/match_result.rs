use std::fmt;

/// Label produced for a matched request: the hyperscaler type used to pick
/// the account pool plus the EU-access and shared flags.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct MatchResult {
    hyperscaler_type: String,
    eu_access: bool,
    shared: bool,
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hyperscalerType={}, euAccess={}, shared={}",
            self.hyperscaler_type, self.eu_access, self.shared
        )
    }
}

impl MatchResult {
    pub fn new(hyperscaler_type: impl Into<String>, eu_access: bool, shared: bool) -> Self {
        Self {
            hyperscaler_type: hyperscaler_type.into(),
            eu_access,
            shared,
        }
    }

    #[must_use]
    pub fn hyperscaler_type(&self) -> &str {
        &self.hyperscaler_type
    }

    #[must_use]
    pub fn eu_access(&self) -> bool {
        self.eu_access
    }

    #[must_use]
    pub fn shared(&self) -> bool {
        self.shared
    }
}
