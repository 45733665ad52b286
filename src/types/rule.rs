use std::fmt;

use super::attributes::ProvisioningAttributes;
use super::match_result::MatchResult;
use super::pattern::Pattern;

/// A rule lifted into matchable form.
///
/// Produced by [`compile_rule`](crate::compile_rule) from a
/// [`ParsedRule`](super::ParsedRule). The plan is always a literal; the two
/// regions are literal or wildcard patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledRule {
    pub(crate) plan: String,
    pub(crate) platform_region: Pattern,
    pub(crate) hyperscaler_region: Pattern,
    pub(crate) eu_access: bool,
    pub(crate) shared: bool,
    pub(crate) platform_region_suffix: bool,
    pub(crate) hyperscaler_region_suffix: bool,
    pub(crate) wildcard_count: u8,
}

impl CompiledRule {
    #[must_use]
    pub fn plan(&self) -> &str {
        &self.plan
    }

    #[must_use]
    pub fn platform_region(&self) -> &Pattern {
        &self.platform_region
    }

    #[must_use]
    pub fn hyperscaler_region(&self) -> &Pattern {
        &self.hyperscaler_region
    }

    #[must_use]
    pub fn eu_access(&self) -> bool {
        self.eu_access
    }

    #[must_use]
    pub fn shared(&self) -> bool {
        self.shared
    }

    #[must_use]
    pub fn platform_region_suffix(&self) -> bool {
        self.platform_region_suffix
    }

    #[must_use]
    pub fn hyperscaler_region_suffix(&self) -> bool {
        self.hyperscaler_region_suffix
    }

    /// Number of wildcard region patterns (0..=2).
    #[must_use]
    pub fn wildcard_count(&self) -> u8 {
        self.wildcard_count
    }

    /// Number of literal region patterns (0..=2). Higher is more specific.
    #[must_use]
    pub fn specificity(&self) -> u8 {
        2 - self.wildcard_count
    }

    /// Uniqueness key: `plan(platformRegion,hyperscalerRegion)` with blank
    /// wildcards. Output directives do not take part.
    #[must_use]
    pub fn signature(&self) -> String {
        format!(
            "{}({},{})",
            self.plan,
            self.platform_region.literal().unwrap_or_default(),
            self.hyperscaler_region.literal().unwrap_or_default(),
        )
    }

    #[must_use]
    pub fn matches(&self, request: &ProvisioningAttributes) -> bool {
        self.plan == request.plan
            && self.platform_region.matches(&request.platform_region)
            && self.hyperscaler_region.matches(&request.hyperscaler_region)
    }

    /// Derive the label for a request this rule matched.
    pub fn result_for(&self, request: &ProvisioningAttributes) -> MatchResult {
        let mut hyperscaler_type = request.hyperscaler.clone();
        if self.platform_region_suffix {
            hyperscaler_type.push('_');
            hyperscaler_type.push_str(&request.platform_region);
        }
        if self.hyperscaler_region_suffix {
            hyperscaler_type.push('_');
            hyperscaler_type.push_str(&request.hyperscaler_region);
        }
        MatchResult::new(hyperscaler_type, self.eu_access, self.shared)
    }
}

impl fmt::Display for CompiledRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(PR={},HR={})",
            self.plan, self.platform_region, self.hyperscaler_region
        )?;
        match (self.shared, self.eu_access) {
            (true, true) => write!(f, "->S,EU"),
            (true, false) => write!(f, "->S"),
            (false, true) => write!(f, "->EU"),
            (false, false) => Ok(()),
        }
    }
}
