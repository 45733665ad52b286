#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

/// The provisioning request a rule set is matched against.
///
/// `plan` and `hyperscaler` are always present in a well-formed request; the
/// regions default to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "camelCase", default))]
pub struct ProvisioningAttributes {
    pub plan: String,
    pub hyperscaler: String,
    pub platform_region: String,
    pub hyperscaler_region: String,
}

impl ProvisioningAttributes {
    #[must_use]
    pub fn new(plan: impl Into<String>, hyperscaler: impl Into<String>) -> Self {
        Self {
            plan: plan.into(),
            hyperscaler: hyperscaler.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn platform_region(mut self, region: impl Into<String>) -> Self {
        self.platform_region = region.into();
        self
    }

    #[must_use]
    pub fn hyperscaler_region(mut self, region: impl Into<String>) -> Self {
        self.hyperscaler_region = region.into();
        self
    }
}
