use std::fmt;

use crate::parse::ParseError;

pub(crate) const WILDCARD: &str = "*";

/// Region attributes allowed inside the parenthesised input list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAttribute {
    PlatformRegion,
    HyperscalerRegion,
}

/// Directives allowed after `->`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputAttribute {
    EuAccess,
    Shared,
}

impl InputAttribute {
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            InputAttribute::PlatformRegion => "PR",
            InputAttribute::HyperscalerRegion => "HR",
        }
    }

    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "PR" => Some(InputAttribute::PlatformRegion),
            "HR" => Some(InputAttribute::HyperscalerRegion),
            _ => None,
        }
    }
}

impl OutputAttribute {
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            OutputAttribute::EuAccess => "EU",
            OutputAttribute::Shared => "S",
        }
    }

    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "EU" => Some(OutputAttribute::EuAccess),
            "S" => Some(OutputAttribute::Shared),
            _ => None,
        }
    }
}

/// Syntax tree of a single rule entry such as `azure(PR=westeurope,HR=*)->S,EU`.
///
/// A region given as `*` leaves the region unconstrained and turns on the
/// matching suffix flag, so the concrete region of the request is appended
/// to the produced hyperscaler type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRule {
    pub plan: String,
    pub platform_region: Option<String>,
    pub hyperscaler_region: Option<String>,
    pub eu_access: bool,
    pub shared: bool,
    pub platform_region_suffix: bool,
    pub hyperscaler_region_suffix: bool,
}

impl ParsedRule {
    /// Start a rule for `plan`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::EmptyValue`] if the plan is blank.
    pub fn new(plan: &str) -> Result<Self, ParseError> {
        let plan = plan.trim();
        if plan.is_empty() {
            return Err(ParseError::EmptyValue {
                attribute: "plan".into(),
            });
        }
        Ok(Self {
            plan: plan.to_owned(),
            ..Self::default()
        })
    }

    /// Set an input attribute, refusing to set the same attribute twice.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::DuplicateAttribute`] if the attribute was already
    /// set, or [`ParseError::EmptyValue`] if `value` is blank.
    pub fn set_input(&mut self, attribute: InputAttribute, value: &str) -> Result<(), ParseError> {
        if self.is_input_set(attribute) {
            return Err(ParseError::DuplicateAttribute {
                attribute: attribute.keyword().into(),
            });
        }
        let value = value.trim();
        if value.is_empty() {
            return Err(ParseError::EmptyValue {
                attribute: attribute.keyword().into(),
            });
        }
        self.assign_input(attribute, value);
        Ok(())
    }

    /// Set an output directive, refusing to set the same directive twice.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::DuplicateAttribute`] if the directive was already set.
    pub fn set_output(&mut self, attribute: OutputAttribute) -> Result<(), ParseError> {
        if self.is_output_set(attribute) {
            return Err(ParseError::DuplicateAttribute {
                attribute: attribute.keyword().into(),
            });
        }
        self.assign_output(attribute);
        Ok(())
    }

    /// Overwrite an input attribute without any checks. The last write wins.
    pub(crate) fn assign_input(&mut self, attribute: InputAttribute, value: &str) {
        let wildcard = value == WILDCARD;
        let region = (!wildcard).then(|| value.to_owned());
        match attribute {
            InputAttribute::PlatformRegion => {
                self.platform_region = region;
                self.platform_region_suffix = wildcard;
            }
            InputAttribute::HyperscalerRegion => {
                self.hyperscaler_region = region;
                self.hyperscaler_region_suffix = wildcard;
            }
        }
    }

    pub(crate) fn assign_output(&mut self, attribute: OutputAttribute) {
        match attribute {
            OutputAttribute::EuAccess => self.eu_access = true,
            OutputAttribute::Shared => self.shared = true,
        }
    }

    fn is_input_set(&self, attribute: InputAttribute) -> bool {
        match attribute {
            InputAttribute::PlatformRegion => {
                self.platform_region.is_some() || self.platform_region_suffix
            }
            InputAttribute::HyperscalerRegion => {
                self.hyperscaler_region.is_some() || self.hyperscaler_region_suffix
            }
        }
    }

    fn is_output_set(&self, attribute: OutputAttribute) -> bool {
        match attribute {
            OutputAttribute::EuAccess => self.eu_access,
            OutputAttribute::Shared => self.shared,
        }
    }

    fn input_text(&self, attribute: InputAttribute) -> Option<&str> {
        let (region, suffix) = match attribute {
            InputAttribute::PlatformRegion => {
                (&self.platform_region, self.platform_region_suffix)
            }
            InputAttribute::HyperscalerRegion => {
                (&self.hyperscaler_region, self.hyperscaler_region_suffix)
            }
        };
        match region {
            Some(value) => Some(value.as_str()),
            None if suffix => Some(WILDCARD),
            None => None,
        }
    }
}

impl fmt::Display for ParsedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.plan)?;

        let inputs: Vec<String> = [InputAttribute::PlatformRegion, InputAttribute::HyperscalerRegion]
            .into_iter()
            .filter_map(|attr| {
                self.input_text(attr)
                    .map(|value| format!("{}={value}", attr.keyword()))
            })
            .collect();
        if !inputs.is_empty() {
            write!(f, "({})", inputs.join(","))?;
        }

        let outputs: Vec<&str> = [OutputAttribute::Shared, OutputAttribute::EuAccess]
            .into_iter()
            .filter(|attr| self.is_output_set(*attr))
            .map(OutputAttribute::keyword)
            .collect();
        if !outputs.is_empty() {
            write!(f, "->{}", outputs.join(","))?;
        }
        Ok(())
    }
}
