use thiserror::Error;

use crate::ConfigError;

/// Unified error type covering configuration, I/O and YAML failures.
///
/// Returned by [`RuleServiceBuilder::load_yaml()`](crate::RuleServiceBuilder::load_yaml)
/// and [`RuleServiceBuilder::load_file()`](crate::RuleServiceBuilder::load_file).
#[derive(Debug, Error)]
pub enum HapError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "config")]
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}
