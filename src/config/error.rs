//! Configuration error types.

use thiserror::Error;

/// A single rule broken by a configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("zone latitude {0} is outside -90..=90")]
    LatitudeOutOfRange(f64),

    #[error("zone longitude {0} is outside -180..=180")]
    LongitudeOutOfRange(f64),

    #[error("zone radius {0} must be finite and greater than zero")]
    InvalidRadius(f64),

    #[error("minimum reporting distance {0} must be finite and not negative")]
    InvalidMinDistance(f64),
}

/// Errors that can occur while loading a [`SessionConfig`](super::SessionConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Every violated rule, not just the first
    #[error("Invalid configuration: {}", join_violations(.violations))]
    Invalid { violations: Vec<ConfigViolation> },
}

fn join_violations(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
