//! Session configuration.
//!
//! Configuration is plain data with defaults matching the stock screen: a
//! 50 m zone around (45.4, 51.3) watched at balanced accuracy every 10 m.
//! It can also be loaded from TOML:
//!
//! ```toml
//! platform = "android"
//!
//! [zone]
//! latitude = 45.4
//! longitude = 51.3
//! radius_m = 50.0
//!
//! [watch]
//! accuracy = "balanced"
//! min_distance_m = 10.0
//! ```
//!
//! Loading checks every rule and reports all violations together.

use crate::core::{Coordinate, GeofenceZone, DEFAULT_RADIUS_M, DEFAULT_TARGET};
use crate::feed::WatchOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub mod error;

pub use error::{ConfigError, ConfigViolation};

/// Host platform, which decides the permission prompt sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Android,
    Ios,
    Other,
}

impl Platform {
    /// Platform this crate was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "android") {
            Self::Android
        } else if cfg!(target_os = "ios") {
            Self::Ios
        } else {
            Self::Other
        }
    }

    /// Android needs an explicit foreground grant before background access
    /// can be requested; elsewhere the background prompt covers both.
    pub fn requires_foreground_prompt(self) -> bool {
        matches!(self, Self::Android)
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

/// Everything a session needs to know before it starts.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SessionConfig {
    pub zone: GeofenceZone,
    pub watch: WatchOptions,
    pub platform: Platform,
}

impl SessionConfig {
    pub fn new(zone: GeofenceZone) -> Self {
        Self {
            zone,
            ..Self::default()
        }
    }

    pub fn with_watch(mut self, watch: WatchOptions) -> Self {
        self.watch = watch;
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Parse and validate a TOML document. Missing sections take defaults.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(input)?;
        file.into_config()
    }

    /// Read, parse, and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_toml_str(&input)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    platform: Platform,
    zone: ZoneSettings,
    watch: WatchOptions,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ZoneSettings {
    latitude: f64,
    longitude: f64,
    radius_m: f64,
}

impl ZoneSettings {
    fn center(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

impl Default for ZoneSettings {
    fn default() -> Self {
        Self {
            latitude: DEFAULT_TARGET.latitude,
            longitude: DEFAULT_TARGET.longitude,
            radius_m: DEFAULT_RADIUS_M,
        }
    }
}

type Check = Validation<(), NonEmptyVec<ConfigViolation>>;

fn check(ok: bool, violation: ConfigViolation) -> Check {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(violation)
    }
}

impl ConfigFile {
    fn validate(&self) -> Check {
        let zone = &self.zone;
        let center = zone.center();
        let min_distance = self.watch.min_distance_m;
        let checks = vec![
            check(
                center.latitude_in_range(),
                ConfigViolation::LatitudeOutOfRange(zone.latitude),
            ),
            check(
                center.longitude_in_range(),
                ConfigViolation::LongitudeOutOfRange(zone.longitude),
            ),
            check(
                zone.radius_m.is_finite() && zone.radius_m > 0.0,
                ConfigViolation::InvalidRadius(zone.radius_m),
            ),
            check(
                min_distance.is_finite() && min_distance >= 0.0,
                ConfigViolation::InvalidMinDistance(min_distance),
            ),
        ];
        Validation::all_vec(checks).map(|_| ())
    }

    fn into_config(self) -> Result<SessionConfig, ConfigError> {
        if let Validation::Failure(errors) = self.validate() {
            return Err(ConfigError::Invalid {
                violations: errors.iter().cloned().collect(),
            });
        }

        let zone = GeofenceZone::new(self.zone.center(), self.zone.radius_m).map_err(|_| {
            ConfigError::Invalid {
                violations: vec![ConfigViolation::InvalidRadius(self.zone.radius_m)],
            }
        })?;

        Ok(SessionConfig {
            zone,
            watch: self.watch,
            platform: self.platform,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::AccuracyTier;

    #[test]
    fn defaults_match_the_stock_screen() {
        let config = SessionConfig::default();
        assert_eq!(config.zone.center(), Coordinate::new(45.4, 51.3));
        assert_eq!(config.zone.radius_m(), 50.0);
        assert_eq!(config.watch.accuracy, AccuracyTier::Balanced);
        assert_eq!(config.watch.min_distance_m, 10.0);
        assert_eq!(config.platform, Platform::current());
    }

    #[test]
    fn empty_document_yields_defaults() {
        let config = SessionConfig::from_toml_str("").unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn full_document_is_parsed() {
        let config = SessionConfig::from_toml_str(
            r#"
            platform = "ios"

            [zone]
            latitude = -33.8688
            longitude = 151.2093
            radius_m = 120.0

            [watch]
            accuracy = "high"
            min_distance_m = 5.0
            "#,
        )
        .unwrap();

        assert_eq!(config.platform, Platform::Ios);
        assert_eq!(config.zone.center(), Coordinate::new(-33.8688, 151.2093));
        assert_eq!(config.zone.radius_m(), 120.0);
        assert_eq!(config.watch.accuracy, AccuracyTier::High);
        assert_eq!(config.watch.min_distance_m, 5.0);
    }

    #[test]
    fn partial_watch_section_keeps_other_defaults() {
        let config = SessionConfig::from_toml_str("[watch]\nmin_distance_m = 25.0\n").unwrap();
        assert_eq!(config.watch.accuracy, AccuracyTier::Balanced);
        assert_eq!(config.watch.min_distance_m, 25.0);
    }

    #[test]
    fn all_violations_are_reported_together() {
        let result = SessionConfig::from_toml_str(
            r#"
            [zone]
            latitude = 91.0
            longitude = -200.0
            radius_m = 0.0

            [watch]
            min_distance_m = -1.0
            "#,
        );

        match result {
            Err(ConfigError::Invalid { violations }) => {
                assert_eq!(violations.len(), 4);
                assert!(violations.contains(&ConfigViolation::LatitudeOutOfRange(91.0)));
                assert!(violations.contains(&ConfigViolation::LongitudeOutOfRange(-200.0)));
                assert!(violations.contains(&ConfigViolation::InvalidRadius(0.0)));
                assert!(violations.contains(&ConfigViolation::InvalidMinDistance(-1.0)));
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn range_checks_flag_only_the_offending_component() {
        let result = SessionConfig::from_toml_str("[zone]\nlatitude = -90.5\nlongitude = 180.0\n");

        match result {
            Err(ConfigError::Invalid { violations }) => {
                assert_eq!(violations, vec![ConfigViolation::LatitudeOutOfRange(-90.5)]);
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn invalid_error_lists_each_violation() {
        let err = SessionConfig::from_toml_str("[zone]\nradius_m = -3.0\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: zone radius -3 must be finite and greater than zero"
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = SessionConfig::from_toml_str("[zone]\nradius = 50.0\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = SessionConfig::load("/nonexistent/geowatch.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn only_android_prompts_for_foreground() {
        assert!(Platform::Android.requires_foreground_prompt());
        assert!(!Platform::Ios.requires_foreground_prompt());
        assert!(!Platform::Other.requires_foreground_prompt());
    }

    #[test]
    fn builder_methods_override_fields() {
        let config = SessionConfig::default()
            .with_platform(Platform::Android)
            .with_watch(WatchOptions {
                accuracy: AccuracyTier::Low,
                min_distance_m: 50.0,
            });
        assert_eq!(config.platform, Platform::Android);
        assert_eq!(config.watch.accuracy, AccuracyTier::Low);
    }
}
