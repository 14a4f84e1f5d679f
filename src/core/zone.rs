//! Circular geofence zones and membership evaluation.

use super::coordinate::Coordinate;
use super::distance::distance;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Target used when no zone is configured.
pub const DEFAULT_TARGET: Coordinate = Coordinate::new(45.4, 51.3);

/// Radius in meters used when no zone is configured.
pub const DEFAULT_RADIUS_M: f64 = 50.0;

/// Errors raised when constructing a [`GeofenceZone`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ZoneError {
    #[error("Zone radius must be a finite number of meters greater than zero (got {0})")]
    InvalidRadius(f64),
}

/// An immutable circular zone: a center and a radius in meters.
///
/// Built once per session and passed by reference to the evaluator.
///
/// # Example
///
/// ```rust
/// use geowatch::core::{Coordinate, GeofenceZone};
///
/// let zone = GeofenceZone::new(Coordinate::new(45.4, 51.3), 50.0).unwrap();
/// assert!(zone.contains(Coordinate::new(45.4, 51.3)));
/// assert!(!zone.contains(Coordinate::new(45.409, 51.3)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawZone")]
pub struct GeofenceZone {
    center: Coordinate,
    radius_m: f64,
}

#[derive(Deserialize)]
struct RawZone {
    center: Coordinate,
    radius_m: f64,
}

impl TryFrom<RawZone> for GeofenceZone {
    type Error = ZoneError;

    fn try_from(raw: RawZone) -> Result<Self, Self::Error> {
        Self::new(raw.center, raw.radius_m)
    }
}

impl GeofenceZone {
    /// Create a zone, rejecting radii that are not finite and positive.
    pub fn new(center: Coordinate, radius_m: f64) -> Result<Self, ZoneError> {
        if !radius_m.is_finite() || radius_m <= 0.0 {
            return Err(ZoneError::InvalidRadius(radius_m));
        }
        Ok(Self { center, radius_m })
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    /// Membership test; the boundary counts as inside.
    pub fn contains(&self, point: Coordinate) -> bool {
        is_within_zone(point, self)
    }

    /// Distance to the center along with the membership flag.
    pub fn evaluate(&self, point: Coordinate) -> Membership {
        let distance_m = distance(point, self.center);
        Membership {
            within: distance_m <= self.radius_m,
            distance_m,
        }
    }
}

impl Default for GeofenceZone {
    fn default() -> Self {
        Self {
            center: DEFAULT_TARGET,
            radius_m: DEFAULT_RADIUS_M,
        }
    }
}

/// Result of evaluating one point against a zone.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    pub within: bool,
    /// Great-circle distance from the point to the zone center
    pub distance_m: f64,
}

/// True if and only if `point` lies at most `zone.radius_m()` meters from the
/// zone center.
pub fn is_within_zone(point: Coordinate, zone: &GeofenceZone) -> bool {
    distance(point, zone.center) <= zone.radius_m
}
