//! Geographic coordinates and timestamped location samples.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A point on the Earth's surface in decimal degrees.
///
/// Coordinates are plain values: nothing here checks that latitude lies in
/// -90..=90 or longitude in -180..=180. Distance math accepts any real input;
/// range checks belong to configuration loading (see [`crate::config`]).
///
/// # Example
///
/// ```rust
/// use geowatch::core::Coordinate;
///
/// let target = Coordinate::new(45.4, 51.3);
/// assert_eq!(target.latitude, 45.4);
/// assert_eq!(target.longitude, 51.3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Degrees north of the equator
    pub latitude: f64,
    /// Degrees east of the prime meridian
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Latitude lies in -90..=90. NaN is out of range.
    pub fn latitude_in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude)
    }

    /// Longitude lies in -180..=180. NaN is out of range.
    pub fn longitude_in_range(&self) -> bool {
        (-180.0..=180.0).contains(&self.longitude)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

/// One emission of the location feed.
///
/// Samples are consumed as soon as they arrive. The session keeps only the
/// most recent one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationSample {
    pub coordinate: Coordinate,
    pub captured_at: DateTime<Utc>,
}

impl LocationSample {
    pub fn new(coordinate: Coordinate, captured_at: DateTime<Utc>) -> Self {
        Self {
            coordinate,
            captured_at,
        }
    }

    /// Stamp a coordinate with the current time.
    pub fn now(coordinate: Coordinate) -> Self {
        Self::new(coordinate, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuple_conversion_keeps_order() {
        let coordinate = Coordinate::from((12.5, -70.25));
        assert_eq!(coordinate.latitude, 12.5);
        assert_eq!(coordinate.longitude, -70.25);
    }

    #[test]
    fn range_checks_accept_extremes() {
        let north_east = Coordinate::new(90.0, 180.0);
        let south_west = Coordinate::new(-90.0, -180.0);
        assert!(north_east.latitude_in_range() && north_east.longitude_in_range());
        assert!(south_west.latitude_in_range() && south_west.longitude_in_range());
    }

    #[test]
    fn range_checks_are_per_component() {
        let past_pole = Coordinate::new(90.5, 0.0);
        assert!(!past_pole.latitude_in_range());
        assert!(past_pole.longitude_in_range());

        let past_antimeridian = Coordinate::new(0.0, -180.5);
        assert!(past_antimeridian.latitude_in_range());
        assert!(!past_antimeridian.longitude_in_range());

        assert!(!Coordinate::new(f64::NAN, 0.0).latitude_in_range());
        assert!(!Coordinate::new(0.0, f64::NAN).longitude_in_range());
    }

    #[test]
    fn coordinate_serializes_with_named_fields() {
        let json = serde_json::to_string(&Coordinate::new(45.4, 51.3)).unwrap();
        assert_eq!(json, r#"{"latitude":45.4,"longitude":51.3}"#);
    }

    #[test]
    fn sample_now_uses_current_time() {
        let before = Utc::now();
        let sample = LocationSample::now(Coordinate::new(1.0, 2.0));
        assert!(sample.captured_at >= before);
        assert_eq!(sample.coordinate, Coordinate::new(1.0, 2.0));
    }
}
