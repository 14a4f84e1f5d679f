//! Great-circle math on a spherical Earth.
//!
//! Both functions use the same mean radius so that projecting a point with
//! [`destination`] and measuring it back with [`distance`] agree to within
//! floating-point error.

use super::coordinate::Coordinate;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

const METERS_PER_KM: f64 = 1000.0;

/// Great-circle distance between two points in meters (haversine formula).
///
/// Inputs are not range-checked. The result is non-negative for any finite
/// input and approximately zero for identical points.
///
/// # Example
///
/// ```rust
/// use geowatch::core::{distance, Coordinate};
///
/// // One degree of longitude along the equator
/// let d = distance(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
/// assert!((d - 111_195.0).abs() < 1_112.0);
/// ```
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair outside [0, 1] for antipodal points.
    let h = h.clamp(0.0, 1.0);
    let central_angle = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * central_angle * METERS_PER_KM
}

/// Point reached by travelling `distance_m` meters from `start` along the
/// initial bearing `bearing_deg` (0 = north, 90 = east).
///
/// Longitude is normalized to -180..=180. The result never measures farther
/// than `distance_m` from `start` under [`distance`], so a point projected onto
/// a zone's radius is inside that zone.
///
/// # Example
///
/// ```rust
/// use geowatch::core::{destination, distance, Coordinate};
///
/// let center = Coordinate::new(45.4, 51.3);
/// let edge = destination(center, 0.0, 50.0);
/// assert!(distance(center, edge) <= 50.0);
/// assert!((distance(center, edge) - 50.0).abs() < 1e-6);
/// assert!(edge.latitude > center.latitude);
/// ```
pub fn destination(start: Coordinate, bearing_deg: f64, distance_m: f64) -> Coordinate {
    let lat1 = start.latitude.to_radians();
    let lon1 = start.longitude.to_radians();
    let bearing = bearing_deg.to_radians();
    let angular = distance_m / (EARTH_RADIUS_KM * METERS_PER_KM);

    let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos()).asin();
    let lon2 = lon1
        + (bearing.sin() * angular.sin() * lat1.cos()).atan2(angular.cos() - lat1.sin() * lat2.sin());

    let mut longitude = lon2.to_degrees();
    if longitude > 180.0 {
        longitude -= 360.0;
    } else if longitude < -180.0 {
        longitude += 360.0;
    }

    pull_back(start, Coordinate::new(lat2.to_degrees(), longitude), distance_m)
}

/// Upper bound on single-ULP corrections; rounding error is a handful of ULPs
/// for any distance short of the antipode.
const MAX_PULL_BACK_STEPS: usize = 4096;

/// Nudges `end` toward `start` until [`distance`] no longer reports it past
/// `distance_m`, so a point projected onto a zone's radius measures as inside.
fn pull_back(start: Coordinate, mut end: Coordinate, distance_m: f64) -> Coordinate {
    if !distance_m.is_finite() || distance_m < 0.0 {
        return end;
    }

    // Once the result has wrapped across the antimeridian, the short way back
    // is toward the start's longitude shifted by a full turn.
    let toward_longitude = match end.longitude - start.longitude {
        delta if delta > 180.0 => start.longitude + 360.0,
        delta if delta < -180.0 => start.longitude - 360.0,
        _ => start.longitude,
    };

    for _ in 0..MAX_PULL_BACK_STEPS {
        let measured = distance(start, end).max(distance(end, start));
        if measured <= distance_m || end == start {
            break;
        }
        end.latitude = step_toward(end.latitude, start.latitude);
        end.longitude = step_toward(end.longitude, toward_longitude);
    }

    end
}

/// The adjacent `f64` from `from` in the direction of `to`.
fn step_toward(from: f64, to: f64) -> f64 {
    if from == to || from.is_nan() || to.is_nan() {
        return from;
    }
    if from == 0.0 {
        let smallest = f64::from_bits(1);
        return if to > 0.0 { smallest } else { -smallest };
    }
    let bits = from.to_bits();
    // Away from zero is bits + 1 for either sign.
    if (to > from) == (from > 0.0) {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}
