//! Property-based tests for distance math and membership.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use geowatch::config::{Platform, SessionConfig};
use geowatch::core::{
    destination, distance, is_within_zone, Coordinate, GeofenceZone, LocationSample,
    EARTH_RADIUS_KM,
};
use geowatch::feed::ChannelFeed;
use geowatch::session::SessionController;
use proptest::prelude::*;

prop_compose! {
    fn arbitrary_coordinate()(latitude in -89.0..89.0f64, longitude in -179.0..179.0f64) -> Coordinate {
        Coordinate::new(latitude, longitude)
    }
}

prop_compose! {
    fn arbitrary_zone()(center in arbitrary_coordinate(), radius_m in 1.0..5_000.0f64) -> GeofenceZone {
        GeofenceZone::new(center, radius_m).unwrap()
    }
}

proptest! {
    #[test]
    fn distance_to_self_is_zero(point in arbitrary_coordinate()) {
        prop_assert!(distance(point, point).abs() < 1e-6);
    }

    #[test]
    fn distance_is_symmetric(a in arbitrary_coordinate(), b in arbitrary_coordinate()) {
        let ab = distance(a, b);
        let ba = distance(b, a);
        prop_assert!((ab - ba).abs() <= 1e-9 * ab.max(1.0));
    }

    #[test]
    fn distance_is_bounded_by_half_circumference(a in arbitrary_coordinate(), b in arbitrary_coordinate()) {
        let d = distance(a, b);
        let half = std::f64::consts::PI * EARTH_RADIUS_KM * 1000.0;
        prop_assert!(d >= 0.0);
        prop_assert!(d <= half + 1e-6);
    }

    #[test]
    fn distance_obeys_triangle_inequality(
        a in arbitrary_coordinate(),
        b in arbitrary_coordinate(),
        c in arbitrary_coordinate(),
    ) {
        prop_assert!(distance(a, c) <= distance(a, b) + distance(b, c) + 1e-3);
    }

    #[test]
    fn destination_is_measured_back(
        start in arbitrary_coordinate(),
        bearing in 0.0..360.0f64,
        meters in 0.0..100_000.0f64,
    ) {
        let end = destination(start, bearing, meters);
        prop_assert!((distance(start, end) - meters).abs() < 1e-3);
    }

    #[test]
    fn destination_never_overshoots(
        start in arbitrary_coordinate(),
        bearing in 0.0..360.0f64,
        meters in 0.0..100_000.0f64,
    ) {
        let end = destination(start, bearing, meters);
        prop_assert!(distance(start, end) <= meters);
    }

    #[test]
    fn point_on_the_radius_is_a_member(
        zone in arbitrary_zone(),
        bearing in 0.0..360.0f64,
    ) {
        let edge = destination(zone.center(), bearing, zone.radius_m());
        prop_assert!(is_within_zone(edge, &zone));
    }

    #[test]
    fn points_well_inside_are_members(
        zone in arbitrary_zone(),
        bearing in 0.0..360.0f64,
        fraction in 0.0..0.99f64,
    ) {
        let point = destination(zone.center(), bearing, zone.radius_m() * fraction);
        prop_assert!(is_within_zone(point, &zone));
    }

    #[test]
    fn points_well_outside_are_not_members(
        zone in arbitrary_zone(),
        bearing in 0.0..360.0f64,
        factor in 1.01..10.0f64,
    ) {
        let point = destination(zone.center(), bearing, zone.radius_m() * factor);
        prop_assert!(!is_within_zone(point, &zone));
    }

    #[test]
    fn contains_agrees_with_evaluate(zone in arbitrary_zone(), point in arbitrary_coordinate()) {
        let membership = zone.evaluate(point);
        prop_assert_eq!(zone.contains(point), membership.within);
        prop_assert_eq!(membership.within, membership.distance_m <= zone.radius_m());
    }

    #[test]
    fn latest_sample_always_wins(
        steps in prop::collection::vec((any::<bool>(), 0.0..360.0f64), 1..30)
    ) {
        let zone = GeofenceZone::new(Coordinate::new(45.4, 51.3), 50.0).unwrap();
        let (feed, _sender) = ChannelFeed::new(Some(zone.center()));
        let config = SessionConfig::new(zone).with_platform(Platform::Other);
        let mut session = SessionController::new(feed, config);

        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        runtime.block_on(session.start()).unwrap();

        for (inside, bearing) in steps {
            let meters = if inside { 10.0 } else { 500.0 };
            let point = destination(zone.center(), bearing, meters);
            session.handle_sample(LocationSample::now(point));

            prop_assert_eq!(session.is_within(), inside);
            prop_assert_eq!(session.render().is_within, inside);
            prop_assert_eq!(session.render().current_position, Some(point));
        }
    }
}
