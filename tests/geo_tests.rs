use giro_route::domains::geo::*;
use giro_route::DomainError;

#[test]
fn one_degree_of_longitude_on_the_equator() {
    let a = GeoPoint::new(0.0, 0.0).unwrap();
    let b = GeoPoint::new(0.0, 1.0).unwrap();
    let expected = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;
    assert!((distance_km(&a, &b).unwrap() - expected).abs() < 1e-9);
}

#[test]
fn distance_is_symmetric() {
    let santiago = GeoPoint::new(-33.4489, -70.6693).unwrap();
    let other = GeoPoint::new(-33.5, -70.70).unwrap();
    let there = distance_km(&santiago, &other).unwrap();
    let back = distance_km(&other, &santiago).unwrap();
    assert!((there - back).abs() < 1e-12);
    assert!(there > 6.0 && there < 7.0, "got {}", there);
}

#[test]
fn cardinal_bearings() {
    let origin = GeoPoint::new(0.0, 0.0).unwrap();
    let north = GeoPoint::new(1.0, 0.0).unwrap();
    let east = GeoPoint::new(0.0, 1.0).unwrap();
    let south = GeoPoint::new(-1.0, 0.0).unwrap();
    let west = GeoPoint::new(0.0, -1.0).unwrap();

    assert!(bearing_degrees(&origin, &north).unwrap().abs() < 1e-9);
    assert!((bearing_degrees(&origin, &east).unwrap() - 90.0).abs() < 1e-9);
    assert!((bearing_degrees(&origin, &south).unwrap() - 180.0).abs() < 1e-9);
    assert!((bearing_degrees(&origin, &west).unwrap() - 270.0).abs() < 1e-9);
}

#[test]
fn bearing_between_equal_points_is_rejected() {
    let p = GeoPoint::new(-33.45, -70.66).unwrap();
    assert_eq!(bearing_degrees(&p, &p), Err(DomainError::DegenerateBearing));
}

#[test]
fn compass_buckets_round_to_nearest_direction() {
    assert_eq!(compass_label(0.0), CompassLabel::N);
    assert_eq!(compass_label(22.4), CompassLabel::N);
    assert_eq!(compass_label(22.6), CompassLabel::NE);
    assert_eq!(compass_label(90.0), CompassLabel::E);
    assert_eq!(compass_label(200.0), CompassLabel::S);
    assert_eq!(compass_label(337.4), CompassLabel::NW);
    assert_eq!(compass_label(359.0), CompassLabel::N);
    assert_eq!(CompassLabel::SW.to_string(), "southwest");
}

#[test]
fn out_of_range_coordinates_fail() {
    assert!(matches!(
        GeoPoint::new(90.5, 0.0),
        Err(DomainError::InvalidCoordinate { .. })
    ));
    assert!(GeoPoint::new(0.0, -180.5).is_err());
    assert!(GeoPoint::new(f64::NAN, 0.0).is_err());

    // unchecked construction is still validated at use
    let bad = GeoPoint { lat: 120.0, lng: 0.0 };
    let ok = GeoPoint::new(0.0, 0.0).unwrap();
    assert!(distance_km(&bad, &ok).is_err());
}

#[test]
fn distance_labels() {
    assert_eq!(format_distance(850.0), "850m");
    assert_eq!(format_distance(42.4), "42m");
    assert_eq!(format_distance(1234.0), "1.2km");
}
