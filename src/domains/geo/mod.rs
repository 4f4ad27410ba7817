//! Great-circle primitives on WGS84 decimal degrees.
//!
//! Distances are straight-line haversine estimates, not road-network lengths.

use crate::common::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Anything that has a position in decimal degrees.
pub trait Coordinate {
    fn lat(&self) -> f64;
    fn lng(&self) -> f64;

    fn to_point(&self) -> GeoPoint {
        GeoPoint {
            lat: self.lat(),
            lng: self.lng(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> DomainResult<Self> {
        validate(lat, lng)?;
        Ok(Self { lat, lng })
    }
}

impl Coordinate for GeoPoint {
    fn lat(&self) -> f64 {
        self.lat
    }

    fn lng(&self) -> f64 {
        self.lng
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

pub(crate) fn validate(lat: f64, lng: f64) -> DomainResult<()> {
    // NaN fails both range checks
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(DomainError::InvalidCoordinate { lat, lng });
    }
    Ok(())
}

fn checked<C: Coordinate + ?Sized>(c: &C) -> DomainResult<(f64, f64)> {
    validate(c.lat(), c.lng())?;
    Ok((c.lat(), c.lng()))
}

/// Haversine distance in kilometers.
pub fn distance_km<A, B>(a: &A, b: &B) -> DomainResult<f64>
where
    A: Coordinate + ?Sized,
    B: Coordinate + ?Sized,
{
    let (lat1, lng1) = checked(a)?;
    let (lat2, lng2) = checked(b)?;

    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    Ok(EARTH_RADIUS_KM * c)
}

/// Initial compass bearing from `a` to `b` in `[0, 360)`.
pub fn bearing_degrees<A, B>(a: &A, b: &B) -> DomainResult<f64>
where
    A: Coordinate + ?Sized,
    B: Coordinate + ?Sized,
{
    let (lat1, lng1) = checked(a)?;
    let (lat2, lng2) = checked(b)?;
    if lat1 == lat2 && lng1 == lng2 {
        return Err(DomainError::DegenerateBearing);
    }

    let d_lng = (lng2 - lng1).to_radians();
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let y = d_lng.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lng.cos();

    let bearing = y.atan2(x).to_degrees().rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    Ok(if bearing >= 360.0 { 0.0 } else { bearing })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompassLabel {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl CompassLabel {
    const ALL: [CompassLabel; 8] = [
        CompassLabel::N,
        CompassLabel::NE,
        CompassLabel::E,
        CompassLabel::SE,
        CompassLabel::S,
        CompassLabel::SW,
        CompassLabel::W,
        CompassLabel::NW,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompassLabel::N => "north",
            CompassLabel::NE => "northeast",
            CompassLabel::E => "east",
            CompassLabel::SE => "southeast",
            CompassLabel::S => "south",
            CompassLabel::SW => "southwest",
            CompassLabel::W => "west",
            CompassLabel::NW => "northwest",
        }
    }
}

impl fmt::Display for CompassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 45°-wide buckets centered on the eight principal directions.
pub fn compass_label(bearing: f64) -> CompassLabel {
    let index = (bearing.rem_euclid(360.0) / 45.0).round() as usize % 8;
    CompassLabel::ALL[index]
}

/// `"850m"` below one kilometer, `"1.2km"` above.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{:.0}m", meters)
    } else {
        format!("{:.1}km", meters / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_zero_for_same_point() {
        let p = GeoPoint::new(-33.4489, -70.6693).unwrap();
        assert_eq!(distance_km(&p, &p).unwrap(), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = GeoPoint::new(0.0, 0.0).unwrap();
        let b = GeoPoint::new(1.0, 0.0).unwrap();
        let d = distance_km(&a, &b).unwrap();
        assert!((d - 111.195).abs() < 0.01, "got {}", d);
    }

    #[test]
    fn nan_is_rejected() {
        let bad = GeoPoint {
            lat: f64::NAN,
            lng: 0.0,
        };
        let ok = GeoPoint::new(0.0, 0.0).unwrap();
        assert!(matches!(
            distance_km(&bad, &ok),
            Err(DomainError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn cardinal_bearings() {
        let origin = GeoPoint::new(0.0, 0.0).unwrap();
        let north = GeoPoint::new(1.0, 0.0).unwrap();
        let east = GeoPoint::new(0.0, 1.0).unwrap();
        let south = GeoPoint::new(-1.0, 0.0).unwrap();
        let west = GeoPoint::new(0.0, -1.0).unwrap();

        assert!((bearing_degrees(&origin, &north).unwrap() - 0.0).abs() < 1e-9);
        assert!((bearing_degrees(&origin, &east).unwrap() - 90.0).abs() < 1e-9);
        assert!((bearing_degrees(&origin, &south).unwrap() - 180.0).abs() < 1e-9);
        assert!((bearing_degrees(&origin, &west).unwrap() - 270.0).abs() < 1e-9);
    }

    #[test]
    fn compass_bucket_edges() {
        assert_eq!(compass_label(0.0), CompassLabel::N);
        assert_eq!(compass_label(22.4), CompassLabel::N);
        assert_eq!(compass_label(22.5), CompassLabel::NE);
        assert_eq!(compass_label(337.6), CompassLabel::N);
        assert_eq!(compass_label(270.0), CompassLabel::W);
    }

    #[test]
    fn distance_text() {
        assert_eq!(format_distance(849.6), "850m");
        assert_eq!(format_distance(1234.0), "1.2km");
    }
}
