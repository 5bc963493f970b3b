//! Coordinate math module
//!
//! Provides meters↔degrees conversions and destination-point offsets on a
//! spherical Earth. Both the heuristic engine and the radial sampler go
//! through these functions, so there is exactly one Earth-radius constant in
//! the crate.
//!
//! # Precision
//!
//! Offsets use a planar equirectangular approximation:
//!
//! ```text
//! dx = distance · cos(bearing)      (east)
//! dy = distance · sin(bearing)      (north)
//! lat' = lat + dy / METERS_PER_DEGREE
//! lng' = lng + dx / (METERS_PER_DEGREE · cos(lat))
//! ```
//!
//! This is accurate to well under a percent for the tens of kilometers an
//! isochrone spans. It is not a great-circle calculation and drifts for very
//! long distances or close to the poles.

mod types;

pub use types::{CoordError, LatLng, Position, MAX_LAT, MAX_LNG, MIN_LAT, MIN_LNG};

use std::f64::consts::PI;

/// Earth radius in meters (WGS84 semi-major axis).
pub const EARTH_RADIUS_METERS: f64 = 6_378_137.0;

/// Meters spanned by one degree of latitude (≈ 111 319.49 m).
pub const METERS_PER_DEGREE: f64 = EARTH_RADIUS_METERS * PI / 180.0;

/// Lower bound for `cos(latitude)` in longitude conversions.
///
/// At the poles the cosine reaches zero and a meter offset corresponds to an
/// unbounded longitude span. Flooring the cosine keeps the result finite; the
/// resulting longitude is then wrapped back into range by
/// [`normalize_position`].
pub const MIN_COS_LATITUDE: f64 = 1e-6;

/// Converts a north/south distance in meters to degrees of latitude.
#[inline]
pub fn meters_to_lat_degrees(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE
}

/// Converts an east/west distance in meters to degrees of longitude at the
/// given latitude.
#[inline]
pub fn meters_to_lng_degrees(meters: f64, at_lat: f64) -> f64 {
    meters / (METERS_PER_DEGREE * cos_latitude(at_lat))
}

#[inline]
fn cos_latitude(lat: f64) -> f64 {
    lat.to_radians().cos().abs().max(MIN_COS_LATITUDE)
}

/// Offsets `center` by `dx` meters east and `dy` meters north.
///
/// The result is normalised into WGS84 bounds.
#[inline]
pub fn offset_meters(center: LatLng, dx: f64, dy: f64) -> LatLng {
    normalize_position(
        center.lat + meters_to_lat_degrees(dy),
        center.lng + meters_to_lng_degrees(dx, center.lat),
    )
}

/// Returns the point `distance_m` meters from `center` along `bearing_deg`.
///
/// Bearing 0 points east and angles grow counter-clockwise, which is the
/// same angular convention the heuristic ring uses. Rings produced by either
/// engine therefore start east and wind counter-clockwise, as GeoJSON
/// expects for exterior rings.
#[inline]
pub fn destination_from(center: LatLng, bearing_deg: f64, distance_m: f64) -> LatLng {
    let rad = bearing_deg * PI / 180.0;
    offset_meters(center, distance_m * rad.cos(), distance_m * rad.sin())
}

/// Clamps latitude to [-90, 90] and wraps longitude into [-180, 180].
///
/// Coordinates already in range are returned bit-for-bit unchanged.
/// Non-finite input stays non-finite so that validity checks can reject it.
pub fn normalize_position(lat: f64, lng: f64) -> LatLng {
    let lat = lat.clamp(MIN_LAT, MAX_LAT);
    let lng = if !lng.is_finite() || (MIN_LNG..=MAX_LNG).contains(&lng) {
        lng
    } else {
        (lng + 180.0).rem_euclid(360.0) - 180.0
    };
    LatLng { lat, lng }
}

/// Returns true if both coordinates are finite and within WGS84 bounds.
#[inline]
pub fn is_valid_lat_lng(lat: f64, lng: f64) -> bool {
    lat.is_finite()
        && lng.is_finite()
        && (MIN_LAT..=MAX_LAT).contains(&lat)
        && (MIN_LNG..=MAX_LNG).contains(&lng)
}

/// Returns true if a `[lng, lat]` position is a valid WGS84 point.
#[inline]
pub fn is_valid_position(position: &Position) -> bool {
    is_valid_lat_lng(position[1], position[0])
}
