use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum valid latitude (WGS84)
pub const MIN_LAT: f64 = -90.0;

/// Maximum valid latitude (WGS84)
pub const MAX_LAT: f64 = 90.0;

/// Minimum valid longitude (WGS84)
pub const MIN_LNG: f64 = -180.0;

/// Maximum valid longitude (WGS84)
pub const MAX_LNG: f64 = 180.0;

/// A GeoJSON position: `[lng, lat]`, longitude first.
pub type Position = [f64; 2];

/// A geographic point in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a point without validating it.
    ///
    /// Use [`LatLng::try_new`] at trust boundaries.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Creates a point, rejecting non-finite or out-of-range coordinates.
    pub fn try_new(lat: f64, lng: f64) -> Result<Self, CoordError> {
        if !lat.is_finite() || !(MIN_LAT..=MAX_LAT).contains(&lat) {
            return Err(CoordError::InvalidLatitude(lat));
        }
        if !lng.is_finite() || !(MIN_LNG..=MAX_LNG).contains(&lng) {
            return Err(CoordError::InvalidLongitude(lng));
        }
        Ok(Self { lat, lng })
    }

    /// Returns the GeoJSON `[lng, lat]` position for this point.
    #[inline]
    pub fn to_position(self) -> Position {
        [self.lng, self.lat]
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// Errors for coordinate validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    #[error("invalid latitude {0}: must be a finite value between -90 and 90")]
    InvalidLatitude(f64),

    #[error("invalid longitude {0}: must be a finite value between -180 and 180")]
    InvalidLongitude(f64),
}
