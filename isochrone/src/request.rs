//! Inbound request validation.
//!
//! The engine trusts its inputs. Everything that arrives from outside (CLI
//! flags, a JSON document, an HTTP body) is checked here first and rejected
//! with a message naming the violated constraint.
//!
//! ```
//! use isochrone::request::IsochroneRequest;
//! use isochrone::TravelMode;
//!
//! let request = IsochroneRequest::from_json(
//!     r#"{"center":{"lat":37.5665,"lng":126.9784},"time":15,"mode":"walking"}"#,
//! )
//! .unwrap();
//! assert_eq!(request.mode, TravelMode::Walking);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coord::{self, CoordError, LatLng};
use crate::mode::TravelMode;

/// Shortest accepted duration, in minutes.
pub const MIN_TIME_MINUTES: f64 = 1.0;

/// Longest accepted duration, in minutes.
pub const MAX_TIME_MINUTES: f64 = 120.0;

/// Rough bounding box of the Korean peninsula.
const KOREA_LAT_MIN: f64 = 33.0;
const KOREA_LAT_MAX: f64 = 43.0;
const KOREA_LNG_MIN: f64 = 124.0;
const KOREA_LNG_MAX: f64 = 132.0;

/// Errors raised while validating an inbound request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("malformed request: {0}")]
    Malformed(String),

    #[error("center (lat, lng) is required")]
    MissingCenter,

    #[error("invalid center: {0}")]
    InvalidCoordinates(#[from] CoordError),

    #[error("time is required")]
    MissingTime,

    #[error("time must be a finite number of minutes between 1 and 120, got {0}")]
    InvalidTime(f64),

    #[error("mode is required")]
    MissingMode,

    #[error("mode must be one of walking|driving|transit, got '{0}'")]
    InvalidMode(String),
}

/// Request shape as received, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawIsochroneRequest {
    pub center: Option<RawCenter>,
    pub time: Option<f64>,
    pub mode: Option<String>,
}

/// Center as received, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCenter {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl RawIsochroneRequest {
    /// Checks every field and produces a request the engine can trust.
    pub fn validate(self) -> Result<IsochroneRequest, ValidationError> {
        let center = self.center.ok_or(ValidationError::MissingCenter)?;
        let (lat, lng) = match (center.lat, center.lng) {
            (Some(lat), Some(lng)) => (lat, lng),
            _ => return Err(ValidationError::MissingCenter),
        };
        let time = self.time.ok_or(ValidationError::MissingTime)?;
        let mode = self.mode.ok_or(ValidationError::MissingMode)?;
        let mode = mode
            .parse::<TravelMode>()
            .map_err(|e| ValidationError::InvalidMode(e.0))?;

        IsochroneRequest::new(LatLng::new(lat, lng), time, mode)
    }
}

/// A validated request: center in bounds, time in range, known mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IsochroneRequest {
    pub center: LatLng,
    #[serde(rename = "time")]
    pub time_minutes: f64,
    pub mode: TravelMode,
}

impl IsochroneRequest {
    /// Validates the fields and builds a request.
    pub fn new(
        center: LatLng,
        time_minutes: f64,
        mode: TravelMode,
    ) -> Result<Self, ValidationError> {
        let center = LatLng::try_new(center.lat, center.lng)?;
        if !time_minutes.is_finite()
            || !(MIN_TIME_MINUTES..=MAX_TIME_MINUTES).contains(&time_minutes)
        {
            return Err(ValidationError::InvalidTime(time_minutes));
        }
        Ok(Self {
            center,
            time_minutes,
            mode,
        })
    }

    /// Parses and validates a JSON request body.
    pub fn from_json(body: &str) -> Result<Self, ValidationError> {
        let raw: RawIsochroneRequest =
            serde_json::from_str(body).map_err(|e| ValidationError::Malformed(e.to_string()))?;
        raw.validate()
    }
}

/// Clamps latitude and wraps longitude into WGS84 range.
///
/// Useful for map clicks that arrive after the viewport has wrapped around
/// the antimeridian.
pub fn normalize_coordinates(lat: f64, lng: f64) -> LatLng {
    coord::normalize_position(lat, lng)
}

/// Returns true if the point falls inside the Korean peninsula's bounding box.
pub fn is_korean_coordinate(lat: f64, lng: f64) -> bool {
    (KOREA_LAT_MIN..=KOREA_LAT_MAX).contains(&lat) && (KOREA_LNG_MIN..=KOREA_LNG_MAX).contains(&lng)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(lat: f64, lng: f64, time: f64, mode: &str) -> String {
        format!(
            r#"{{"center":{{"lat":{},"lng":{}}},"time":{},"mode":"{}"}}"#,
            lat, lng, time, mode
        )
    }

    #[test]
    fn test_valid_request() {
        let request =
            IsochroneRequest::from_json(&body(37.5665, 126.9784, 15.0, "walking")).unwrap();
        assert_eq!(request.center, LatLng::new(37.5665, 126.9784));
        assert_eq!(request.time_minutes, 15.0);
        assert_eq!(request.mode, TravelMode::Walking);
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let err =
            IsochroneRequest::from_json(&body(37.5665, 126.9784, 15.0, "cycling")).unwrap_err();
        assert_eq!(err, ValidationError::InvalidMode("cycling".to_string()));
        assert!(err.to_string().contains("walking|driving|transit"));
    }

    #[test]
    fn test_time_bounds() {
        assert!(IsochroneRequest::from_json(&body(0.0, 0.0, 1.0, "driving")).is_ok());
        assert!(IsochroneRequest::from_json(&body(0.0, 0.0, 120.0, "driving")).is_ok());
        assert_eq!(
            IsochroneRequest::from_json(&body(0.0, 0.0, 0.0, "driving")).unwrap_err(),
            ValidationError::InvalidTime(0.0)
        );
        assert_eq!(
            IsochroneRequest::from_json(&body(0.0, 0.0, 121.0, "driving")).unwrap_err(),
            ValidationError::InvalidTime(121.0)
        );
    }

    #[test]
    fn test_non_finite_time_rejected() {
        let err = IsochroneRequest::new(LatLng::new(0.0, 0.0), f64::NAN, TravelMode::Walking);
        assert!(matches!(err, Err(ValidationError::InvalidTime(_))));
    }

    #[test]
    fn test_out_of_range_center_rejected() {
        let err = IsochroneRequest::from_json(&body(91.0, 0.0, 10.0, "walking")).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidCoordinates(CoordError::InvalidLatitude(_))
        ));
        assert!(err.to_string().contains("latitude"));

        let err = IsochroneRequest::from_json(&body(0.0, -180.5, 10.0, "walking")).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidCoordinates(CoordError::InvalidLongitude(_))
        ));
    }

    #[test]
    fn test_non_finite_center_rejected() {
        let err = IsochroneRequest::new(LatLng::new(f64::NAN, 0.0), 10.0, TravelMode::Walking)
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidCoordinates(CoordError::InvalidLatitude(_))
        ));
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            IsochroneRequest::from_json(r#"{"time":10,"mode":"walking"}"#).unwrap_err(),
            ValidationError::MissingCenter
        );
        assert_eq!(
            IsochroneRequest::from_json(r#"{"center":{"lat":1},"time":10,"mode":"walking"}"#)
                .unwrap_err(),
            ValidationError::MissingCenter
        );
        assert_eq!(
            IsochroneRequest::from_json(r#"{"center":{"lat":1,"lng":2},"mode":"walking"}"#)
                .unwrap_err(),
            ValidationError::MissingTime
        );
        assert_eq!(
            IsochroneRequest::from_json(r#"{"center":{"lat":1,"lng":2},"time":10}"#).unwrap_err(),
            ValidationError::MissingMode
        );
    }

    #[test]
    fn test_wrong_types_are_malformed() {
        let body = r#"{"center":{"lat":"37","lng":127},"time":10,"mode":"walking"}"#;
        let err = IsochroneRequest::from_json(body).unwrap_err();
        assert!(matches!(err, ValidationError::Malformed(_)));

        let err = IsochroneRequest::from_json("not json").unwrap_err();
        assert!(matches!(err, ValidationError::Malformed(_)));
    }

    #[test]
    fn test_normalize_coordinates() {
        let p = normalize_coordinates(95.0, 200.0);
        assert_eq!(p.lat, 90.0);
        assert!((p.lng - (-160.0)).abs() < 1e-9);

        assert_eq!(normalize_coordinates(37.0, 127.0), LatLng::new(37.0, 127.0));
    }

    #[test]
    fn test_is_korean_coordinate() {
        assert!(is_korean_coordinate(37.5665, 126.9784)); // Seoul
        assert!(is_korean_coordinate(35.1796, 129.0756)); // Busan
        assert!(!is_korean_coordinate(35.6762, 139.6503)); // Tokyo
        assert!(!is_korean_coordinate(40.7128, -74.0060)); // New York
    }
}
