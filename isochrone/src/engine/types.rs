//! Result types shared by the engines.

use serde::Serialize;

use crate::coord::{self, LatLng, Position};
use crate::mode::TravelMode;
use crate::provider::RouteOption;

/// Which engine produced the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    Heuristic,
    Sampled,
}

/// Outcome of probing one bearing.
///
/// The optional fields are present only when the provider returned a usable
/// route; otherwise `point` is the raw probe destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleResult {
    pub bearing: f64,
    pub point: Position,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_time_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_m: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toll_fare: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_price: Option<f64>,
}

impl SampleResult {
    /// A sample for a bearing with no usable route.
    pub fn unrouted(bearing: f64, point: Position) -> Self {
        Self {
            bearing,
            point,
            travel_time_ms: None,
            distance_m: None,
            toll_fare: None,
            fuel_price: None,
        }
    }

    /// Whether the provider returned a route for this bearing.
    pub fn is_routed(&self) -> bool {
        self.travel_time_ms.is_some()
    }

    /// Whether the point is a finite, in-range WGS84 position.
    pub fn is_valid(&self) -> bool {
        coord::is_valid_position(&self.point)
    }
}

/// Everything the radial sampler learned about one request.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledIsochrone {
    /// One sample per bearing, in bearing order.
    pub samples: Vec<SampleResult>,
    /// Samples whose point is a valid position.
    pub valid_count: usize,
    /// `valid_count / BEARING_COUNT`.
    pub confidence: f64,
    /// Samples the provider actually routed.
    pub routed_count: usize,
    /// Probes that failed (error, timeout, panic).
    pub failed_count: usize,
    /// Distance at which every bearing was probed.
    pub probe_radius_meters: f64,
}

impl SampledIsochrone {
    /// Valid sample points in bearing order (not yet closed).
    pub fn valid_points(&self) -> Vec<Position> {
        self.samples
            .iter()
            .filter(|s| s.is_valid())
            .map(|s| s.point)
            .collect()
    }
}

/// Metadata attached to an isochrone polygon.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IsochroneProperties {
    pub center: LatLng,
    pub time_minutes: f64,
    pub mode: TravelMode,
    pub engine: EngineKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_meters: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub samples: Option<Vec<SampleResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option: Option<RouteOption>,
}

impl IsochroneProperties {
    /// Properties with only the request echo and engine tag.
    pub fn new(center: LatLng, time_minutes: f64, mode: TravelMode, engine: EngineKind) -> Self {
        Self {
            center,
            time_minutes,
            mode,
            engine,
            radius_meters: None,
            confidence: None,
            samples: None,
            reason: None,
            option: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// A closed ring plus its properties.
///
/// Serialises as a GeoJSON `Feature` with a single-ring `Polygon` geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct IsochroneResult {
    pub ring: Vec<Position>,
    pub properties: IsochroneProperties,
}

impl IsochroneResult {
    pub fn engine(&self) -> EngineKind {
        self.properties.engine
    }

    pub fn radius_meters(&self) -> Option<f64> {
        self.properties.radius_meters
    }

    pub fn reason(&self) -> Option<&str> {
        self.properties.reason.as_deref()
    }
}
