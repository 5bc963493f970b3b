//! Heuristic circular isochrone.
//!
//! Draws a regular polygon around the center with a radius of
//! `time × speed(mode)`, floored at [`HEURISTIC_RADIUS_FLOOR_M`]. This path
//! needs no network access and never fails, which is why the fallback policy
//! degrades to it.

use std::f64::consts::PI;

use super::constants::{DEFAULT_POINT_COUNT, HEURISTIC_RADIUS_FLOOR_M, MIN_POINT_COUNT};
use super::polygon;
use super::types::{EngineKind, IsochroneProperties, IsochroneResult};
use crate::coord::{self, LatLng, Position};
use crate::mode::TravelMode;

/// Radius of the heuristic circle in meters.
///
/// Zero, negative, and non-finite durations resolve to the floor.
#[inline]
pub fn heuristic_radius_meters(time_minutes: f64, mode: TravelMode) -> f64 {
    let radius = time_minutes * mode.speed_m_per_min();
    if radius.is_finite() {
        radius.max(HEURISTIC_RADIUS_FLOOR_M)
    } else {
        HEURISTIC_RADIUS_FLOOR_M
    }
}

/// Builds a closed ring of `point_count + 1` positions on a circle.
///
/// Vertex `i` sits at angle `2π·i/point_count`, measured counter-clockwise
/// from east. `point_count` is raised to [`MIN_POINT_COUNT`] if smaller.
pub fn circle_ring(center: LatLng, radius_meters: f64, point_count: usize) -> Vec<Position> {
    let point_count = point_count.max(MIN_POINT_COUNT);
    let mut ring = Vec::with_capacity(point_count + 1);

    for i in 0..point_count {
        let theta = (i as f64 / point_count as f64) * (2.0 * PI);
        let dx = radius_meters * theta.cos();
        let dy = radius_meters * theta.sin();
        ring.push(coord::offset_meters(center, dx, dy).to_position());
    }
    ring.push(ring[0]);

    ring
}

/// Computes the heuristic isochrone.
pub fn compute_heuristic(
    center: LatLng,
    time_minutes: f64,
    mode: TravelMode,
    point_count: usize,
) -> IsochroneResult {
    let radius_meters = heuristic_radius_meters(time_minutes, mode);
    let ring = circle_ring(center, radius_meters, point_count);

    let mut properties =
        IsochroneProperties::new(center, time_minutes, mode, EngineKind::Heuristic);
    properties.radius_meters = Some(radius_meters);

    polygon::assemble(ring, properties)
}

/// Heuristic engine with a fixed vertex count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeuristicEngine {
    point_count: usize,
}

impl Default for HeuristicEngine {
    fn default() -> Self {
        Self {
            point_count: DEFAULT_POINT_COUNT,
        }
    }
}

impl HeuristicEngine {
    pub fn new(point_count: usize) -> Self {
        Self {
            point_count: point_count.max(MIN_POINT_COUNT),
        }
    }

    pub fn point_count(&self) -> usize {
        self.point_count
    }

    pub fn compute(&self, center: LatLng, time_minutes: f64, mode: TravelMode) -> IsochroneResult {
        compute_heuristic(center, time_minutes, mode, self.point_count)
    }
}
