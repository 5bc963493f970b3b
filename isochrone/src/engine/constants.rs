//! Engine constants.
//!
//! The heuristic floor and the probe floor are separate values: one bounds
//! the drawn circle, the other bounds how far out the sampler probes.

use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Heuristic engine
// ─────────────────────────────────────────────────────────────────────────────

/// Smallest radius the heuristic circle is drawn with, in meters.
pub const HEURISTIC_RADIUS_FLOOR_M: f64 = 50.0;

/// Default number of vertices on the heuristic circle (before closing).
pub const DEFAULT_POINT_COUNT: usize = 64;

/// Fewest vertices that still make a polygon (4 positions once closed).
pub const MIN_POINT_COUNT: usize = 3;

// ─────────────────────────────────────────────────────────────────────────────
// Radial sampler
// ─────────────────────────────────────────────────────────────────────────────

/// Smallest probe radius, in meters.
pub const PROBE_RADIUS_FLOOR_M: f64 = 200.0;

/// Number of bearings probed per computation.
pub const BEARING_COUNT: usize = 16;

/// Angle between consecutive bearings, in degrees.
pub const BEARING_STEP_DEG: f64 = 360.0 / BEARING_COUNT as f64;

/// Lower clamp for the travel-time scale factor.
pub const SCALE_MIN: f64 = 0.2;

/// Upper clamp for the travel-time scale factor.
pub const SCALE_MAX: f64 = 1.2;

/// Smallest distance a rescaled probe point may sit from the center, in meters.
pub const MIN_ADJUSTED_DISTANCE_M: f64 = 100.0;

/// Default upper bound on a single provider call.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

// ─────────────────────────────────────────────────────────────────────────────
// Fallback policy
// ─────────────────────────────────────────────────────────────────────────────

/// Minimum number of valid samples (out of [`BEARING_COUNT`]) to keep a
/// sampled ring.
pub const SAMPLE_QUORUM: usize = 6;

pub const REASON_NON_DRIVING: &str = "non-driving modes use heuristic speed model";
pub const REASON_INSUFFICIENT_SAMPLES: &str = "insufficient valid provider samples";
pub const REASON_PROVIDER_UNAVAILABLE: &str = "routing provider unavailable";
pub const REASON_PROVIDER_DISABLED: &str = "no routing provider configured";
