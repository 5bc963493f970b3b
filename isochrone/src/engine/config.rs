//! Engine configuration.

use std::time::Duration;

use super::constants::{DEFAULT_POINT_COUNT, DEFAULT_PROBE_TIMEOUT, MIN_POINT_COUNT};
use crate::provider::RouteOption;

/// Tunables for one [`IsochroneEngine`](super::IsochroneEngine).
///
/// Built once at the boundary (CLI flags, config file) and passed in whole.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Vertices on the heuristic circle.
    pub point_count: usize,

    /// Upper bound on each provider call.
    pub probe_timeout: Duration,

    /// Route preference sent with every probe.
    pub route_option: RouteOption,

    /// Degrade to the heuristic when the provider is unavailable instead of
    /// failing the request.
    pub fallback_on_unavailable: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            point_count: DEFAULT_POINT_COUNT,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            route_option: RouteOption::default(),
            fallback_on_unavailable: false,
        }
    }
}

impl EngineConfig {
    /// Set the heuristic vertex count (minimum 3).
    pub fn with_point_count(mut self, point_count: usize) -> Self {
        self.point_count = point_count.max(MIN_POINT_COUNT);
        self
    }

    /// Set the per-probe timeout.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Set the route preference.
    pub fn with_route_option(mut self, option: RouteOption) -> Self {
        self.route_option = option;
        self
    }

    /// Enable or disable heuristic fallback when the provider is unavailable.
    pub fn with_fallback_on_unavailable(mut self, enabled: bool) -> Self {
        self.fallback_on_unavailable = enabled;
        self
    }
}
