//! Routing-provider-backed radial sampling.
//!
//! The sampler probes [`BEARING_COUNT`] evenly spaced bearings at a fixed
//! radius, asks the provider how long each drive takes, and moves each probe
//! point in or out so it sits roughly where the requested time runs out.
//!
//! ```text
//!            probe at base radius
//!   center ───────────────────────●        provider: 12 km in 20 min
//!          ──────────────●                 requested 15 min → scale 0.75
//!                  rescaled point
//! ```
//!
//! # Failure isolation
//!
//! All probes run concurrently and every probe resolves to a sample, whatever
//! happens to its provider call. A non-success status or an unreadable body
//! is "no usable route" for that bearing. Transport errors, timeouts and
//! panics are probe failures: they are logged, the bearing keeps its raw
//! probe point, and only they count toward the unreachable-provider check.
//! The join waits for all probes; it never short-circuits on the first
//! failure.
//!
//! # Cancellation
//!
//! The whole fan-out races the caller's [`CancellationToken`]. When the token
//! fires, the in-flight probe futures are dropped rather than awaited.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use futures::FutureExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::constants::{
    BEARING_COUNT, BEARING_STEP_DEG, DEFAULT_PROBE_TIMEOUT, MIN_ADJUSTED_DISTANCE_M,
    PROBE_RADIUS_FLOOR_M, SCALE_MAX, SCALE_MIN,
};
use super::error::{IsochroneError, ProbeError};
use super::types::{SampleResult, SampledIsochrone};
use crate::coord::{self, LatLng};
use crate::mode::TravelMode;
use crate::provider::{ProviderError, RouteOption, RouteSummary, RoutingProvider};

/// Distance at which every bearing is probed, in meters.
#[inline]
pub fn probe_radius_meters(time_minutes: f64) -> f64 {
    let radius = time_minutes * TravelMode::Driving.speed_m_per_min();
    if radius.is_finite() {
        radius.max(PROBE_RADIUS_FLOOR_M)
    } else {
        PROBE_RADIUS_FLOOR_M
    }
}

/// Ratio of requested time to measured drive time, clamped to
/// [`SCALE_MIN`]..=[`SCALE_MAX`].
#[inline]
pub fn travel_time_scale(time_minutes: f64, duration_ms: f64) -> f64 {
    let ratio = (time_minutes * 60_000.0) / duration_ms;
    if ratio.is_nan() {
        SCALE_MIN
    } else {
        ratio.clamp(SCALE_MIN, SCALE_MAX)
    }
}

/// The fixed probe bearings: 0°, 22.5°, … 337.5°.
pub fn bearings() -> impl Iterator<Item = f64> {
    (0..BEARING_COUNT).map(|i| i as f64 * BEARING_STEP_DEG)
}

/// Concurrent radial sampler over a routing provider.
#[derive(Clone)]
pub struct RadialSampler {
    provider: Arc<dyn RoutingProvider>,
    probe_timeout: Duration,
    route_option: RouteOption,
}

impl RadialSampler {
    pub fn new(provider: Arc<dyn RoutingProvider>) -> Self {
        Self {
            provider,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            route_option: RouteOption::default(),
        }
    }

    /// Sets the upper bound on each provider call.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Sets the route preference sent with each probe.
    pub fn with_route_option(mut self, option: RouteOption) -> Self {
        self.route_option = option;
        self
    }

    pub fn route_option(&self) -> RouteOption {
        self.route_option
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Probes every bearing and returns the samples in bearing order.
    ///
    /// # Errors
    ///
    /// - [`IsochroneError::ProviderUnavailable`] if the provider reports it
    ///   cannot be used, or if every probe failed.
    /// - [`IsochroneError::Cancelled`] if `cancellation` fires first.
    pub async fn compute_sampled(
        &self,
        center: LatLng,
        time_minutes: f64,
        cancellation: &CancellationToken,
    ) -> Result<SampledIsochrone, IsochroneError> {
        self.provider.check_available()?;

        let probe_radius = probe_radius_meters(time_minutes);
        debug!(
            provider = self.provider.name(),
            %center,
            time_minutes,
            probe_radius,
            option = %self.route_option,
            "Probing bearings"
        );

        let probes =
            bearings().map(|bearing| self.probe(center, bearing, probe_radius, time_minutes));

        let outcomes = tokio::select! {
            biased;
            _ = cancellation.cancelled() => {
                debug!("Sampling cancelled, abandoning outstanding probes");
                return Err(IsochroneError::Cancelled);
            }
            outcomes = join_all(probes) => outcomes,
        };

        let mut samples = Vec::with_capacity(BEARING_COUNT);
        let mut first_error: Option<ProbeError> = None;
        let mut failed_count = 0;

        for (sample, error) in outcomes {
            if let Some(error) = error {
                failed_count += 1;
                first_error.get_or_insert(error);
            }
            samples.push(sample);
        }

        if failed_count == BEARING_COUNT {
            let cause = match first_error {
                Some(ProbeError::Provider(e)) => e,
                Some(other) => ProviderError::HttpError(other.to_string()),
                None => ProviderError::HttpError("no probe completed".to_string()),
            };
            warn!(
                provider = self.provider.name(),
                error = %cause,
                "Every probe failed, provider unreachable"
            );
            return Err(IsochroneError::ProviderUnavailable(cause));
        }

        let valid_count = samples.iter().filter(|s| s.is_valid()).count();
        let routed_count = samples.iter().filter(|s| s.is_routed()).count();
        let confidence = valid_count as f64 / BEARING_COUNT as f64;

        debug!(
            valid_count,
            routed_count,
            failed_count,
            confidence,
            "Sampling complete"
        );

        Ok(SampledIsochrone {
            samples,
            valid_count,
            confidence,
            routed_count,
            failed_count,
            probe_radius_meters: probe_radius,
        })
    }

    /// Probes one bearing. Always yields a sample; the error, if any, is
    /// returned alongside for accounting.
    async fn probe(
        &self,
        center: LatLng,
        bearing: f64,
        probe_radius: f64,
        time_minutes: f64,
    ) -> (SampleResult, Option<ProbeError>) {
        let probe_point = coord::destination_from(center, bearing, probe_radius);

        match self.call_provider(center, bearing, probe_point).await {
            Ok(Some(route)) => (rescale(center, bearing, time_minutes, &route), None),
            Ok(None) => {
                debug!(bearing, "No usable route, keeping probe point");
                (SampleResult::unrouted(bearing, probe_point.to_position()), None)
            }
            Err(error) => {
                warn!(bearing, %error, "Probe failed, keeping probe point");
                (
                    SampleResult::unrouted(bearing, probe_point.to_position()),
                    Some(error),
                )
            }
        }
    }

    /// Calls the provider with a timeout, converting panics into errors.
    ///
    /// Rejected or unreadable responses become `Ok(None)`; only failures to
    /// reach the provider come back as [`ProbeError`].
    async fn call_provider(
        &self,
        start: LatLng,
        bearing: f64,
        goal: LatLng,
    ) -> Result<Option<RouteSummary>, ProbeError> {
        let provider = &self.provider;
        let option = self.route_option;
        let call = AssertUnwindSafe(async move { provider.route(start, goal, option).await })
            .catch_unwind();

        match tokio::time::timeout(self.probe_timeout, call).await {
            Err(_) => Err(ProbeError::Timeout(self.probe_timeout)),
            Ok(Err(_)) => Err(ProbeError::Panicked),
            Ok(Ok(Ok(route))) => Ok(route.filter(RouteSummary::is_usable)),
            Ok(Ok(Err(e))) if e.is_rejected_response() => {
                warn!(bearing, error = %e, "Provider rejected probe, treating as no route");
                Ok(None)
            }
            Ok(Ok(Err(e))) => Err(ProbeError::Provider(e)),
        }
    }
}

/// Moves the probe along its bearing to where the requested time runs out.
fn rescale(center: LatLng, bearing: f64, time_minutes: f64, route: &RouteSummary) -> SampleResult {
    let scale = travel_time_scale(time_minutes, route.duration_ms);
    let adjusted = (route.distance_m * scale).max(MIN_ADJUSTED_DISTANCE_M);
    let point = coord::destination_from(center, bearing, adjusted);

    SampleResult {
        bearing,
        point: point.to_position(),
        travel_time_ms: Some(route.duration_ms),
        distance_m: Some(route.distance_m),
        toll_fare: Some(route.toll_fare.unwrap_or(0.0)),
        fuel_price: Some(route.fuel_price.unwrap_or(0.0)),
    }
}
