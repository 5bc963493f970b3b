//! Engine selection and fallback.
//!
//! ```text
//!   request ──► mode != driving ──────────────────────────► heuristic
//!          └──► driving ──► RadialSampler ──► valid ≥ 6 ──► sampled
//!                                │        └─► valid < 6 ──► heuristic (fallback)
//!                                └─ provider unavailable ─► error
//!                                                           (or heuristic if opted in)
//! ```

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::config::EngineConfig;
use super::constants::{
    REASON_INSUFFICIENT_SAMPLES, REASON_NON_DRIVING, REASON_PROVIDER_DISABLED,
    REASON_PROVIDER_UNAVAILABLE, SAMPLE_QUORUM,
};
use super::error::IsochroneError;
use super::heuristic::HeuristicEngine;
use super::polygon;
use super::sampler::RadialSampler;
use super::types::{EngineKind, IsochroneProperties, IsochroneResult, SampledIsochrone};
use crate::coord::LatLng;
use crate::mode::TravelMode;
use crate::provider::{RouteOption, RoutingProvider};
use crate::request::IsochroneRequest;

/// Returns true if enough bearings produced valid points to keep the
/// sampled ring.
#[inline]
pub fn meets_quorum(valid_count: usize) -> bool {
    valid_count >= SAMPLE_QUORUM
}

/// Isochrone engine: heuristic for every mode, radial sampling for driving
/// when a routing provider is configured.
///
/// The engine holds no per-request state and can be shared across tasks.
#[derive(Clone)]
pub struct IsochroneEngine {
    config: EngineConfig,
    heuristic: HeuristicEngine,
    sampler: Option<RadialSampler>,
}

impl IsochroneEngine {
    /// Engine without a routing provider. Driving requests use the heuristic.
    pub fn heuristic_only(config: EngineConfig) -> Self {
        Self {
            heuristic: HeuristicEngine::new(config.point_count),
            config,
            sampler: None,
        }
    }

    /// Engine that samples driving requests through `provider`.
    pub fn with_provider(config: EngineConfig, provider: Arc<dyn RoutingProvider>) -> Self {
        let sampler = RadialSampler::new(provider)
            .with_probe_timeout(config.probe_timeout)
            .with_route_option(config.route_option);
        Self {
            heuristic: HeuristicEngine::new(config.point_count),
            config,
            sampler: Some(sampler),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn has_provider(&self) -> bool {
        self.sampler.is_some()
    }

    /// Computes the isochrone for a validated request.
    pub async fn compute_request(
        &self,
        request: &IsochroneRequest,
        cancellation: &CancellationToken,
    ) -> Result<IsochroneResult, IsochroneError> {
        self.compute(request.center, request.time_minutes, request.mode, cancellation)
            .await
    }

    /// Computes the isochrone, choosing the engine per mode and sample quorum.
    ///
    /// Inputs are not validated here; a zero or negative time yields the
    /// floored heuristic radius.
    ///
    /// # Errors
    ///
    /// - [`IsochroneError::ProviderUnavailable`] for driving requests when
    ///   the provider cannot be used and fallback is not enabled.
    /// - [`IsochroneError::Cancelled`] if `cancellation` fires during sampling.
    pub async fn compute(
        &self,
        center: LatLng,
        time_minutes: f64,
        mode: TravelMode,
        cancellation: &CancellationToken,
    ) -> Result<IsochroneResult, IsochroneError> {
        if !mode.supports_sampling() {
            return Ok(self.heuristic_result(center, time_minutes, mode, REASON_NON_DRIVING));
        }

        let Some(sampler) = &self.sampler else {
            return Ok(self.heuristic_result(center, time_minutes, mode, REASON_PROVIDER_DISABLED));
        };

        debug!(provider = sampler.provider_name(), "Sampling driving isochrone");
        let sampled = match sampler
            .compute_sampled(center, time_minutes, cancellation)
            .await
        {
            Ok(sampled) => sampled,
            Err(IsochroneError::ProviderUnavailable(e)) if self.config.fallback_on_unavailable => {
                warn!(error = %e, "Routing provider unavailable, using heuristic");
                return Ok(self.heuristic_result(
                    center,
                    time_minutes,
                    mode,
                    REASON_PROVIDER_UNAVAILABLE,
                ));
            }
            Err(e) => return Err(e),
        };

        Ok(self.resolve_samples(center, time_minutes, mode, sampler.route_option(), sampled))
    }

    /// Keeps the sampled ring if it meets the quorum, otherwise falls back
    /// to the heuristic.
    fn resolve_samples(
        &self,
        center: LatLng,
        time_minutes: f64,
        mode: TravelMode,
        option: RouteOption,
        sampled: SampledIsochrone,
    ) -> IsochroneResult {
        if !meets_quorum(sampled.valid_count) {
            warn!(
                valid = sampled.valid_count,
                quorum = SAMPLE_QUORUM,
                "Too few valid samples, using heuristic"
            );
            return self.heuristic_result(center, time_minutes, mode, REASON_INSUFFICIENT_SAMPLES);
        }

        info!(
            %center,
            time_minutes,
            confidence = sampled.confidence,
            routed = sampled.routed_count,
            "Sampled isochrone"
        );
        sampled_result(center, time_minutes, mode, option, sampled)
    }

    fn heuristic_result(
        &self,
        center: LatLng,
        time_minutes: f64,
        mode: TravelMode,
        reason: &str,
    ) -> IsochroneResult {
        let result = self.heuristic.compute(center, time_minutes, mode);
        info!(
            %center,
            time_minutes,
            %mode,
            radius = result.properties.radius_meters,
            reason,
            "Heuristic isochrone"
        );
        IsochroneResult {
            ring: result.ring,
            properties: result.properties.with_reason(reason),
        }
    }
}

fn sampled_result(
    center: LatLng,
    time_minutes: f64,
    mode: TravelMode,
    option: RouteOption,
    sampled: SampledIsochrone,
) -> IsochroneResult {
    let ring = sampled.valid_points();

    let mut properties = IsochroneProperties::new(center, time_minutes, mode, EngineKind::Sampled);
    properties.radius_meters = Some(sampled.probe_radius_meters);
    properties.confidence = Some(sampled.confidence);
    properties.option = Some(option);
    properties.samples = Some(sampled.samples);

    polygon::assemble(ring, properties)
}
