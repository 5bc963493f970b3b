//! Isochrone geometry engine.
//!
//! Two ways to draw a reachable-area polygon around a center point:
//!
//! - [`HeuristicEngine`]: a regular circle whose radius is `time × speed`.
//!   Never fails and needs no network.
//! - [`RadialSampler`]: sixteen concurrent probes through a
//!   [`RoutingProvider`](crate::provider::RoutingProvider), each rescaled by
//!   the measured drive time.
//!
//! [`IsochroneEngine`] picks between them per request and records why.
//!
//! # Example
//!
//! ```
//! use isochrone::coord::LatLng;
//! use isochrone::engine::{EngineConfig, EngineKind, IsochroneEngine};
//! use isochrone::mode::TravelMode;
//! use tokio_util::sync::CancellationToken;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let engine = IsochroneEngine::heuristic_only(EngineConfig::default());
//! let result = engine
//!     .compute(
//!         LatLng::new(37.5665, 126.9784),
//!         15.0,
//!         TravelMode::Walking,
//!         &CancellationToken::new(),
//!     )
//!     .await
//!     .unwrap();
//!
//! assert_eq!(result.engine(), EngineKind::Heuristic);
//! assert_eq!(result.ring.len(), 65);
//! # });
//! ```

mod config;
pub mod constants;
mod error;
mod heuristic;
mod policy;
mod polygon;
mod sampler;
mod types;

pub use config::EngineConfig;
pub use error::{IsochroneError, ProbeError};
pub use heuristic::{circle_ring, compute_heuristic, heuristic_radius_meters, HeuristicEngine};
pub use policy::{meets_quorum, IsochroneEngine};
pub use polygon::{assemble, close_ring, is_closed};
pub use sampler::{bearings, probe_radius_meters, travel_time_scale, RadialSampler};
pub use types::{EngineKind, IsochroneProperties, IsochroneResult, SampleResult, SampledIsochrone};
