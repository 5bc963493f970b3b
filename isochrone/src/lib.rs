//! Isochrone - reachable-area polygons for map display
//!
//! Given a center point, a travel time, and a travel mode, this library
//! produces a closed GeoJSON polygon approximating everything reachable in
//! that time. Walking and transit use a speed-constant circle. Driving probes
//! a routing provider along sixteen bearings and falls back to the circle
//! when too few probes succeed.
//!
//! ```
//! use isochrone::engine::{EngineConfig, IsochroneEngine};
//! use isochrone::request::IsochroneRequest;
//! use tokio_util::sync::CancellationToken;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let request = IsochroneRequest::from_json(
//!     r#"{"center":{"lat":37.5665,"lng":126.9784},"time":15,"mode":"walking"}"#,
//! )
//! .unwrap();
//!
//! let engine = IsochroneEngine::heuristic_only(EngineConfig::default());
//! let result = engine
//!     .compute_request(&request, &CancellationToken::new())
//!     .await
//!     .unwrap();
//!
//! assert_eq!(result.radius_meters(), Some(1200.0));
//! println!("{}", result.to_geojson(false).unwrap());
//! # });
//! ```

pub mod config;
pub mod coord;
pub mod engine;
pub mod logging;
pub mod mode;
pub mod provider;
pub mod request;

pub use coord::{LatLng, Position};
pub use engine::{EngineConfig, EngineKind, IsochroneEngine, IsochroneError, IsochroneResult};
pub use mode::TravelMode;
pub use request::{IsochroneRequest, ValidationError};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
