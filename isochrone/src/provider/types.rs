//! Core routing provider types.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coord::LatLng;

/// Boxed future type for dyn-compatible async methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Errors that can occur when talking to a routing provider.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// Credentials required by the provider are not configured.
    #[error("missing routing provider credentials: {0}")]
    MissingCredentials(String),

    /// HTTP transport failure (connect, TLS, timeout, body read).
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// The provider answered with a non-success status.
    #[error("HTTP {status} from routing provider: {body}")]
    HttpStatus { status: u16, body: String },

    /// The response body could not be understood.
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// True when the provider was reached but gave no usable answer.
    pub fn is_rejected_response(&self) -> bool {
        matches!(
            self,
            ProviderError::HttpStatus { .. } | ProviderError::InvalidResponse(_)
        )
    }
}

/// Route preference passed to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteOption {
    /// Fastest route under real-time traffic.
    #[default]
    Trafast,
    /// Most comfortable route.
    Tracomfort,
    /// Balanced route.
    Traoptimal,
    /// Avoid toll roads.
    Traavoidtoll,
    /// Avoid car-only roads.
    Traavoidcaronly,
}

impl RouteOption {
    pub const ALL: [RouteOption; 5] = [
        RouteOption::Trafast,
        RouteOption::Tracomfort,
        RouteOption::Traoptimal,
        RouteOption::Traavoidtoll,
        RouteOption::Traavoidcaronly,
    ];

    /// Wire name, used both as a query parameter and as the response key.
    pub const fn as_str(self) -> &'static str {
        match self {
            RouteOption::Trafast => "trafast",
            RouteOption::Tracomfort => "tracomfort",
            RouteOption::Traoptimal => "traoptimal",
            RouteOption::Traavoidtoll => "traavoidtoll",
            RouteOption::Traavoidcaronly => "traavoidcaronly",
        }
    }
}

impl fmt::Display for RouteOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RouteOption::ALL
            .into_iter()
            .find(|option| option.as_str() == s.to_lowercase())
            .ok_or_else(|| {
                format!(
                    "unknown route option '{}': expected one of trafast, tracomfort, traoptimal, traavoidtoll, traavoidcaronly",
                    s
                )
            })
    }
}

/// Summary of a route found by the provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSummary {
    /// Route length in meters.
    pub distance_m: f64,
    /// Travel time in milliseconds.
    pub duration_ms: f64,
    /// Toll cost, if reported.
    pub toll_fare: Option<f64>,
    /// Fuel cost, if reported.
    pub fuel_price: Option<f64>,
}

impl RouteSummary {
    /// Creates a summary with only distance and duration.
    pub fn new(distance_m: f64, duration_ms: f64) -> Self {
        Self {
            distance_m,
            duration_ms,
            toll_fare: None,
            fuel_price: None,
        }
    }

    /// Returns true if the summary can be used to rescale a probe.
    ///
    /// Both values must be finite and strictly positive.
    pub fn is_usable(&self) -> bool {
        self.distance_m.is_finite()
            && self.distance_m > 0.0
            && self.duration_ms.is_finite()
            && self.duration_ms > 0.0
    }
}

/// Async routing provider.
///
/// Implementations answer "how far and how long is the drive from `start`
/// to `goal`". `Ok(None)` means the provider found no usable route, which is
/// an ordinary outcome; `Err` means the request itself failed.
///
/// The trait uses boxed futures so it can be used as `Arc<dyn RoutingProvider>`.
pub trait RoutingProvider: Send + Sync {
    /// Requests a route summary between two points.
    fn route(
        &self,
        start: LatLng,
        goal: LatLng,
        option: RouteOption,
    ) -> BoxFuture<'_, Result<Option<RouteSummary>, ProviderError>>;

    /// Checks that the provider can be called at all (credentials present).
    ///
    /// Called once per computation before any probe is issued.
    fn check_available(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    /// Human-readable provider name.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_option_default_is_trafast() {
        assert_eq!(RouteOption::default(), RouteOption::Trafast);
    }

    #[test]
    fn test_route_option_parse() {
        for option in RouteOption::ALL {
            assert_eq!(option.as_str().parse::<RouteOption>(), Ok(option));
        }
        assert_eq!("TRAFAST".parse::<RouteOption>(), Ok(RouteOption::Trafast));
        assert!("fastest".parse::<RouteOption>().is_err());
    }

    #[test]
    fn test_summary_usable() {
        assert!(RouteSummary::new(1000.0, 60_000.0).is_usable());
        assert!(!RouteSummary::new(0.0, 60_000.0).is_usable());
        assert!(!RouteSummary::new(1000.0, 0.0).is_usable());
        assert!(!RouteSummary::new(f64::NAN, 60_000.0).is_usable());
    }

    #[test]
    fn test_rejected_response_classification() {
        assert!(ProviderError::HttpStatus {
            status: 500,
            body: String::new(),
        }
        .is_rejected_response());
        assert!(ProviderError::InvalidResponse("eof".to_string()).is_rejected_response());
        assert!(!ProviderError::HttpError("connection refused".to_string()).is_rejected_response());
        assert!(!ProviderError::MissingCredentials("id".to_string()).is_rejected_response());
    }

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError::HttpStatus {
            status: 401,
            body: "unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 401 from routing provider: unauthorized");
    }
}
