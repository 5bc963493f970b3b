//! Routing provider abstraction
//!
//! The radial sampler asks a routing provider for the driving distance and
//! time from the isochrone center to a probe point. This module defines the
//! [`RoutingProvider`] trait, an HTTP client seam for testing, and the Naver
//! Directions implementation.
//!
//! ```ignore
//! use std::sync::Arc;
//! use isochrone::provider::{AsyncReqwestClient, NaverCredentials, NaverDirectionsProvider};
//!
//! let client = AsyncReqwestClient::new()?;
//! let provider = Arc::new(NaverDirectionsProvider::new(client, NaverCredentials::from_env()));
//! ```

mod http;
mod naver;
mod types;

pub use http::{AsyncHttpClient, AsyncReqwestClient, HttpRequest, DEFAULT_HTTP_TIMEOUT_SECS};
pub use naver::{
    parse_route_response, NaverCredentials, NaverDirectionsProvider, NAVER_CLIENT_ID_ENV,
    NAVER_CLIENT_SECRET_ENV, NAVER_DIRECTIONS_URL,
};
pub use types::{BoxFuture, ProviderError, RouteOption, RouteSummary, RoutingProvider};

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;
