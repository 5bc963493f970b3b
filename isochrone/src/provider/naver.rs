//! Naver Directions 5 driving-route provider.
//!
//! Requires a Naver Cloud Platform application with the Directions 5 API
//! enabled. The client id and secret are sent as API gateway headers.
//!
//! # API Endpoint
//!
//! ```text
//! GET https://maps.apigw.ntruss.com/map-direction/v1/driving
//!     ?start={lng},{lat}&goal={lng},{lat}&option={option}
//! X-NCP-APIGW-API-KEY-ID: {client_id}
//! X-NCP-APIGW-API-KEY:    {client_secret}
//! ```
//!
//! The response nests routes under the requested option name:
//!
//! ```text
//! { "code": 0, "route": { "trafast": [ { "summary": { "distance": 1234, "duration": 345678, ... } } ] } }
//! ```
//!
//! A non-zero `code` with no `route` means no route was found.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use tracing::trace;

use super::http::{AsyncHttpClient, HttpRequest};
use super::types::{BoxFuture, ProviderError, RouteOption, RouteSummary, RoutingProvider};
use crate::coord::LatLng;

/// Default Directions 5 driving endpoint.
pub const NAVER_DIRECTIONS_URL: &str = "https://maps.apigw.ntruss.com/map-direction/v1/driving";

/// Environment variable holding the client id.
pub const NAVER_CLIENT_ID_ENV: &str = "NAVER_CLIENT_ID";

/// Environment variable holding the client secret.
pub const NAVER_CLIENT_SECRET_ENV: &str = "NAVER_CLIENT_SECRET";

const HEADER_KEY_ID: &str = "X-NCP-APIGW-API-KEY-ID";
const HEADER_KEY: &str = "X-NCP-APIGW-API-KEY";

/// Naver Cloud Platform API credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct NaverCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl NaverCredentials {
    /// Builds credentials if both values are non-empty.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Option<Self> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();
        if client_id.trim().is_empty() || client_secret.trim().is_empty() {
            return None;
        }
        Some(Self {
            client_id,
            client_secret,
        })
    }

    /// Reads `NAVER_CLIENT_ID` and `NAVER_CLIENT_SECRET` from the environment.
    pub fn from_env() -> Option<Self> {
        let id = std::env::var(NAVER_CLIENT_ID_ENV).ok()?;
        let secret = std::env::var(NAVER_CLIENT_SECRET_ENV).ok()?;
        Self::new(id, secret)
    }
}

// Keep the secret out of logs.
impl fmt::Debug for NaverCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NaverCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    route: Option<HashMap<String, Vec<DirectionsRoute>>>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    #[serde(default)]
    summary: Option<DirectionsSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DirectionsSummary {
    distance: Option<f64>,
    duration: Option<f64>,
    toll_fare: Option<f64>,
    fuel_price: Option<f64>,
}

/// Extracts the first route summary for `option` from a Directions response.
///
/// Returns `Ok(None)` when the response has no route, or the route lacks a
/// positive distance or duration.
pub fn parse_route_response(
    body: &[u8],
    option: RouteOption,
) -> Result<Option<RouteSummary>, ProviderError> {
    let response: DirectionsResponse =
        serde_json::from_slice(body).map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

    let summary = response
        .route
        .as_ref()
        .and_then(|routes| routes.get(option.as_str()))
        .and_then(|routes| routes.first())
        .and_then(|route| route.summary.as_ref());

    let Some(summary) = summary else {
        trace!(
            code = ?response.code,
            message = ?response.message,
            "Directions response has no route"
        );
        return Ok(None);
    };

    let (distance_m, duration_ms) = match (summary.distance, summary.duration) {
        (Some(distance), Some(duration)) => (distance, duration),
        _ => return Ok(None),
    };

    let route = RouteSummary {
        distance_m,
        duration_ms,
        toll_fare: summary.toll_fare,
        fuel_price: summary.fuel_price,
    };

    Ok(route.is_usable().then_some(route))
}

/// Driving-route provider backed by Naver Directions 5.
///
/// # Example
///
/// ```no_run
/// use isochrone::provider::{AsyncReqwestClient, NaverCredentials, NaverDirectionsProvider};
///
/// let client = AsyncReqwestClient::new().unwrap();
/// let provider = NaverDirectionsProvider::new(client, NaverCredentials::from_env());
/// ```
pub struct NaverDirectionsProvider<C: AsyncHttpClient> {
    http_client: C,
    credentials: Option<NaverCredentials>,
    base_url: String,
}

impl<C: AsyncHttpClient> NaverDirectionsProvider<C> {
    /// Creates a provider against the public Directions endpoint.
    ///
    /// Missing credentials are not an error here; they surface when the
    /// provider is first used.
    pub fn new(http_client: C, credentials: Option<NaverCredentials>) -> Self {
        Self {
            http_client,
            credentials,
            base_url: NAVER_DIRECTIONS_URL.to_string(),
        }
    }

    /// Overrides the endpoint (useful for gateways and tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn credentials(&self) -> Result<&NaverCredentials, ProviderError> {
        self.credentials.as_ref().ok_or_else(|| {
            ProviderError::MissingCredentials(format!(
                "{} and {} must be set",
                NAVER_CLIENT_ID_ENV, NAVER_CLIENT_SECRET_ENV
            ))
        })
    }

    /// Builds the request URL. Coordinates are sent longitude first.
    fn build_url(&self, start: LatLng, goal: LatLng, option: RouteOption) -> String {
        format!(
            "{}?start={},{}&goal={},{}&option={}",
            self.base_url, start.lng, start.lat, goal.lng, goal.lat, option
        )
    }
}

impl<C: AsyncHttpClient> RoutingProvider for NaverDirectionsProvider<C> {
    fn route(
        &self,
        start: LatLng,
        goal: LatLng,
        option: RouteOption,
    ) -> BoxFuture<'_, Result<Option<RouteSummary>, ProviderError>> {
        Box::pin(async move {
            let credentials = self.credentials()?;
            let request = HttpRequest::get(self.build_url(start, goal, option))
                .header(HEADER_KEY_ID, credentials.client_id.as_str())
                .header(HEADER_KEY, credentials.client_secret.as_str());

            let body = self.http_client.get(request).await?;
            parse_route_response(&body, option)
        })
    }

    fn check_available(&self) -> Result<(), ProviderError> {
        self.credentials().map(|_| ())
    }

    fn name(&self) -> &str {
        "Naver Directions"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockAsyncHttpClient;

    const ROUTE_BODY: &str = r#"{
        "code": 0,
        "message": "길찾기를 성공하였습니다.",
        "route": {
            "trafast": [
                {
                    "summary": {
                        "distance": 12000,
                        "duration": 900000,
                        "tollFare": 1200,
                        "fuelPrice": 1800,
                        "taxiFare": 15000
                    },
                    "path": [[126.97, 37.56], [127.0, 37.57]]
                }
            ]
        }
    }"#;

    fn credentials() -> Option<NaverCredentials> {
        NaverCredentials::new("id-123", "secret-456")
    }

    fn start() -> LatLng {
        LatLng::new(37.5665, 126.9784)
    }

    fn goal() -> LatLng {
        LatLng::new(37.6, 127.0)
    }

    #[test]
    fn test_parse_full_summary() {
        let summary = parse_route_response(ROUTE_BODY.as_bytes(), RouteOption::Trafast)
            .unwrap()
            .unwrap();

        assert_eq!(summary.distance_m, 12000.0);
        assert_eq!(summary.duration_ms, 900000.0);
        assert_eq!(summary.toll_fare, Some(1200.0));
        assert_eq!(summary.fuel_price, Some(1800.0));
    }

    #[test]
    fn test_parse_other_option_key_is_no_route() {
        let summary = parse_route_response(ROUTE_BODY.as_bytes(), RouteOption::Tracomfort).unwrap();
        assert!(summary.is_none());
    }

    #[test]
    fn test_parse_no_route_code() {
        let body = r#"{"code": 1, "message": "출발지와 도착지가 동일합니다."}"#;
        let summary = parse_route_response(body.as_bytes(), RouteOption::Trafast).unwrap();
        assert!(summary.is_none());
    }

    #[test]
    fn test_parse_missing_duration_is_no_route() {
        let body = r#"{"code": 0, "route": {"trafast": [{"summary": {"distance": 500}}]}}"#;
        let summary = parse_route_response(body.as_bytes(), RouteOption::Trafast).unwrap();
        assert!(summary.is_none());
    }

    #[test]
    fn test_parse_zero_duration_is_no_route() {
        let body = r#"{"code": 0, "route": {"trafast": [
            {"summary": {"distance": 500, "duration": 0}}
        ]}}"#;
        let summary = parse_route_response(body.as_bytes(), RouteOption::Trafast).unwrap();
        assert!(summary.is_none());
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_route_response(b"<html>", RouteOption::Trafast);
        assert!(matches!(result, Err(ProviderError::InvalidResponse(_))));
    }

    #[test]
    fn test_credentials_require_both_values() {
        assert!(NaverCredentials::new("id", "secret").is_some());
        assert!(NaverCredentials::new("", "secret").is_none());
        assert!(NaverCredentials::new("id", "  ").is_none());
    }

    #[test]
    fn test_credentials_debug_hides_secret() {
        let debug = format!("{:?}", credentials().unwrap());
        assert!(debug.contains("id-123"));
        assert!(!debug.contains("secret-456"));
    }

    #[test]
    fn test_url_is_longitude_first() {
        let provider =
            NaverDirectionsProvider::new(MockAsyncHttpClient::with_body("{}"), credentials());
        let url = provider.build_url(start(), goal(), RouteOption::Trafast);
        assert_eq!(
            url,
            "https://maps.apigw.ntruss.com/map-direction/v1/driving?start=126.9784,37.5665&goal=127,37.6&option=trafast"
        );
    }

    #[test]
    fn test_custom_base_url() {
        let provider =
            NaverDirectionsProvider::new(MockAsyncHttpClient::with_body("{}"), credentials())
                .with_base_url("http://localhost:8080/driving");
        let url = provider.build_url(start(), goal(), RouteOption::Traoptimal);
        assert!(url.starts_with("http://localhost:8080/driving?"));
        assert!(url.ends_with("option=traoptimal"));
    }

    #[test]
    fn test_check_available() {
        let provider =
            NaverDirectionsProvider::new(MockAsyncHttpClient::with_body("{}"), credentials());
        assert!(provider.check_available().is_ok());

        let provider =

            NaverDirectionsProvider::new(MockAsyncHttpClient::with_body("{}"), None);
        assert!(matches!(
            provider.check_available(),
            Err(ProviderError::MissingCredentials(_))
        ));
    }

    #[tokio::test]
    async fn test_route_sends_auth_headers() {
        let provider =
            NaverDirectionsProvider::new(MockAsyncHttpClient::with_body(ROUTE_BODY), credentials());

        let summary = provider
            .route(start(), goal(), RouteOption::Trafast)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(summary.distance_m, 12000.0);

        let requests = provider.http_client.recorded();
        assert_eq!(requests.len(), 1);
        assert!(requests[0]
            .headers
            .contains(&(HEADER_KEY_ID.to_string(), "id-123".to_string())));
        assert!(requests[0]
            .headers
            .contains(&(HEADER_KEY.to_string(), "secret-456".to_string())));
    }

    #[tokio::test]
    async fn test_route_without_credentials_fails_before_request() {
        let provider =
            NaverDirectionsProvider::new(MockAsyncHttpClient::with_body(ROUTE_BODY), None);

        let result = provider.route(start(), goal(), RouteOption::Trafast).await;
        assert!(matches!(result, Err(ProviderError::MissingCredentials(_))));
        assert!(provider.http_client.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_route_propagates_http_status() {
        let client = MockAsyncHttpClient::new(Err(ProviderError::HttpStatus {
            status: 429,
            body: "quota exceeded".to_string(),
        }));
        let provider = NaverDirectionsProvider::new(client, credentials());

        let result = provider.route(start(), goal(), RouteOption::Trafast).await;
        assert!(matches!(
            result,
            Err(ProviderError::HttpStatus { status: 429, .. })
        ));
    }
}
