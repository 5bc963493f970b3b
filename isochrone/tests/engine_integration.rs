//! End-to-end tests: request parsing, engine selection, the Naver provider
//! over a canned HTTP client, and GeoJSON output.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use isochrone::coord::{self, LatLng};
use isochrone::engine::constants::{
    REASON_NON_DRIVING, REASON_PROVIDER_UNAVAILABLE, SAMPLE_QUORUM,
};
use isochrone::engine::{is_closed, EngineConfig, EngineKind, IsochroneEngine, IsochroneError};
use isochrone::mode::TravelMode;
use isochrone::provider::{
    AsyncHttpClient, BoxFuture, HttpRequest, NaverCredentials, NaverDirectionsProvider,
    ProviderError,
};
use isochrone::request::{IsochroneRequest, ValidationError};
use tokio_util::sync::CancellationToken;

const SEOUL: LatLng = LatLng::new(37.5665, 126.9784);

const ROUTE_15_MIN: &str = r#"{
    "code": 0,
    "route": {
        "trafast": [
            { "summary": { "distance": 12000, "duration": 900000, "tollFare": 0, "fuelPrice": 1500 } }
        ]
    }
}"#;

const NO_ROUTE: &str = r#"{ "code": 1, "message": "출발지와 도착지가 동일합니다." }"#;

type Responder = dyn Fn(usize) -> Result<Vec<u8>, ProviderError> + Send + Sync;

/// HTTP client that answers the n-th call from a closure and records every
/// request. Clones share their state.
#[derive(Clone)]
struct CannedClient {
    respond: Arc<Responder>,
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl CannedClient {
    fn new(
        respond: impl Fn(usize) -> Result<Vec<u8>, ProviderError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            respond: Arc::new(respond),
            calls: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn always(body: &'static str) -> Self {
        Self::new(move |_| Ok(body.as_bytes().to_vec()))
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AsyncHttpClient for CannedClient {
    fn get(&self, request: HttpRequest) -> BoxFuture<'_, Result<Vec<u8>, ProviderError>> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        let response = (self.respond)(n);
        Box::pin(async move { response })
    }
}

fn credentials() -> Option<NaverCredentials> {
    NaverCredentials::new("test-id", "test-secret")
}

fn naver_engine(
    client: &CannedClient,
    credentials: Option<NaverCredentials>,
    config: EngineConfig,
) -> IsochroneEngine {
    let provider = NaverDirectionsProvider::new(client.clone(), credentials);
    IsochroneEngine::with_provider(config, Arc::new(provider))
}

fn assert_ring_in_bounds(ring: &[[f64; 2]]) {
    for p in ring {
        assert!(coord::is_valid_position(p), "Invalid position {:?}", p);
    }
}

#[tokio::test]
async fn test_seoul_fifteen_minutes_walking() {
    let request = IsochroneRequest::from_json(
        r#"{"center":{"lat":37.5665,"lng":126.9784},"time":15,"mode":"walking"}"#,
    )
    .unwrap();
    let engine = IsochroneEngine::heuristic_only(EngineConfig::default());

    let result = engine
        .compute_request(&request, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.engine(), EngineKind::Heuristic);
    assert_eq!(result.radius_meters(), Some(1200.0));
    assert_eq!(result.ring.len(), 65);
    assert!(is_closed(&result.ring));
    assert_ring_in_bounds(&result.ring);
    assert_eq!(result.reason(), Some(REASON_NON_DRIVING));
}

#[tokio::test]
async fn test_zero_time_floors_radius() {
    let engine = IsochroneEngine::heuristic_only(EngineConfig::default());

    let result = engine
        .compute(SEOUL, 0.0, TravelMode::Walking, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.radius_meters(), Some(50.0));
    assert_eq!(result.ring.len(), 65);
}

#[test]
fn test_unknown_mode_rejected_before_engine() {
    let err = IsochroneRequest::from_json(
        r#"{"center":{"lat":37.5665,"lng":126.9784},"time":15,"mode":"bicycle"}"#,
    )
    .unwrap_err();

    assert_eq!(err, ValidationError::InvalidMode("bicycle".to_string()));
}

#[tokio::test]
async fn test_geojson_feature_output() {
    let engine = IsochroneEngine::heuristic_only(EngineConfig::default().with_point_count(16));
    let result = engine
        .compute(SEOUL, 10.0, TravelMode::Transit, &CancellationToken::new())
        .await
        .unwrap();

    let json: serde_json::Value = serde_json::from_str(&result.to_geojson(false).unwrap()).unwrap();
    assert_eq!(json["type"], "Feature");
    assert_eq!(json["geometry"]["type"], "Polygon");

    let ring = json["geometry"]["coordinates"][0].as_array().unwrap();
    assert_eq!(ring.len(), 17);
    assert_eq!(ring[0], ring[16]);

    let props = &json["properties"];
    assert_eq!(props["engine"], "heuristic");
    assert_eq!(props["mode"], "transit");
    assert_eq!(props["timeMinutes"], 10.0);
    assert_eq!(props["radiusMeters"], 6000.0);
    assert_eq!(props["center"]["lng"], 126.9784);
}

#[tokio::test]
async fn test_driving_sampled_through_naver() {
    let client = CannedClient::always(ROUTE_15_MIN);
    let engine = naver_engine(&client, credentials(), EngineConfig::default());

    let result = engine
        .compute(SEOUL, 15.0, TravelMode::Driving, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.engine(), EngineKind::Sampled);
    assert_eq!(result.ring.len(), 17);
    assert!(is_closed(&result.ring));
    assert_ring_in_bounds(&result.ring);
    assert_eq!(result.properties.confidence, Some(1.0));

    // Bearing 0 points due east at the routed distance
    let [lng, lat] = result.ring[0];
    assert_eq!(lat, SEOUL.lat);
    let expected_lng = SEOUL.lng + coord::meters_to_lng_degrees(12_000.0, SEOUL.lat);
    assert!((lng - expected_lng).abs() < 1e-9);

    let samples = result.properties.samples.as_ref().unwrap();
    assert_eq!(samples.len(), 16);
    assert!(samples.iter().all(|s| s.travel_time_ms == Some(900_000.0)));
    assert!(samples.iter().all(|s| s.toll_fare == Some(0.0)));

    let requests = client.requests.lock().unwrap();
    assert_eq!(requests.len(), 16);
    let first = &requests[0];
    assert!(first.url.contains("start=126.9784,37.5665"));
    assert!(first.url.contains("option=trafast"));
    assert!(first
        .headers
        .iter()
        .any(|(name, value)| name == "X-NCP-APIGW-API-KEY-ID" && value == "test-id"));
}

#[tokio::test]
async fn test_driving_no_routes_keeps_probe_points() {
    let client = CannedClient::always(NO_ROUTE);
    let engine = naver_engine(&client, credentials(), EngineConfig::default());

    let result = engine
        .compute(SEOUL, 15.0, TravelMode::Driving, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.engine(), EngineKind::Sampled);
    assert_eq!(result.radius_meters(), Some(12_000.0));
    let samples = result.properties.samples.as_ref().unwrap();
    assert!(samples.iter().all(|s| s.travel_time_ms.is_none()));
    assert!(samples.iter().all(|s| s.distance_m.is_none()));
}

#[tokio::test]
async fn test_partial_failures_are_isolated() {
    let client = CannedClient::new(|n| {
        if n % 2 == 0 {
            Ok(ROUTE_15_MIN.as_bytes().to_vec())
        } else {
            Err(ProviderError::HttpStatus {
                status: 500,
                body: "internal error".to_string(),
            })
        }
    });
    let engine = naver_engine(&client, credentials(), EngineConfig::default());

    let result = engine
        .compute(SEOUL, 15.0, TravelMode::Driving, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.engine(), EngineKind::Sampled);
    assert!(is_closed(&result.ring));
    let samples = result.properties.samples.as_ref().unwrap();
    let routed = samples.iter().filter(|s| s.travel_time_ms.is_some()).count();
    assert_eq!(routed, 8);
    assert!(routed >= SAMPLE_QUORUM);
    assert_eq!(client.call_count(), 16);
}

#[tokio::test]
async fn test_error_status_on_every_bearing_keeps_probe_points() {
    let client = CannedClient::new(|_| {
        Err(ProviderError::HttpStatus {
            status: 500,
            body: "internal error".to_string(),
        })
    });
    let engine = naver_engine(&client, credentials(), EngineConfig::default());

    let result = engine
        .compute(SEOUL, 15.0, TravelMode::Driving, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.engine(), EngineKind::Sampled);
    assert_eq!(result.radius_meters(), Some(12_000.0));
    assert!(is_closed(&result.ring));
    let samples = result.properties.samples.as_ref().unwrap();
    assert_eq!(samples.len(), 16);
    for sample in samples {
        assert!(sample.travel_time_ms.is_none());
        assert!(sample.distance_m.is_none());
        assert!(sample.toll_fare.is_none());
        assert!(sample.fuel_price.is_none());
    }
    assert_eq!(client.call_count(), 16);
}

#[tokio::test]
async fn test_provider_down_is_an_error() {
    let client = CannedClient::new(|_| {
        Err(ProviderError::HttpError("connection refused".to_string()))
    });
    let engine = naver_engine(&client, credentials(), EngineConfig::default());

    let err = engine
        .compute(SEOUL, 15.0, TravelMode::Driving, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, IsochroneError::ProviderUnavailable(_)));
}

#[tokio::test]
async fn test_missing_credentials() {
    let client = CannedClient::always(ROUTE_15_MIN);

    let strict = naver_engine(&client, None, EngineConfig::default());
    let err = strict
        .compute(SEOUL, 15.0, TravelMode::Driving, &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        IsochroneError::ProviderUnavailable(ProviderError::MissingCredentials(_))
    ));
    assert_eq!(client.call_count(), 0);

    let lenient = naver_engine(
        &client,
        None,
        EngineConfig::default().with_fallback_on_unavailable(true),
    );
    let result = lenient
        .compute(SEOUL, 15.0, TravelMode::Driving, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(result.engine(), EngineKind::Heuristic);
    assert_eq!(result.reason(), Some(REASON_PROVIDER_UNAVAILABLE));
    assert_eq!(result.radius_meters(), Some(12_000.0));
}

#[tokio::test]
async fn test_walking_never_calls_provider() {
    let client = CannedClient::always(ROUTE_15_MIN);
    let engine = naver_engine(&client, credentials(), EngineConfig::default());

    let result = engine
        .compute(SEOUL, 30.0, TravelMode::Walking, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.engine(), EngineKind::Heuristic);
    assert_eq!(result.radius_meters(), Some(2400.0));
    assert_eq!(client.call_count(), 0);
}
