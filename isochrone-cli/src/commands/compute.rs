//! Compute command - validate a request, run the engine, print GeoJSON.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use isochrone::config::{ConfigFile, RequestDefaults};
use isochrone::coord::LatLng;
use isochrone::engine::{EngineConfig, IsochroneEngine};
use isochrone::logging::init_logging;
use isochrone::provider::{AsyncReqwestClient, NaverDirectionsProvider};
use isochrone::request::IsochroneRequest;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::common::{ModeArg, RouteOptionArg};
use crate::error::CliError;

/// Arguments for the compute command.
#[derive(Debug, Clone, Default)]
pub struct ComputeArgs {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub time: Option<f64>,
    pub mode: Option<ModeArg>,
    pub points: Option<usize>,
    pub route_option: Option<RouteOptionArg>,
    pub request: Option<PathBuf>,
    pub pretty: bool,
    pub no_provider: bool,
    pub fallback: bool,
}

/// Run the compute command.
pub fn run(args: ComputeArgs) -> Result<(), CliError> {
    let config = ConfigFile::load()?;
    let _log_guard = init_logging(&config.logging_config())?;

    let request = resolve_request(&args, &config.defaults)?;
    let engine = build_engine(&args, &config)?;
    info!(
        center = %request.center,
        time_minutes = request.time_minutes,
        mode = %request.mode,
        provider = engine.has_provider(),
        "Computing isochrone"
    );

    let cancellation = CancellationToken::new();
    let signal_token = cancellation.clone();
    ctrlc::set_handler(move || {
        eprintln!();
        eprintln!("Received interrupt, cancelling...");
        signal_token.cancel();
    })
    .map_err(|e| CliError::Config(format!("Failed to set signal handler: {}", e)))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(engine.compute_request(&request, &cancellation))?;

    if let Some(reason) = result.reason() {
        debug!(reason, "Engine decision");
    }

    println!("{}", result.to_geojson(args.pretty)?);
    Ok(())
}

/// Builds a validated request from a JSON file or from flags over defaults.
pub fn resolve_request(
    args: &ComputeArgs,
    defaults: &RequestDefaults,
) -> Result<IsochroneRequest, CliError> {
    if let Some(path) = &args.request {
        return load_request_file(path);
    }

    let center = LatLng::new(
        args.lat.unwrap_or(defaults.center.lat),
        args.lng.unwrap_or(defaults.center.lng),
    );
    let time = args.time.unwrap_or(defaults.time_minutes);
    let mode = args.mode.map(Into::into).unwrap_or(defaults.mode);

    Ok(IsochroneRequest::new(center, time, mode)?)
}

/// Reads and validates a JSON request body from disk.
pub fn load_request_file(path: &Path) -> Result<IsochroneRequest, CliError> {
    let body = std::fs::read_to_string(path)?;
    Ok(IsochroneRequest::from_json(&body)?)
}

/// Engine configuration from the config file, with CLI overrides applied.
pub fn resolve_engine_config(args: &ComputeArgs, config: &ConfigFile) -> EngineConfig {
    let mut engine_config = config.to_engine_config();
    if let Some(points) = args.points {
        engine_config = engine_config.with_point_count(points);
    }
    if let Some(option) = args.route_option {
        engine_config = engine_config.with_route_option(option.into());
    }
    if args.fallback {
        engine_config = engine_config.with_fallback_on_unavailable(true);
    }
    engine_config
}

fn build_engine(args: &ComputeArgs, config: &ConfigFile) -> Result<IsochroneEngine, CliError> {
    let engine_config = resolve_engine_config(args, config);

    if args.no_provider {
        debug!("Routing provider disabled by flag");
        return Ok(IsochroneEngine::heuristic_only(engine_config));
    }

    let credentials = config.credentials();
    if credentials.is_none() {
        warn!("Naver credentials not configured; driving requests need --fallback");
    }

    let client = AsyncReqwestClient::with_timeout(config.http_timeout())?;
    let provider = NaverDirectionsProvider::new(client, credentials);
    Ok(IsochroneEngine::with_provider(engine_config, Arc::new(provider)))
}
