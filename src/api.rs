use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use rouille::{Request, Response, ResponseBody};
use tracing::{debug, error, warn};

use crate::config::Config;
use crate::index::{Index, ShapeLookupMiss};
use crate::proxy::{FeedKind, ProxyError, Upstream};
use crate::schedule::{self, ScheduleError};

pub const LIVENESS_TEXT: &str = "RIPTA Tracker backend is running!\n";

/// Everything a request handler may touch. Nothing in here changes after startup.
pub struct AppState {
    pub index: Arc<Index>,
    pub stop_times_path: PathBuf,
    pub upstream: Upstream,
    pub allowed_origin: String
}

impl AppState {
    pub fn new(config: &Config, index: Arc<Index>) -> Result<AppState, ProxyError> {
        Ok(AppState {
            index: index,
            stop_times_path: config.stop_times_path(),
            upstream: Upstream::new(config)?,
            allowed_origin: config.allowed_origin.clone()
        })
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Endpoint<'a> {
    Root,
    RouteShape(&'a str),
    Routes,
    Schedule,
    Feed(FeedKind)
}

/// Any path that names no API endpoint falls through to the liveness check.
pub fn endpoint(path: &str) -> Endpoint {
    match path {
        "/api/routes" | "/api/routes/" => Endpoint::Routes,
        "/api/schedule" => Endpoint::Schedule,
        "/api/tripupdates" => Endpoint::Feed(FeedKind::TripUpdates),
        "/api/vehiclepositions" => Endpoint::Feed(FeedKind::VehiclePositions),
        "/api/servicealerts" => Endpoint::Feed(FeedKind::ServiceAlerts),
        _ => match path.strip_prefix("/api/route/") {
            Some(route_id) => Endpoint::RouteShape(route_id),
            None => Endpoint::Root
        }
    }
}

fn error_text(status: u16, msg: &str) -> Response {
    Response::text(format!("{}\n", msg)).with_status_code(status)
}

fn preflight() -> Response {
    Response {
        status_code: 200,
        headers: vec![],
        data: ResponseBody::empty(),
        upgrade: None
    }
}

fn with_cors(response: Response, origin: &str) -> Response {
    response
        .with_additional_header("Access-Control-Allow-Origin", origin.to_string())
        .with_additional_header("Access-Control-Allow-Methods", "GET, OPTIONS")
        .with_additional_header("Access-Control-Allow-Headers", "Content-Type")
}

fn route_shape(state: &AppState, route_id: &str) -> Response {
    match state.index.route_shape(route_id) {
        Ok(points) => Response::json(&points),
        Err(ShapeLookupMiss::Route) => error_text(404, "Route not found"),
        Err(ShapeLookupMiss::Shape) => error_text(404, "Shape not found")
    }
}

fn schedule(state: &AppState, request: &Request) -> Response {
    let route_id = request.get_param("routeId").unwrap_or_default();
    match schedule::schedule_for_route(&state.index, &state.stop_times_path, &route_id) {
        Ok(entries) => Response::json(&entries),
        Err(ScheduleError::MissingRouteId) => error_text(400, "Missing routeId"),
        Err(e) => {
            error!("schedule for route {:?}: {}", route_id, e);
            error_text(500, "Could not open stop_times file")
        }
    }
}

fn feed(state: &AppState, kind: FeedKind) -> Response {
    match state.upstream.fetch(kind) {
        Ok(bytes) => Response::from_data("application/json", bytes),
        Err(e) => {
            warn!("upstream {:?}: {}", kind, e);
            error_text(500, &e.to_string())
        }
    }
}

fn dispatch(state: &AppState, request: &Request) -> Response {
    let url = request.url();
    let endpoint = endpoint(&url);
    if endpoint != Endpoint::Root && request.method() != "GET" {
        return error_text(405, "Method not allowed");
    }
    match endpoint {
        Endpoint::Root => Response::text(LIVENESS_TEXT),
        Endpoint::RouteShape(route_id) => route_shape(state, route_id),
        Endpoint::Routes => Response::json(&state.index.routes()),
        Endpoint::Schedule => schedule(state, request),
        Endpoint::Feed(kind) => feed(state, kind)
    }
}

/// Entry point for every request. Preflight requests never reach an endpoint.
pub fn handle(state: &AppState, request: &Request) -> Response {
    let start = Instant::now();
    let response = if request.method() == "OPTIONS" {
        preflight()
    } else {
        dispatch(state, request)
    };
    debug!("{} {} -> {} in {:?}", request.method(), request.raw_url(), response.status_code, start.elapsed());
    with_cors(response, &state.allowed_origin)
}
