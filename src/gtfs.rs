use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{info, warn};

use crate::types::{self, Route, RouteId, ShapeId, ShapePoint, StopCode, StopId};

pub const TRIPS_FILE: &str = "trips.txt";
pub const SHAPES_FILE: &str = "shapes.txt";
pub const STOPS_FILE: &str = "stops.txt";
pub const ROUTES_FILE: &str = "routes.txt";

#[derive(Error, Debug)]
pub enum GtfsError {
    #[error("cannot open {path:?}: {source}")]
    Open { path: PathBuf, source: std::io::Error },
}

/// Parses a coordinate as-is, falling back to `DEFAULT_COORDINATE` on malformed text.
/// Padding is not stripped, so " 41.8" is malformed.
pub fn parse_or_default(text: &str) -> f64 {
    text.parse::<f64>().unwrap_or(types::DEFAULT_COORDINATE)
}

pub fn open(path: &Path) -> Result<csv::Reader<File>, GtfsError> {
    let file = File::open(path).map_err(|e| GtfsError::Open { path: path.to_path_buf(), source: e })?;
    Ok(reader(file))
}

pub fn reader<R: Read>(rdr: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(rdr)
}

/// Feeds every data row to `f` in file order. The header row is skipped by the reader.
/// The scan ends at the first record that fails to read or for which `f` returns `None`
/// (a required column is missing). Returns the number of rows handed to `f` successfully.
pub fn scan_rows<R, F>(mut reader: csv::Reader<R>, source: &str, mut f: F) -> usize
where
    R: Read,
    F: FnMut(&csv::StringRecord) -> Option<()>,
{
    let mut record = csv::StringRecord::new();
    let mut count = 0;
    loop {
        match reader.read_record(&mut record) {
            Ok(true) => {},
            Ok(false) => break,
            Err(e) => {
                warn!("{}: stopped reading after {} rows: {}", source, count, e);
                break;
            }
        }
        if f(&record).is_none() {
            warn!("{}: stopped reading after {} rows: row has only {} columns", source, count, record.len());
            break;
        }
        count += 1;
    }
    count
}

pub fn read_trips<R: Read>(reader: csv::Reader<R>) -> FxHashMap<RouteId, ShapeId> {
    let mut route_to_shape = FxHashMap::default();
    scan_rows(reader, TRIPS_FILE, |r| {
        let route_id = r.get(0)?;
        let shape_id = r.get(6)?;
        route_to_shape.insert(route_id.to_string(), shape_id.to_string());
        Some(())
    });
    route_to_shape
}

pub fn read_shapes<R: Read>(reader: csv::Reader<R>) -> FxHashMap<ShapeId, Vec<ShapePoint>> {
    let mut shape_to_points: FxHashMap<ShapeId, Vec<ShapePoint>> = FxHashMap::default();
    scan_rows(reader, SHAPES_FILE, |r| {
        let shape_id = r.get(0)?;
        let lat = parse_or_default(r.get(1)?);
        let lon = parse_or_default(r.get(2)?);
        shape_to_points.entry(shape_id.to_string()).or_default().push(ShapePoint::new(lat, lon));
        Some(())
    });
    shape_to_points
}

pub fn read_stops<R: Read>(reader: csv::Reader<R>) -> (FxHashMap<StopId, StopCode>, FxHashMap<StopCode, String>) {
    let mut id_to_code = FxHashMap::default();
    let mut code_to_name = FxHashMap::default();
    scan_rows(reader, STOPS_FILE, |r| {
        let stop_id = r.get(0)?.trim();
        let stop_code = r.get(1)?.trim();
        let stop_name = r.get(2)?;
        id_to_code.insert(stop_id.to_string(), stop_code.to_string());
        code_to_name.insert(stop_code.to_string(), stop_name.to_string());
        Some(())
    });
    (id_to_code, code_to_name)
}

pub fn read_routes<R: Read>(reader: csv::Reader<R>) -> Vec<Route> {
    let mut routes = vec![];
    scan_rows(reader, ROUTES_FILE, |r| {
        routes.push(Route::new(r.get(0)?.to_string(), r.get(2)?.to_string()));
        Some(())
    });
    routes
}

pub fn load_trips(path: &Path) -> Result<FxHashMap<RouteId, ShapeId>, GtfsError> {
    Ok(read_trips(open(path)?))
}

pub fn load_shapes(path: &Path) -> Result<FxHashMap<ShapeId, Vec<ShapePoint>>, GtfsError> {
    Ok(read_shapes(open(path)?))
}

pub fn load_stops(path: &Path) -> Result<(FxHashMap<StopId, StopCode>, FxHashMap<StopCode, String>), GtfsError> {
    Ok(read_stops(open(path)?))
}

pub fn load_routes(path: &Path) -> Result<Vec<Route>, GtfsError> {
    Ok(read_routes(open(path)?))
}

/// The four static tables, as parsed from a GTFS directory.
#[derive(Debug, Default)]
pub struct Dataset {
    pub route_to_shape: FxHashMap<RouteId, ShapeId>,
    pub shape_to_points: FxHashMap<ShapeId, Vec<ShapePoint>>,
    pub stop_id_to_code: FxHashMap<StopId, StopCode>,
    pub stop_code_to_name: FxHashMap<StopCode, String>,
    pub routes: Vec<Route>
}

impl Dataset {
    pub fn load(gtfs_path: &Path) -> Result<Dataset, GtfsError> {
        let route_to_shape = load_trips(&gtfs_path.join(TRIPS_FILE))?;
        let shape_to_points = load_shapes(&gtfs_path.join(SHAPES_FILE))?;
        let (stop_id_to_code, stop_code_to_name) = load_stops(&gtfs_path.join(STOPS_FILE))?;
        let routes = load_routes(&gtfs_path.join(ROUTES_FILE))?;
        info!(
            "loaded {:?}: {} route shapes, {} shapes, {} stops, {} stop codes, {} routes",
            gtfs_path, route_to_shape.len(), shape_to_points.len(), stop_id_to_code.len(), stop_code_to_name.len(), routes.len()
        );
        Ok(Dataset {
            route_to_shape: route_to_shape,
            shape_to_points: shape_to_points,
            stop_id_to_code: stop_id_to_code,
            stop_code_to_name: stop_code_to_name,
            routes: routes
        })
    }
}
