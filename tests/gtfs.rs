#[macro_use]
extern crate assert_float_eq;

use std::path::Path;

use ripta_tracker::gtfs::{self, Dataset, GtfsError};
use ripta_tracker::index::{Index, ShapeLookupMiss};
use ripta_tracker::types::DEFAULT_COORDINATE;

const GTFS_PATH: &str = "./tests/fixtures/gtfs_minimal/";

#[test]
fn gtfs_small() {
    let d = Dataset::load(Path::new(GTFS_PATH)).unwrap();
    assert_eq!(d.route_to_shape.len(), 3);
    assert_eq!(d.shape_to_points.len(), 2);
    assert_eq!(d.stop_id_to_code.len(), 3);
    assert_eq!(d.routes.len(), 3);
}

#[test]
fn shape_order_follows_rows() {
    let index = Index::load(Path::new(GTFS_PATH)).unwrap();
    let points = index.route_shape("R1").unwrap();
    assert_eq!(points.len(), 2);
    assert_float_absolute_eq!(points[0].lat, 41.8, 1e-9);
    assert_float_absolute_eq!(points[0].lon, -71.4, 1e-9);
    assert_float_absolute_eq!(points[1].lat, 41.9, 1e-9);
    assert_float_absolute_eq!(points[1].lon, -71.5, 1e-9);
}

#[test]
fn unparsable_lat_is_default() {
    let index = Index::load(Path::new(GTFS_PATH)).unwrap();
    let points = index.route_shape("R2").unwrap();
    assert_eq!(points[1].lat, DEFAULT_COORDINATE);
    assert_float_absolute_eq!(points[1].lon, -71.31, 1e-9);
}

#[test]
fn misses() {
    let index = Index::load(Path::new(GTFS_PATH)).unwrap();
    assert_eq!(index.route_shape("R404"), Err(ShapeLookupMiss::Route));
    assert_eq!(index.route_shape("R3"), Err(ShapeLookupMiss::Shape));
}

#[test]
fn stop_keys_trimmed() {
    let index = Index::load(Path::new(GTFS_PATH)).unwrap();
    assert_eq!(index.stop_code_for_id("200"), Some("C200"));
    assert_eq!(index.stop_name_for_code("C200"), Some("Kennedy Plaza"));
}

#[test]
fn routes_in_file_order_with_duplicates() {
    let index = Index::load(Path::new(GTFS_PATH)).unwrap();
    let ids: Vec<&str> = index.routes().iter().map(|r| r.route_id.as_str()).collect();
    assert_eq!(ids, vec!["R1", "R2", "R1"]);
    assert_eq!(index.routes()[1].route_long_name, "Providence/Newport");
}

#[test]
fn missing_source_is_fatal() {
    let r = Dataset::load(Path::new("./tests/fixtures/gtfs_no_routes/"));
    match r {
        Err(GtfsError::Open { path, .. }) => assert!(path.ends_with(gtfs::ROUTES_FILE)),
        other => panic!("expected open error, got {:?}", other)
    }
}
