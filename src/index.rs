use std::path::Path;

use rustc_hash::FxHashMap;

use crate::gtfs::{Dataset, GtfsError};
use crate::types::{Route, RouteId, ShapeId, ShapePoint, StopCode, StopId};

/// Read-only lookup tables built once at startup and shared between request handlers.
#[derive(Debug, Default)]
pub struct Index {
    route_to_shape: FxHashMap<RouteId, ShapeId>,
    shape_to_points: FxHashMap<ShapeId, Vec<ShapePoint>>,
    stop_id_to_code: FxHashMap<StopId, StopCode>,
    stop_code_to_name: FxHashMap<StopCode, String>,
    routes: Vec<Route>
}

impl Index {
    pub fn from_dataset(dataset: Dataset) -> Index {
        Index {
            route_to_shape: dataset.route_to_shape,
            shape_to_points: dataset.shape_to_points,
            stop_id_to_code: dataset.stop_id_to_code,
            stop_code_to_name: dataset.stop_code_to_name,
            routes: dataset.routes
        }
    }

    pub fn load(gtfs_path: &Path) -> Result<Index, GtfsError> {
        Ok(Index::from_dataset(Dataset::load(gtfs_path)?))
    }

    pub fn shape_id_for_route(&self, route_id: &str) -> Option<&str> {
        self.route_to_shape.get(route_id).map(|s| s.as_str())
    }

    pub fn shape_points(&self, shape_id: &str) -> Option<&[ShapePoint]> {
        self.shape_to_points.get(shape_id).map(|p| p.as_slice())
    }

    pub fn stop_code_for_id(&self, stop_id: &str) -> Option<&str> {
        self.stop_id_to_code.get(stop_id).map(|s| s.as_str())
    }

    pub fn stop_name_for_code(&self, stop_code: &str) -> Option<&str> {
        self.stop_code_to_name.get(stop_code).map(|s| s.as_str())
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Shape polyline of a route. A shape without points counts as unknown.
    pub fn route_shape(&self, route_id: &str) -> Result<&[ShapePoint], ShapeLookupMiss> {
        let shape_id = self.shape_id_for_route(route_id).ok_or(ShapeLookupMiss::Route)?;
        match self.shape_points(shape_id) {
            Some(points) if !points.is_empty() => Ok(points),
            _ => Err(ShapeLookupMiss::Shape)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeLookupMiss {
    Route,
    Shape
}
