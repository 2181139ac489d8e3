use serde::{Serialize, Deserialize};

pub type RouteId = String;
pub type ShapeId = String;
pub type StopId = String;
pub type StopCode = String;

/// Value used for a latitude or longitude that does not parse.
pub const DEFAULT_COORDINATE: f64 = 0.0;

/// Stop name reported when neither the stop id nor its code resolve to a name.
pub const UNKNOWN_STOP_NAME: &str = "Unknown Stop";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ShapePoint {
    pub lat: f64,
    pub lon: f64
}

impl ShapePoint {
    pub fn new(lat: f64, lon: f64) -> ShapePoint {
        ShapePoint { lat: lat, lon: lon }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Route {
    pub route_id: RouteId,
    pub route_long_name: String
}

impl Route {
    pub fn new(route_id: String, route_long_name: String) -> Route {
        Route {
            route_id: route_id,
            route_long_name: route_long_name
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ScheduleEntry {
    pub stop_name: String,
    pub arrival_time: String,
    pub departure_time: String
}
