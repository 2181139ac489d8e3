use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::schedule::STOP_TIMES_FILE;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("invalid config {path:?}: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    #[serde(default = "default_gtfs_path")]
    pub gtfs_path: PathBuf,
    #[serde(default = "default_stop_times_file")]
    pub stop_times_file: String,
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
    #[serde(default = "default_trip_updates_url")]
    pub trip_updates_url: String,
    #[serde(default = "default_vehicle_positions_url")]
    pub vehicle_positions_url: String,
    #[serde(default = "default_service_alerts_url")]
    pub service_alerts_url: String,
    #[serde(default = "default_upstream_timeout_secs")]
    pub upstream_timeout_secs: u64
}

fn default_listen_addr() -> String { "0.0.0.0:8080".to_string() }
fn default_gtfs_path() -> PathBuf { PathBuf::from("RIPTA-GTFS") }
fn default_stop_times_file() -> String { STOP_TIMES_FILE.to_string() }
fn default_allowed_origin() -> String { "http://localhost:5173".to_string() }
fn default_trip_updates_url() -> String { "http://realtime.ripta.com:81/api/tripupdates?format=json".to_string() }
fn default_vehicle_positions_url() -> String { "http://realtime.ripta.com:81/api/vehiclepositions?format=json".to_string() }
fn default_service_alerts_url() -> String { "http://realtime.ripta.com:81/api/servicealerts?format=json".to_string() }
fn default_upstream_timeout_secs() -> u64 { 30 }

impl Default for Config {
    fn default() -> Config {
        Config {
            listen_addr: default_listen_addr(),
            gtfs_path: default_gtfs_path(),
            stop_times_file: default_stop_times_file(),
            allowed_origin: default_allowed_origin(),
            trip_updates_url: default_trip_updates_url(),
            vehicle_positions_url: default_vehicle_positions_url(),
            service_alerts_url: default_service_alerts_url(),
            upstream_timeout_secs: default_upstream_timeout_secs()
        }
    }
}

impl Config {
    pub fn from_slice(buf: &[u8], path: &Path) -> Result<Config, ConfigError> {
        serde_json::from_slice(buf).map_err(|e| ConfigError::Parse { path: path.to_path_buf(), source: e })
    }

    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let buf = std::fs::read(path).map_err(|e| ConfigError::Read { path: path.to_path_buf(), source: e })?;
        Config::from_slice(&buf, path)
    }

    /// Loads the file if one is given, otherwise the built-in defaults.
    pub fn load_or_default(path: Option<&str>) -> Result<Config, ConfigError> {
        match path {
            Some(p) => Config::load(Path::new(p)),
            None => Ok(Config::default())
        }
    }

    pub fn stop_times_path(&self) -> PathBuf {
        self.gtfs_path.join(&self.stop_times_file)
    }
}
