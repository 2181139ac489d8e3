use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Failed to build HTTP client: {0}")]
    Client(reqwest::Error),
    #[error("Failed to fetch data: {0}")]
    Request(reqwest::Error),
    #[error("API returned status: {0}")]
    Status(u16),
    #[error("Failed to read response body: {0}")]
    Body(reqwest::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    TripUpdates,
    VehiclePositions,
    ServiceAlerts
}

/// Realtime feeds of the transit provider. Bodies are returned untouched.
pub struct Upstream {
    client: Client,
    trip_updates_url: String,
    vehicle_positions_url: String,
    service_alerts_url: String
}

impl Upstream {
    pub fn new(config: &Config) -> Result<Upstream, ProxyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()
            .map_err(ProxyError::Client)?;
        Ok(Upstream {
            client: client,
            trip_updates_url: config.trip_updates_url.clone(),
            vehicle_positions_url: config.vehicle_positions_url.clone(),
            service_alerts_url: config.service_alerts_url.clone()
        })
    }

    pub fn url(&self, kind: FeedKind) -> &str {
        match kind {
            FeedKind::TripUpdates => &self.trip_updates_url,
            FeedKind::VehiclePositions => &self.vehicle_positions_url,
            FeedKind::ServiceAlerts => &self.service_alerts_url
        }
    }

    pub fn fetch(&self, kind: FeedKind) -> Result<Vec<u8>, ProxyError> {
        let url = self.url(kind);
        debug!("fetching {:?} from {}", kind, url);
        let response = self.client.get(url).send().map_err(ProxyError::Request)?;
        if response.status() != StatusCode::OK {
            return Err(ProxyError::Status(response.status().as_u16()));
        }
        let body = response.bytes().map_err(ProxyError::Body)?;
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_from_config() {
        let mut c = Config::default();
        c.service_alerts_url = "http://localhost:1/alerts".to_string();
        let u = Upstream::new(&c).unwrap();
        assert_eq!(u.url(FeedKind::ServiceAlerts), "http://localhost:1/alerts");
        assert_eq!(u.url(FeedKind::TripUpdates), "http://realtime.ripta.com:81/api/tripupdates?format=json");
    }

    #[test]
    fn status_message() {
        assert_eq!(ProxyError::Status(503).to_string(), "API returned status: 503");
    }
}
