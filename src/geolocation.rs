//! Device position providers for "use my location"

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::GeolocationSource;
use crate::state::Coordinates;

pub const DEFAULT_IP_ENDPOINT: &str = "http://ip-api.com/json/";

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum GeolocationMode {
    /// Approximate the position from the public IP address
    Ip,
    /// No geolocation capability
    Off,
}

#[derive(thiserror::Error, Debug)]
pub enum GeolocationError {
    #[error("location request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("location lookup rejected: {0}")]
    Rejected(String),
    #[error("location service returned no coordinates")]
    MissingCoordinates,
}

/// Source of the current position. Exactly two outcomes: a position or an error.
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// Build the provider for a configured source; `None` means the capability is absent.
pub fn geolocator_for(source: &GeolocationSource) -> Option<Arc<dyn Geolocator>> {
    match source {
        GeolocationSource::Disabled => None,
        GeolocationSource::Ip { endpoint } => Some(Arc::new(IpGeolocator::new(endpoint.clone()))),
        GeolocationSource::Fixed(coords) => Some(Arc::new(FixedPosition(*coords))),
    }
}

// ============================================================================
// IP lookup
// ============================================================================

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// ip-api.com style lookup
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    http: reqwest::Client,
    endpoint: String,
}

impl IpGeolocator {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Geolocator for IpGeolocator {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        tracing::debug!(endpoint = %self.endpoint, "looking up position by IP");

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("fields", "status,message,lat,lon")])
            .send()
            .await?
            .error_for_status()?;
        let data: IpLookupResponse = response.json().await?;

        if data.status != "success" {
            return Err(GeolocationError::Rejected(
                data.message.unwrap_or(data.status),
            ));
        }
        match (data.lat, data.lon) {
            (Some(lat), Some(lon)) => Ok(Coordinates { lat, lon }),
            _ => Err(GeolocationError::MissingCoordinates),
        }
    }
}

// ============================================================================
// Fixed position
// ============================================================================

/// Always answers with the configured coordinates
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinates);

#[async_trait]
impl Geolocator for FixedPosition {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        Ok(self.0)
    }
}
