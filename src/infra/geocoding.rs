//! Address to coordinate lookup through the MapQuest geocoding API.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::domain::Coordinate;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Resolves a street address to a coordinate.
///
/// Lookups never fail: an unknown address, a timeout, a transport error and a
/// malformed payload all yield `None`.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn locate(&self, address: &str) -> Option<Coordinate>;
}

#[derive(Serialize)]
struct GeocodeRequest<'a> {
    location: &'a str,
}

#[derive(Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    locations: Vec<GeocodeLocation>,
}

#[derive(Deserialize)]
struct GeocodeLocation {
    #[serde(rename = "latLng")]
    lat_lng: Option<LatLng>,
}

#[derive(Deserialize)]
struct LatLng {
    lat: Option<f64>,
    lng: Option<f64>,
}

impl GeocodeResponse {
    fn first_coordinate(self) -> Option<Coordinate> {
        let lat_lng = self
            .results
            .into_iter()
            .next()?
            .locations
            .into_iter()
            .next()?
            .lat_lng?;

        Some(Coordinate::new(lat_lng.lat?, lat_lng.lng?))
    }
}

/// MapQuest client holding one HTTP client and one API key.
pub struct MapQuestClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl MapQuestClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.mapquest_base_url.clone(),
            config.mapquest_api_key(),
            config.geocoding_timeout,
        )
    }

    async fn request(&self, address: &str) -> Result<Option<Coordinate>, reqwest::Error> {
        let response = self
            .http
            .post(format!("{}/address", self.base_url))
            .query(&[("key", self.api_key.as_str())])
            .json(&GeocodeRequest { location: address })
            .send()
            .await?
            .error_for_status()?
            .json::<GeocodeResponse>()
            .await?;

        Ok(response.first_coordinate())
    }
}

#[async_trait]
impl Geocoder for MapQuestClient {
    async fn locate(&self, address: &str) -> Option<Coordinate> {
        match self.request(address).await {
            Ok(Some(coordinate)) => Some(coordinate),
            Ok(None) => {
                tracing::debug!(address, "Geocoder returned no coordinate");
                None
            }
            Err(e) => {
                tracing::warn!(address, error = %e, "Geocoding request failed");
                None
            }
        }
    }
}
