//! Elevation provider clients.
//!
//! Two independent services with different wire shapes: the primary takes
//! `{"locations": [...]}` and answers `{"results": [{"elevation": …}]}`;
//! the fallback takes `{"points": [...]}` and answers `{"elevations": […]}`.
//! Both are adapted to a plain `Vec<f64>` so the sampler can merge values
//! from either without caring which one answered.

use crate::error::ProviderError;
use async_trait::async_trait;
use commute_core::Coordinate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Batched elevation lookup: one value per requested point, in order.
#[async_trait]
pub trait ElevationProvider: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    async fn elevations(&self, points: &[Coordinate]) -> Result<Vec<f64>, ProviderError>;
}

#[derive(Debug, Serialize)]
struct Location {
    latitude: f64,
    longitude: f64,
}

fn locations(points: &[Coordinate]) -> Vec<Location> {
    points
        .iter()
        .map(|p| Location {
            latitude: p.lat,
            longitude: p.lon,
        })
        .collect()
}

fn http_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(15))
        .build()
        .expect("Failed to create HTTP client")
}

/// Primary provider (open-elevation wire shape).
pub struct OpenElevationClient {
    client: Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct OpenElevationResult {
    elevation: f64,
}

#[derive(Debug, Deserialize)]
struct OpenElevationResponse {
    results: Option<Vec<OpenElevationResult>>,
}

impl OpenElevationClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: http_client(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl ElevationProvider for OpenElevationClient {
    fn name(&self) -> &str {
        "open-elevation"
    }

    async fn elevations(&self, points: &[Coordinate]) -> Result<Vec<f64>, ProviderError> {
        let body = serde_json::json!({ "locations": locations(points) });
        let response = self.client.post(&self.url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::from_status(status.as_u16()));
        }

        let payload: OpenElevationResponse = response
            .json()
            .await
            .map_err(|err| ProviderError::Malformed(err.to_string()))?;
        let results = payload
            .results
            .ok_or_else(|| ProviderError::Malformed("response missing results".to_string()))?;

        if results.len() != points.len() {
            return Err(ProviderError::Malformed(format!(
                "expected {} elevations, got {}",
                points.len(),
                results.len()
            )));
        }

        Ok(results.into_iter().map(|r| r.elevation).collect())
    }
}

/// Secondary provider, tried when the primary fails after retries. Its
/// response shape is adapted to the primary's internal form here.
pub struct ElevationApiClient {
    client: Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct ElevationApiResponse {
    elevations: Option<Vec<f64>>,
}

impl ElevationApiClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: http_client(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl ElevationProvider for ElevationApiClient {
    fn name(&self) -> &str {
        "elevation-api"
    }

    async fn elevations(&self, points: &[Coordinate]) -> Result<Vec<f64>, ProviderError> {
        let body = serde_json::json!({ "points": locations(points) });
        let response = self.client.post(&self.url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::from_status(status.as_u16()));
        }

        let payload: ElevationApiResponse = response
            .json()
            .await
            .map_err(|err| ProviderError::Malformed(err.to_string()))?;
        let elevations = payload
            .elevations
            .ok_or_else(|| ProviderError::Malformed("response missing elevations".to_string()))?;

        if elevations.len() != points.len() {
            return Err(ProviderError::Malformed(format!(
                "expected {} elevations, got {}",
                points.len(),
                elevations.len()
            )));
        }

        Ok(elevations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_payload_uses_latitude_longitude_names() {
        let points = vec![Coordinate::new(-117.8265, 33.6846)];
        let body = serde_json::json!({ "locations": locations(&points) });
        assert_eq!(body["locations"][0]["latitude"], 33.6846);
        assert_eq!(body["locations"][0]["longitude"], -117.8265);
    }

    #[test]
    fn primary_response_shape_parses() {
        let payload: OpenElevationResponse = serde_json::from_value(serde_json::json!({
            "results": [{"elevation": 12.5}, {"elevation": 14.0}]
        }))
        .unwrap();
        let values: Vec<f64> = payload.results.unwrap().into_iter().map(|r| r.elevation).collect();
        assert_eq!(values, vec![12.5, 14.0]);
    }

    #[test]
    fn fallback_response_shape_parses() {
        let payload: ElevationApiResponse =
            serde_json::from_value(serde_json::json!({ "elevations": [7.0, 8.0, 9.0] })).unwrap();
        assert_eq!(payload.elevations.unwrap(), vec![7.0, 8.0, 9.0]);
    }
}
