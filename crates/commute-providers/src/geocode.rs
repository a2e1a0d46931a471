//! Geocoding and routing against OpenRouteService.

use crate::error::ProviderError;
use async_trait::async_trait;
use commute_core::Coordinate;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// Resolves free-text addresses to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Returns `None` when the provider has no match for the query.
    async fn geocode(&self, query: &str) -> Result<Option<Coordinate>, ProviderError>;
}

/// Produces a driving path between two coordinates.
#[async_trait]
pub trait Router: Send + Sync {
    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<Coordinate>, ProviderError>;
}

/// HTTP client for the OpenRouteService geocode-search and driving-car
/// directions endpoints.
pub struct OrsClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct PointGeometry {
    coordinates: Coordinate,
}

#[derive(Debug, Deserialize)]
struct GeocodeFeature {
    geometry: PointGeometry,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    features: Vec<GeocodeFeature>,
}

#[derive(Debug, Deserialize)]
struct LineGeometry {
    coordinates: Vec<Coordinate>,
}

#[derive(Debug, Deserialize)]
struct RouteFeature {
    geometry: LineGeometry,
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    #[serde(default)]
    features: Vec<RouteFeature>,
}

impl OrsClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl Geocoder for OrsClient {
    async fn geocode(&self, query: &str) -> Result<Option<Coordinate>, ProviderError> {
        let url = format!("{}/geocode/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("text", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::from_status(status.as_u16()));
        }

        let payload: GeocodeResponse = response
            .json()
            .await
            .map_err(|err| ProviderError::Malformed(err.to_string()))?;

        let coord = payload.features.into_iter().next().map(|f| f.geometry.coordinates);
        if coord.is_none() {
            tracing::info!("no geocoding match for {:?}", query);
        }
        Ok(coord)
    }
}

#[async_trait]
impl Router for OrsClient {
    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<Coordinate>, ProviderError> {
        let url = format!("{}/v2/directions/driving-car/geojson", self.base_url);
        let body = json!({
            "coordinates": [origin, destination],
            "instructions": false,
            "preference": "fastest",
            "radiuses": [-1, -1],
        });

        let response = self
            .client
            .post(&url)
            .header("authorization", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::from_status(status.as_u16()));
        }

        let payload: RouteResponse = response
            .json()
            .await
            .map_err(|err| ProviderError::Malformed(err.to_string()))?;

        let coords = payload
            .features
            .into_iter()
            .next()
            .map(|f| f.geometry.coordinates)
            .unwrap_or_default();

        if coords.is_empty() {
            return Err(ProviderError::Malformed(
                "routing response has no geometry".to_string(),
            ));
        }

        tracing::debug!("routed {} coordinate points", coords.len());
        Ok(coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geocode_response_extracts_first_feature() {
        let payload: GeocodeResponse = serde_json::from_value(serde_json::json!({
            "features": [
                {"geometry": {"coordinates": [-117.8265, 33.6846], "type": "Point"}},
                {"geometry": {"coordinates": [0.0, 0.0], "type": "Point"}}
            ]
        }))
        .unwrap();
        let first = payload.features.into_iter().next().unwrap();
        assert_eq!(first.geometry.coordinates, Coordinate::new(-117.8265, 33.6846));
    }

    #[test]
    fn empty_feature_list_parses() {
        let payload: GeocodeResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(payload.features.is_empty());
    }

    #[test]
    fn route_response_extracts_line_string() {
        let payload: RouteResponse = serde_json::from_value(serde_json::json!({
            "features": [{
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[-117.8, 33.6], [-117.9, 33.7]]
                }
            }]
        }))
        .unwrap();
        let coords = &payload.features[0].geometry.coordinates;
        assert_eq!(coords.len(), 2);
        assert_eq!(coords[1], Coordinate::new(-117.9, 33.7));
    }
}
