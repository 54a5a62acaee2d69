//! Restaurant Search Tool
//!
//! Free-text restaurant search near a location.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use agent_core::{ParameterSchema, Result as CoreResult, Tool, ToolSchema};

use crate::model::Place;
use crate::places::{DEFAULT_RADIUS_METERS, PlacesClient};

#[derive(Clone, Debug, Deserialize)]
pub struct SearchRestaurantsInput {
    pub query: String,
    pub location: String,
    #[serde(default = "default_radius")]
    pub radius: u32,
}

fn default_radius() -> u32 {
    DEFAULT_RADIUS_METERS
}

/// Tool for searching restaurants
pub struct SearchRestaurantsTool {
    places: Arc<dyn PlacesClient>,
}

impl SearchRestaurantsTool {
    pub fn new(places: Arc<dyn PlacesClient>) -> Self {
        Self { places }
    }
}

#[async_trait]
impl Tool for SearchRestaurantsTool {
    type Input = SearchRestaurantsInput;
    type Output = Vec<Place>;

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "search_restaurants".into(),
            description: "Search for restaurants near a location using a free-text query. Returns up to 10 results with name, address, rating, and price level.".into(),
            parameters: vec![
                ParameterSchema::string("query", "Search query, e.g. 'spicy ramen' or 'vegetarian Italian'").required(),
                ParameterSchema::string("location", "City or address to search near, e.g. 'San Francisco, CA'").required(),
                ParameterSchema::integer("radius", "Search radius in metres (default 5000)")
                    .with_default(json!(DEFAULT_RADIUS_METERS)),
            ],
        }
    }

    async fn execute(&self, input: SearchRestaurantsInput) -> CoreResult<Vec<Place>> {
        let places = self
            .places
            .search(&input.query, &input.location, input.radius)
            .await?;

        tracing::debug!(
            client = self.places.name(),
            query = %input.query,
            results = places.len(),
            "Restaurant search complete"
        );
        Ok(places)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::places::MockPlacesClient;
    use agent_core::ToolRegistry;

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry
            .register(SearchRestaurantsTool::new(Arc::new(MockPlacesClient::san_francisco())))
            .unwrap();
        registry
    }

    #[tokio::test]
    async fn test_search_returns_places() {
        let out = registry()
            .dispatch("search_restaurants", json!({"query": "ramen", "location": "San Francisco, CA"}))
            .await
            .unwrap();

        let places = out.as_array().unwrap();
        assert_eq!(places.len(), 2);
        assert_eq!(places[0]["name"], "Ramen House");
        assert_eq!(places[1]["place_id"], "ChIJtest2");
    }

    #[tokio::test]
    async fn test_missing_location_is_validation_error() {
        let err = registry()
            .dispatch("search_restaurants", json!({"query": "ramen"}))
            .await
            .unwrap_err();
        assert!(matches!(err, agent_core::AgentError::ToolValidation(_)));
    }

    #[test]
    fn test_schema_requires_query_and_location() {
        let schema = SearchRestaurantsTool::new(Arc::new(MockPlacesClient::new())).schema();
        let input_schema = schema.input_schema();
        assert_eq!(input_schema["required"], json!(["query", "location"]));
        assert_eq!(input_schema["properties"]["radius"]["default"], 5000);
    }
}
