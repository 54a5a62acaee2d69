//! Place Details Tool

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use agent_core::{ParameterSchema, Result as CoreResult, Tool, ToolSchema};

use crate::model::PlaceDetails;
use crate::places::PlacesClient;

#[derive(Clone, Debug, Deserialize)]
pub struct PlaceDetailsInput {
    pub place_id: String,
}

/// Tool for fetching hours, phone, website and reviews of one place
pub struct PlaceDetailsTool {
    places: Arc<dyn PlacesClient>,
}

impl PlaceDetailsTool {
    pub fn new(places: Arc<dyn PlacesClient>) -> Self {
        Self { places }
    }
}

#[async_trait]
impl Tool for PlaceDetailsTool {
    type Input = PlaceDetailsInput;
    type Output = PlaceDetails;

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_details".into(),
            description: "Fetch detailed information (hours, phone, website, reviews) for a restaurant by its place_id.".into(),
            parameters: vec![
                ParameterSchema::string("place_id", "Place identifier returned by search_restaurants").required(),
            ],
        }
    }

    async fn execute(&self, input: PlaceDetailsInput) -> CoreResult<PlaceDetails> {
        Ok(self.places.details(&input.place_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::places::MockPlacesClient;
    use agent_core::ToolRegistry;
    use serde_json::json;

    #[tokio::test]
    async fn test_details_known_and_unknown() {
        let mut registry = ToolRegistry::new();
        registry
            .register(PlaceDetailsTool::new(Arc::new(MockPlacesClient::san_francisco())))
            .unwrap();

        let found = registry
            .dispatch("get_details", json!({"place_id": "ChIJtest1"}))
            .await
            .unwrap();
        assert_eq!(found["name"], "Ramen House");
        assert_eq!(found["phone"], "(415) 555-0101");

        let missing = registry
            .dispatch("get_details", json!({"place_id": "ChIJnope"}))
            .await
            .unwrap();
        assert_eq!(missing, json!({}));
    }
}
