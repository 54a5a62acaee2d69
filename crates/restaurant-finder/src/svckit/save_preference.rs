//! Save Preference Tool
//!
//! Merges learned dining preferences into the user's stored record.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use agent_core::{ParameterSchema, Result as CoreResult, Tool, ToolSchema};

use crate::model::{PreferenceUpdate, PriceRange};
use crate::store::PreferenceStore;

#[derive(Clone, Debug, Deserialize)]
pub struct SavePreferenceInput {
    pub user_id: String,
    #[serde(flatten)]
    pub update: PreferenceUpdate,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SavePreferenceOutput {
    pub status: &'static str,
    pub user_id: String,
}

/// Tool for saving user preferences
pub struct SavePreferenceTool {
    store: Arc<dyn PreferenceStore>,
}

impl SavePreferenceTool {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for SavePreferenceTool {
    type Input = SavePreferenceInput;
    type Output = SavePreferenceOutput;

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "save_preference".into(),
            description: "Save or update food/restaurant preferences for the current user. Only pass the fields you want to update; omit the rest.".into(),
            parameters: vec![
                ParameterSchema::string("user_id", "Unique user identifier").required(),
                ParameterSchema::string_list("cuisines_liked", "Cuisine types the user enjoys, e.g. ['Japanese', 'Italian']"),
                ParameterSchema::string_list("cuisines_disliked", "Cuisine types the user dislikes"),
                ParameterSchema::string_list("dietary_restrictions", "Dietary restrictions, e.g. ['vegan', 'gluten-free']"),
                ParameterSchema::string("price_range", "Preferred price range")
                    .with_enum(PriceRange::ALL.iter().map(PriceRange::as_str)),
                ParameterSchema::string_list("liked_place_ids", "Place IDs the user has liked"),
                ParameterSchema::string_list("disliked_place_ids", "Place IDs the user has disliked"),
            ],
        }
    }

    async fn execute(&self, input: SavePreferenceInput) -> CoreResult<SavePreferenceOutput> {
        self.store.upsert(&input.user_id, input.update).await?;
        Ok(SavePreferenceOutput {
            status: "ok",
            user_id: input.user_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryPreferenceStore;
    use agent_core::{AgentError, ToolRegistry};
    use serde_json::json;

    fn setup() -> (Arc<MemoryPreferenceStore>, ToolRegistry) {
        let store = Arc::new(MemoryPreferenceStore::new());
        let mut registry = ToolRegistry::new();
        registry.register(SavePreferenceTool::new(store.clone())).unwrap();
        (store, registry)
    }

    #[tokio::test]
    async fn test_save_reports_ok() {
        let (store, registry) = setup();

        let out = registry
            .dispatch(
                "save_preference",
                json!({"user_id": "u1", "cuisines_liked": ["Japanese"], "price_range": "$$"}),
            )
            .await
            .unwrap();
        assert_eq!(out, json!({"status": "ok", "user_id": "u1"}));

        let prefs = store.fetch("u1").await.unwrap();
        assert_eq!(prefs.cuisines_liked, ["Japanese"]);
        assert_eq!(prefs.price_range, Some(PriceRange::Moderate));
    }

    #[tokio::test]
    async fn test_invalid_price_range_rejected() {
        let (_, registry) = setup();
        let err = registry
            .dispatch("save_preference", json!({"user_id": "u1", "price_range": "cheap"}))
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::ToolValidation(_)));
    }

    #[test]
    fn test_schema_price_enum() {
        let schema = SavePreferenceTool::new(Arc::new(MemoryPreferenceStore::new())).schema();
        let props = &schema.input_schema()["properties"];
        assert_eq!(props["price_range"]["enum"], json!(["$", "$$", "$$$", "$$$$"]));
        assert_eq!(props["cuisines_liked"]["items"]["type"], "string");
    }
}
