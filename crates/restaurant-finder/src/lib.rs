//! # restaurant-finder
//!
//! Restaurant discovery tools for the agent loop: places search, place
//! details, and per-user dining preferences that persist across
//! conversations.
//!
//! ## Tools
//!
//! ```text
//! ┌────────────────────┬──────────────────┬──────────────────────────┐
//! │ search_restaurants │ PlacesClient     │ up to 10 places near a   │
//! │                    │                  │ location                 │
//! │ get_details        │ PlacesClient     │ hours, phone, reviews    │
//! │ save_preference    │ PreferenceStore  │ union-merge, side effect │
//! │ get_preferences    │ PreferenceStore  │ empty default if unknown │
//! └────────────────────┴──────────────────┴──────────────────────────┘
//! ```

pub mod svckit;
pub mod places;
pub mod store;
pub mod model;
pub mod error;

use std::sync::Arc;

use agent_core::ToolRegistry;

pub use error::{FinderError, Result};
pub use model::{Place, PlaceDetails, PreferenceUpdate, Preferences, PriceRange};
pub use places::{GooglePlacesClient, GooglePlacesConfig, MockPlacesClient, PlacesClient};
pub use store::{MemoryPreferenceStore, PreferenceStore, SqlitePreferenceStore};

/// Re-export tools for easy registration
pub mod tools {
    pub use crate::svckit::{
        GetPreferencesTool,
        PlaceDetailsTool,
        SavePreferenceTool,
        SearchRestaurantsTool,
    };
}

/// Registry holding the four restaurant tools
pub fn build_tool_registry(
    places: Arc<dyn PlacesClient>,
    store: Arc<dyn PreferenceStore>,
) -> agent_core::Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.register(tools::SearchRestaurantsTool::new(Arc::clone(&places)))?;
    registry.register(tools::PlaceDetailsTool::new(places))?;
    registry.register(tools::SavePreferenceTool::new(Arc::clone(&store)))?;
    registry.register(tools::GetPreferencesTool::new(store))?;
    Ok(registry)
}

/// System prompt for the restaurant finder agent
pub const RESTAURANT_FINDER_PROMPT: &str = r#"You are a friendly, knowledgeable restaurant discovery assistant. Your goal is to help users find restaurants they will enjoy.

## How You Work

1. **Check preferences first** - Before recommending anything, call `get_preferences` for the user. If nothing is saved yet, ask about cuisines, dietary needs, or budget, one question at a time.
2. **Save what you learn** - Whenever the user mentions a cuisine they like or dislike, a dietary restriction, or a price expectation, call `save_preference` with only those fields.
3. **Search** - Call `search_restaurants` with a focused query built from the request and the saved preferences. Always pass the location given with the request.
4. **Recommend** - Suggest at least three restaurants. For each give the name, address, rating out of 5, price level ($ to $$$$), and one sentence on why it fits.
5. **Details on request** - When the user asks about a specific place, call `get_details` with its place_id.

## Tools Available

- `get_preferences` - Read the user's saved preferences
- `save_preference` - Merge newly learned preferences
- `search_restaurants` - Find restaurants near a location
- `get_details` - Hours, phone, website and reviews for one place

## Tone

Warm, conversational and concise. Prefer natural sentences over walls of bullet points."#;

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::{
        AgentBuilder, Completion, ContentBlock, Role, provider::ScriptedProvider,
    };
    use serde_json::json;

    fn registry() -> ToolRegistry {
        build_tool_registry(
            Arc::new(MockPlacesClient::san_francisco()),
            Arc::new(MemoryPreferenceStore::new()),
        )
        .unwrap()
    }

    #[test]
    fn test_registry_holds_all_tools() {
        assert_eq!(
            registry().names(),
            ["search_restaurants", "get_details", "save_preference", "get_preferences"]
        );
    }

    #[tokio::test]
    async fn test_find_ramen_end_to_end() {
        let provider = Arc::new(ScriptedProvider::new([
            Completion::tool_uses(vec![ContentBlock::tool_use(
                "toolu_1",
                "search_restaurants",
                json!({"query": "ramen", "location": "San Francisco, CA"}),
            )]),
            Completion::text("Try Ramen House on Main St, rated 4.5."),
        ]));

        let agent = AgentBuilder::new()
            .provider(provider.clone())
            .tools(registry())
            .system_prompt(RESTAURANT_FINDER_PROMPT)
            .build()
            .unwrap();

        let result = agent
            .run("u1", "Find me ramen", "San Francisco, CA")
            .await
            .unwrap();

        assert_eq!(result.tool_calls().len(), 1);
        assert!(result.response().contains("Ramen House"));

        let call = &result.tool_calls()[0];
        assert_eq!(call.tool, "search_restaurants");
        assert!(!call.error);
        let places: serde_json::Value = serde_json::from_str(&call.output).unwrap();
        assert_eq!(places[0]["name"], "Ramen House");
        assert_eq!(places[1]["name"], "Spicy Noodles");

        let requests = provider.requests().await;
        assert_eq!(requests[0].system, RESTAURANT_FINDER_PROMPT);
        assert_eq!(requests[0].tool_names.len(), 4);
        assert_eq!(requests[1].messages[2].role, Role::User);
    }

    #[tokio::test]
    async fn test_preferences_flow_through_agent() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let registry = build_tool_registry(Arc::new(MockPlacesClient::new()), store.clone()).unwrap();
        let provider = Arc::new(ScriptedProvider::new([
            Completion::tool_uses(vec![ContentBlock::tool_use(
                "t1",
                "save_preference",
                json!({"user_id": "u1", "dietary_restrictions": ["vegan"]}),
            )]),
            Completion::tool_uses(vec![ContentBlock::tool_use(
                "t2",
                "get_preferences",
                json!({"user_id": "u1"}),
            )]),
            Completion::text("Noted: vegan."),
        ]));

        let agent = AgentBuilder::new()
            .provider(provider)
            .tools(registry)
            .build()
            .unwrap();

        let result = agent.run("u1", "I'm vegan", "Oakland, CA").await.unwrap();

        assert_eq!(result.tool_calls().len(), 2);
        let fetched: serde_json::Value = serde_json::from_str(&result.tool_calls()[1].output).unwrap();
        assert_eq!(fetched["dietary_restrictions"], json!(["vegan"]));
        assert_eq!(store.fetch("u1").await.unwrap().dietary_restrictions, ["vegan"]);
    }

    #[tokio::test]
    async fn test_places_failure_is_contained() {
        let places = Arc::new(GooglePlacesClient::new(GooglePlacesConfig::default()).unwrap());
        let registry = build_tool_registry(places, Arc::new(MemoryPreferenceStore::new())).unwrap();
        let provider = Arc::new(ScriptedProvider::new([
            Completion::tool_uses(vec![ContentBlock::tool_use(
                "t1",
                "search_restaurants",
                json!({"query": "tacos", "location": "Austin, TX"}),
            )]),
            Completion::text("Search is unavailable right now."),
        ]));

        let agent = AgentBuilder::new()
            .provider(provider)
            .tools(registry)
            .build()
            .unwrap();

        let result = agent.run("u1", "tacos?", "Austin, TX").await.unwrap();
        let call = &result.tool_calls()[0];
        assert!(call.error);
        assert!(call.output.contains("GOOGLE_PLACES_API_KEY"));
    }

    #[tokio::test]
    async fn test_places_http_error_keeps_key_out_of_tool_output() {
        use wiremock::{Mock, MockServer, ResponseTemplate, matchers::method};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let places = Arc::new(
            GooglePlacesClient::new(GooglePlacesConfig {
                api_key: Some("sk-places-secret".into()),
                base_url: server.uri(),
                ..Default::default()
            })
            .unwrap(),
        );
        let registry = build_tool_registry(places, Arc::new(MemoryPreferenceStore::new())).unwrap();
        let provider = Arc::new(ScriptedProvider::new([
            Completion::tool_uses(vec![ContentBlock::tool_use(
                "t1",
                "search_restaurants",
                json!({"query": "tacos", "location": "Austin, TX"}),
            )]),
            Completion::text("Search is unavailable right now."),
        ]));

        let agent = AgentBuilder::new()
            .provider(provider.clone())
            .tools(registry)
            .build()
            .unwrap();

        let result = agent.run("u1", "tacos?", "Austin, TX").await.unwrap();
        let call = &result.tool_calls()[0];
        assert!(call.error);
        assert!(call.output.contains("500"));
        assert!(!call.output.contains("sk-places-secret"));

        // The model sees the same contained text
        let requests = provider.requests().await;
        let sent = serde_json::to_string(&requests[1].messages).unwrap();
        assert!(!sent.contains("sk-places-secret"));
    }
}
