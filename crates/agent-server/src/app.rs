//! Router

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{health_check, run_handler};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/run", post(run_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use agent_core::{AgentBuilder, AgentError, Completion, ContentBlock, provider::ScriptedProvider};
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use restaurant_finder::{
        MemoryPreferenceStore, MockPlacesClient, RESTAURANT_FINDER_PROMPT, build_tool_registry,
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app_with(provider: Arc<ScriptedProvider>) -> Router {
        let tools = build_tool_registry(
            Arc::new(MockPlacesClient::san_francisco()),
            Arc::new(MemoryPreferenceStore::new()),
        )
        .unwrap();
        let agent = AgentBuilder::new()
            .provider(provider)
            .tools(tools)
            .system_prompt(RESTAURANT_FINDER_PROMPT)
            .build()
            .unwrap();
        build_router(AppState::new(agent))
    }

    fn run_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/run")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = app_with(Arc::new(ScriptedProvider::default()));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_run_returns_response_and_log() {
        let provider = Arc::new(ScriptedProvider::new([
            Completion::tool_uses(vec![ContentBlock::tool_use(
                "toolu_1",
                "search_restaurants",
                json!({"query": "ramen", "location": "San Francisco, CA"}),
            )]),
            Completion::text("Ramen House is a great pick."),
        ]));

        let response = app_with(provider)
            .oneshot(run_request(json!({
                "user_id": "u1",
                "message": "Find me ramen",
                "location": "San Francisco, CA"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["response"], "Ramen House is a great pick.");
        assert_eq!(body["tool_calls"].as_array().unwrap().len(), 1);
        assert_eq!(body["tool_calls"][0]["tool"], "search_restaurants");
        assert_eq!(body["tool_calls"][0]["input"]["query"], "ramen");
        assert_eq!(body["tool_calls"][0]["error"], false);
    }

    #[tokio::test]
    async fn test_run_failure_maps_to_500() {
        let provider = Arc::new(ScriptedProvider::default());
        provider
            .push_error(AgentError::ProviderUnavailable("connection refused".into()))
            .await;

        let response = app_with(provider)
            .oneshot(run_request(json!({
                "user_id": "u1",
                "message": "hi",
                "location": "Berlin"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["code"], "AGENT_ERROR");
        assert!(body.get("tool_calls").is_none());
        assert!(body["error"].as_str().unwrap().contains("unavailable"));
    }
}
