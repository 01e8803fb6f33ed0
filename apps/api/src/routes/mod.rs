pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::search::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Ask-AI API
        .route(
            "/ask-ai/dormitories",
            post(handlers::handle_ask_dormitories),
        )
        .route("/ask-ai/:dorm_id", post(handlers::handle_ask_dorm))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::catalog::store::CatalogStore;
    use crate::llm_client::CompletionBackend;
    use crate::search::narrator::CATALOG_FALLBACK;
    use crate::search::pipeline::{BLOCKED_REGION_REPLY, GREETING_REPLY};
    use crate::test_support::{
        dorm_row, room_row, test_state, FailingCatalogStore, FailingCompletion,
        InMemoryCatalogStore, RecordingCompletion,
    };

    fn store() -> InMemoryCatalogStore {
        InMemoryCatalogStore::new()
            .with_dorm(dorm_row(1, "Sunrise Residences", "Mandaue City"))
            .with_dorm(dorm_row(2, "Harbor View", "Lapu-Lapu City"))
            .with_room(room_row(10, 1, "2000", &["WiFi"]))
            .with_room(room_row(11, 1, "3500", &["Aircon"]))
            .with_room(room_row(20, 2, "1800", &[]))
    }

    async fn send(
        store: impl CatalogStore + 'static,
        backend: Arc<dyn CompletionBackend>,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let app = build_router(test_state(Arc::new(store), backend));
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        let request = match body {
            Some(body) => request.body(Body::from(body.to_string())).unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_missing_question_is_bad_request() {
        let (status, body) = send(
            store(),
            Arc::new(FailingCompletion),
            "/ask-ai/dormitories",
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "No question provided");
        assert_eq!(body["result"], json!([]));
        assert_eq!(body["recommendations"], json!([]));
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_empty_body_is_bad_request_with_json() {
        let (status, body) = send(
            store(),
            Arc::new(FailingCompletion),
            "/ask-ai/dormitories",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "No question provided");
        assert_eq!(body["result"], json!([]));
    }

    #[tokio::test]
    async fn test_greeting_reply() {
        let (status, body) = send(
            store(),
            Arc::new(FailingCompletion),
            "/ask-ai/dormitories",
            Some(json!({"question": "hi"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], GREETING_REPLY);
        assert_eq!(body["result"], json!([]));
        assert_eq!(body["recommendations"], json!([]));
    }

    #[tokio::test]
    async fn test_blocked_region_reply() {
        let (status, body) = send(
            store(),
            Arc::new(FailingCompletion),
            "/ask-ai/dormitories",
            Some(json!({"question": "rooms in Cebu"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], BLOCKED_REGION_REPLY);
        assert_eq!(body["result"], json!([]));
    }

    #[tokio::test]
    async fn test_search_with_summary() {
        let backend = Arc::new(RecordingCompletion::replying("Try Sunrise Residences."));
        let (status, body) = send(
            store(),
            backend.clone(),
            "/ask-ai/dormitories",
            Some(json!({"question": "room in Mandaue under 3000"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Try Sunrise Residences.");
        assert_eq!(body["result"].as_array().unwrap().len(), 1);
        assert_eq!(body["result"][0]["dormID"], 1);
        assert_eq!(body["result"][0]["rooms"][0]["roomID"], 10);
        assert_eq!(body["result"][0]["rooms"].as_array().unwrap().len(), 1);
        assert_eq!(body["recommendations"], body["result"]);
        assert_eq!(backend.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_search_succeeds_when_ai_unavailable() {
        let (status, body) = send(
            store(),
            Arc::new(FailingCompletion),
            "/ask-ai/dormitories",
            Some(json!({"question": "any room?"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], CATALOG_FALLBACK);
        assert_eq!(body["result"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_no_match_skips_narrator() {
        let backend = Arc::new(RecordingCompletion::replying("unused"));
        let (status, body) = send(
            store(),
            backend.clone(),
            "/ask-ai/dormitories",
            Some(json!({"question": "room in lapu-lapu under 900"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["message"],
            "No available rooms in Lapu-Lapu within the specified price range."
        );
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_internal_error() {
        let (status, body) = send(
            FailingCatalogStore,
            Arc::new(FailingCompletion),
            "/ask-ai/dormitories",
            Some(json!({"question": "room in mandaue"})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "A database error occurred");
        assert_eq!(body["result"], json!([]));
        assert_eq!(body["recommendations"], json!([]));
    }

    #[tokio::test]
    async fn test_unknown_dorm_is_not_found_without_ai_call() {
        let backend = Arc::new(RecordingCompletion::replying("unused"));
        let (status, body) = send(
            store(),
            backend.clone(),
            "/ask-ai/404",
            Some(json!({"question": "Is it near a school?"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "Dorm not found");
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_non_numeric_dorm_id_is_not_found() {
        let (status, _) = send(
            store(),
            Arc::new(FailingCompletion),
            "/ask-ai/sunrise",
            Some(json!({"question": "hello"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_single_dorm_answer() {
        let backend = Arc::new(RecordingCompletion::replying("Room 10 has WiFi."));
        let (status, body) = send(
            store(),
            backend.clone(),
            "/ask-ai/1",
            Some(json!({"question": "Which room has WiFi?"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["answer"], "Room 10 has WiFi.");
        assert_eq!(body["dorm"]["dormName"], "Sunrise Residences");
        assert_eq!(body["rooms"].as_array().unwrap().len(), 2);

        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].prompt.ends_with("Tenant Question: Which room has WiFi?"));
        assert_eq!(calls[0].temperature, None);
    }

    #[tokio::test]
    async fn test_single_dorm_default_question() {
        let backend = Arc::new(RecordingCompletion::replying("A quiet dorm."));
        let (status, _) = send(store(), backend.clone(), "/ask-ai/2", Some(json!({}))).await;

        assert_eq!(status, StatusCode::OK);
        assert!(backend.calls()[0]
            .prompt
            .ends_with("Tenant Question: Tell me about Harbor View."));
    }
}
