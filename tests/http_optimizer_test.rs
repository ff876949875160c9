use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use cart_optimizer::model::{Item, OptimizationRequest};
use cart_optimizer::optimizer::{HttpOptimizer, OptimizationService, OptimizeError};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// Serves `router` on an ephemeral port and returns its base URL.
async fn spawn_stub(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn request() -> OptimizationRequest {
    OptimizationRequest {
        budget: 20.0,
        items: vec![
            Item::new("A", 10.0, 5.0).unwrap(),
            Item::new("B", 20.0, 15.0).unwrap(),
        ],
    }
}

fn optimizer(base_url: &str) -> HttpOptimizer {
    HttpOptimizer::new(base_url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_success_with_session_id() {
    let received: Arc<Mutex<Option<String>>> = Arc::default();
    let sink = received.clone();
    let router = Router::new().route(
        "/optimize",
        post(move |body: String| async move {
            *sink.lock().unwrap() = Some(body);
            Json(json!({
                "selectedItems": [{"name": "B", "price": 20, "value": 15}],
                "totalPrice": 20,
                "totalValue": 15,
                "sessionId": "ABC123"
            }))
        }),
    );
    let base = spawn_stub(router).await;

    let result = optimizer(&base).optimize(&request()).await.unwrap();

    assert_eq!(result.selected_items, vec![Item::new("B", 20.0, 15.0).unwrap()]);
    assert_eq!(result.total_price, 20.0);
    assert_eq!(result.total_value, 15.0);
    assert_eq!(result.session_id.as_deref(), Some("ABC123"));

    // Whole amounts go out as integers.
    let body = received.lock().unwrap().clone().unwrap();
    assert_eq!(
        body,
        r#"{"budget":20,"items":[{"name":"A","price":10,"value":5},{"name":"B","price":20,"value":15}]}"#
    );
}

#[tokio::test]
async fn test_success_without_session_id_and_path_prefix() {
    let router = Router::new().route(
        "/api/optimize",
        post(|| async {
            Json(json!({"selectedItems": [], "totalPrice": 0, "totalValue": 0}))
        }),
    );
    let base = spawn_stub(router).await;

    let result = optimizer(&format!("{base}/api"))
        .optimize(&request())
        .await
        .unwrap();
    assert!(result.selected_items.is_empty());
    assert_eq!(result.session_id, None);
}

#[tokio::test]
async fn test_service_error_with_message() {
    let router = Router::new().route(
        "/optimize",
        post(|| async {
            (StatusCode::BAD_REQUEST, Json(json!({"error": "budget too low"}))).into_response()
        }),
    );
    let base = spawn_stub(router).await;

    let err = optimizer(&base).optimize(&request()).await.unwrap_err();
    assert_eq!(
        err,
        OptimizeError::Service {
            status: 400,
            message: Some("budget too low".into()),
        }
    );
    assert_eq!(err.notice(), "budget too low");
}

#[tokio::test]
async fn test_blank_service_message_is_absent() {
    for blank in ["", "   "] {
        let router = Router::new().route(
            "/optimize",
            post(move || async move {
                (StatusCode::BAD_REQUEST, Json(json!({"error": blank}))).into_response()
            }),
        );
        let base = spawn_stub(router).await;

        let err = optimizer(&base).optimize(&request()).await.unwrap_err();
        assert_eq!(
            err,
            OptimizeError::Service {
                status: 400,
                message: None,
            }
        );
        assert_eq!(err.notice(), "Optimization failed");
    }
}

#[tokio::test]
async fn test_service_error_without_body() {
    let router = Router::new().route(
        "/optimize",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let base = spawn_stub(router).await;

    let err = optimizer(&base).optimize(&request()).await.unwrap_err();
    assert_eq!(
        err,
        OptimizeError::Service {
            status: 500,
            message: None,
        }
    );
    assert_eq!(err.notice(), "Optimization failed");
}

#[tokio::test]
async fn test_malformed_success_body() {
    let router = Router::new().route(
        "/optimize",
        post(|| async { Json(json!({"selected": "nothing"})) }),
    );
    let base = spawn_stub(router).await;

    let err = optimizer(&base).optimize(&request()).await.unwrap_err();
    assert!(matches!(err, OptimizeError::Transport(_)));
    assert_eq!(err.notice(), "Optimization failed");
}

#[tokio::test]
async fn test_unreachable_service() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = optimizer(&format!("http://{addr}"))
        .optimize(&request())
        .await
        .unwrap_err();
    assert!(matches!(err, OptimizeError::Transport(_)));
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let router = Router::new().route(
        "/optimize",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            StatusCode::OK
        }),
    );
    let base = spawn_stub(router).await;

    let slow = HttpOptimizer::new(&base, Duration::from_millis(100)).unwrap();
    let err = slow.optimize(&request()).await.unwrap_err();
    assert!(matches!(err, OptimizeError::Transport(_)));
}
