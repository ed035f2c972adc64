//! Live-mode predictions against a local stand-in for the Gemini endpoint.

use axum::{
    extract::Json,
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use serde_json::{json, Value};
use spendwise_ai::{AiSettings, PredictionError, PredictionService, PredictionSource};
use spendwise_core::{Category, ExpenseRecord};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

#[derive(Debug, Clone)]
struct Seen {
    api_key: Option<String>,
    body: Value,
}

struct MockGemini {
    addr: SocketAddr,
    seen: Arc<Mutex<Vec<Seen>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockGemini {
    /// Serve `reply` with `status` for every POST to /generate.
    async fn start(status: StatusCode, reply: String) -> Self {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();

        let app = Router::new().route(
            "/generate",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let log = log.clone();
                let reply = reply.clone();
                async move {
                    log.lock().unwrap().push(Seen {
                        api_key: headers
                            .get("x-goog-api-key")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string),
                        body,
                    });
                    (status, [(header::CONTENT_TYPE, "application/json")], reply)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            seen,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    fn endpoint(&self) -> String {
        format!("http://{}/generate", self.addr)
    }

    fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

impl Drop for MockGemini {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Wrap model text in a generateContent response body.
fn envelope(text: &str) -> String {
    json!({
        "candidates": [{"content": {"parts": [{"text": text}], "role": "model"}}]
    })
    .to_string()
}

fn live_service(endpoint: String) -> PredictionService {
    let settings = AiSettings {
        endpoint,
        timeout_secs: 5,
        ..AiSettings::default()
    };
    let service = PredictionService::from_settings(&settings, Some("test-key")).unwrap();
    assert!(service.is_live());
    service
}

fn assert_mock_shape(source: &PredictionSource, amount: f64, confidence: f64) {
    assert!(matches!(source, PredictionSource::Fallback(_)), "got {source:?}");
    assert!((5.0..105.0).contains(&amount));
    assert!((0.7..1.0).contains(&confidence));
}

#[tokio::test]
async fn test_live_prediction_roundtrip() {
    let reply = envelope(r#"{"description":"coffee","amount":4.75,"category":"Food","confidence":0.88}"#);
    let server = MockGemini::start(StatusCode::OK, reply).await;
    let service = live_service(server.endpoint());

    let out = service.predict_traced("coffee with friend").await;
    assert_eq!(out.source, PredictionSource::Live);
    assert_eq!(out.prediction.amount, 4.75);
    assert_eq!(out.prediction.category, Category::Food);
    assert_eq!(out.prediction.description, "coffee with friend");

    let seen = server.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].api_key.as_deref(), Some("test-key"));
    let prompt = seen[0].body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("coffee with friend"));
}

#[tokio::test]
async fn test_malformed_model_text_falls_back() {
    let server = MockGemini::start(StatusCode::OK, envelope("sure! it's about $12")).await;
    let service = live_service(server.endpoint());

    let out = service.predict_traced("lunch").await;
    assert!(matches!(
        out.source,
        PredictionSource::Fallback(PredictionError::MalformedResponse(_))
    ));
    assert_mock_shape(&out.source, out.prediction.amount, out.prediction.confidence);
    // one request, no retry
    assert_eq!(server.seen().len(), 1);
}

#[tokio::test]
async fn test_non_json_body_falls_back() {
    let server = MockGemini::start(StatusCode::OK, "<html>oops</html>".to_string()).await;
    let service = live_service(server.endpoint());

    let out = service.predict_traced("taxi home").await;
    assert!(matches!(
        out.source,
        PredictionSource::Fallback(PredictionError::MalformedResponse(_))
    ));
    assert_mock_shape(&out.source, out.prediction.amount, out.prediction.confidence);
}

#[tokio::test]
async fn test_missing_candidates_falls_back() {
    let server = MockGemini::start(StatusCode::OK, json!({"candidates": []}).to_string()).await;
    let service = live_service(server.endpoint());

    let out = service.predict_traced("movie night").await;
    assert!(out.error().is_some());
    assert_mock_shape(&out.source, out.prediction.amount, out.prediction.confidence);
}

#[tokio::test]
async fn test_http_error_falls_back() {
    let server = MockGemini::start(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"error": {"code": 500}}).to_string(),
    )
    .await;
    let service = live_service(server.endpoint());

    let out = service.predict_traced("phone bill").await;
    match out.error() {
        Some(PredictionError::Status { status, .. }) => assert_eq!(*status, 500),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_backend_falls_back() {
    // Bind then release a port so nothing is listening on it.
    let addr = {
        let l = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        l.local_addr().unwrap()
    };
    let service = live_service(format!("http://{addr}/generate"));

    let out = service.predict_traced("bus ticket").await;
    assert!(matches!(
        out.source,
        PredictionSource::Fallback(PredictionError::Network(_))
    ));
    assert_mock_shape(&out.source, out.prediction.amount, out.prediction.confidence);
}

#[tokio::test]
async fn test_categorize_and_suggest_over_http() {
    let server = MockGemini::start(StatusCode::OK, envelope("Shopping")).await;
    let service = live_service(server.endpoint());
    assert_eq!(service.categorize("new headphones").await, Category::Shopping);

    let suggestions = envelope(
        r#"[{"description":"Metro card","amount":25,"category":"Transport","confidence":0.65}]"#,
    );
    let server = MockGemini::start(StatusCode::OK, suggestions).await;
    let service = live_service(server.endpoint());
    let recent = vec![ExpenseRecord::new("Uber ride", 80.0, Category::Transport).unwrap()];
    let out = service.suggest(&recent).await;
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].description, "Metro card");

    let prompt = server.seen()[0].body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(prompt.contains("Uber ride"));
}
