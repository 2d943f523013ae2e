#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use promptdeck_api::auth::jwt::{generate_access_token, JwtConfig};
use promptdeck_api::config::{LogFormat, ServerConfig, StorageBackend};
use promptdeck_api::routes;
use promptdeck_api::state::AppState;
use promptdeck_core::memory::InMemoryTemplateRepo;
use promptdeck_core::repository::TemplateRepository;
use promptdeck_core::service::TemplateService;
use promptdeck_core::types::UserId;

pub const ALICE: &str = "11111111-1111-4111-8111-111111111111";
pub const BOB: &str = "22222222-2222-4222-8222-222222222222";

/// Build a test `ServerConfig` backed by in-memory storage.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        storage: StorageBackend::Memory,
        database_url: None,
        database_max_connections: 1,
        log_format: LogFormat::Pretty,
        jwt: JwtConfig {
            secret: "test-secret-for-integration-tests".to_string(),
            audience: None,
            access_token_expiry_mins: 5,
        },
    }
}

/// Bearer token for `user_id`, signed with the test secret.
pub fn token_for(user_id: &str) -> String {
    let user = UserId::parse(user_id).unwrap();
    generate_access_token(&user, &test_config().jwt).unwrap()
}

/// Build the full application router with all middleware layers over the
/// given repository.
///
/// Mirrors the router construction in `main.rs` so integration tests run
/// through the same middleware stack production uses.
pub fn build_test_app(repo: Arc<dyn TemplateRepository>) -> Router {
    let config = test_config();

    let state = AppState {
        config: Arc::new(config),
        templates: TemplateService::new(repo),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// App over a fresh in-memory store.
pub fn memory_app() -> (Router, Arc<InMemoryTemplateRepo>) {
    let repo = Arc::new(InMemoryTemplateRepo::new());
    (build_test_app(repo.clone()), repo)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Send a raw string body, for malformed-JSON cases.
pub async fn post_raw(app: Router, uri: &str, token: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A minimal valid create body.
pub fn sample_body(name: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "description": "Summarises text",
        "messages": [
            { "role": "system", "content": "You are concise." },
            { "role": "user", "content": "Summarise {{text}}" }
        ],
        "arguments": [
            { "name": "text", "description": "Input text", "required": true }
        ],
        "tags": ["writing"]
    })
}
