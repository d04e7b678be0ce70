//! HTTP API: thin axum wrapper over `BrokerCore`
//!
//! Errors become 404 `{"detail": ...}`. A caught-up consume is a bodyless
//! 204, never a message with an empty value.

use axum::{
    routing::{get, post},
    Router,
    Json,
    response::{IntoResponse, Response},
    extract::State,
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::brokers::log::{BrokerError, Message};
use crate::BrokerEngine;

// ==========================================
// REQUEST / RESPONSE BODIES
// ==========================================

#[derive(Debug, Serialize, Deserialize)]
pub struct TopicRegistration {
    pub topic: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProducerRegistration {
    pub topic: String,
    #[serde(default)]
    pub producer_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConsumerRegistration {
    pub topic: String,
    #[serde(default)]
    pub consumer_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PublishRequest {
    pub topic: String,
    pub value: String,
    #[serde(default)]
    pub key: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConsumeRequest {
    pub consumer_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TopicAck {
    pub status: String,
    pub topic: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProducerAck {
    pub status: String,
    pub topic: String,
    pub producer_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConsumerAck {
    pub status: String,
    pub topic: String,
    pub consumer_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProduceAck {
    pub status: String,
    pub offset: u64,
}

impl IntoResponse for BrokerError {
    fn into_response(self) -> Response {
        let status = match self {
            BrokerError::TopicNotFound(_) | BrokerError::ConsumerNotFound(_) => StatusCode::NOT_FOUND,
        };
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

// ==========================================
// ROUTER
// ==========================================

pub fn router(engine: BrokerEngine) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/topics/register", post(register_topic))
        .route("/producers/register", post(register_producer))
        .route("/consumers/register", post(register_consumer))
        .route("/produce", post(produce))
        .route("/consume", post(consume))
        .route("/stats", get(stats))
        .route("/system", get(system))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(engine)
}

pub async fn start_http_server(engine: BrokerEngine, addr: &str) -> std::io::Result<()> {
    let app = router(engine);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Broker listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

// ==========================================
// HANDLERS
// ==========================================

async fn root() -> impl IntoResponse {
    Json(json!({ "message": "Log broker up. POST /produce and /consume, GET /stats." }))
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn register_topic(
    State(engine): State<BrokerEngine>,
    Json(req): Json<TopicRegistration>,
) -> Json<TopicAck> {
    engine.core.register_topic(&req.topic);
    Json(TopicAck { status: "ok".into(), topic: req.topic })
}

async fn register_producer(
    State(engine): State<BrokerEngine>,
    Json(req): Json<ProducerRegistration>,
) -> Json<ProducerAck> {
    let producer_id = engine.core.register_producer(&req.topic, req.producer_id.as_deref());
    Json(ProducerAck { status: "ok".into(), topic: req.topic, producer_id })
}

async fn register_consumer(
    State(engine): State<BrokerEngine>,
    Json(req): Json<ConsumerRegistration>,
) -> Json<ConsumerAck> {
    let consumer_id = engine.core.register_consumer(&req.topic, req.consumer_id.as_deref());
    Json(ConsumerAck { status: "ok".into(), topic: req.topic, consumer_id })
}

async fn produce(
    State(engine): State<BrokerEngine>,
    Json(req): Json<PublishRequest>,
) -> Result<Json<ProduceAck>, BrokerError> {
    let offset = engine.core.produce(&req.topic, req.value, req.key)?;
    Ok(Json(ProduceAck { status: "ok".into(), offset }))
}

async fn consume(
    State(engine): State<BrokerEngine>,
    Json(req): Json<ConsumeRequest>,
) -> Result<Response, BrokerError> {
    Ok(match engine.core.consume(&req.consumer_id)? {
        Some(msg) => Json::<Message>(msg).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

async fn stats(State(engine): State<BrokerEngine>) -> impl IntoResponse {
    Json(engine.core.stats())
}

async fn system(State(engine): State<BrokerEngine>) -> impl IntoResponse {
    Json(engine.system_snapshot())
}
