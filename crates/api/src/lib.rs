//! Fleet Driving Metrics API Server
//!
//! HTTP front for the metrics engine, consumed by the fleet dashboard and the
//! driver app.

use anyhow::Context;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use data_validator::{Normalizer, TimestampPolicy};
use metrics_engine::{EngineConfig, MetricsEngine, SpeedRounding};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_governor::GovernorLayer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, subscriber::SetGlobalDefaultError, Level};
use tracing_subscriber::FmtSubscriber;

mod error;
mod rate_limit;
mod routes;
mod settings;

pub use error::ApiError;
pub use rate_limit::{create_governor_config, RateLimitConfig};
pub use routes::driving::MetricsRequest;
pub use settings::ServiceSettings;

/// Application state shared across handlers
pub struct AppState {
    pub engine: MetricsEngine,
    /// Normalizer carrying the service's default timestamp policy
    pub normalizer: Normalizer,
    pub prometheus: Option<PrometheusHandle>,
    pub version: String,
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(engine: EngineConfig, policy: TimestampPolicy) -> Self {
        Self {
            engine: MetricsEngine::new(engine),
            normalizer: Normalizer::new(policy),
            prometheus: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }

    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub engine: EngineSummary,
}

/// Engine settings in effect
#[derive(Debug, Serialize)]
pub struct EngineSummary {
    pub gap_threshold_ms: i64,
    pub speed_rounding: SpeedRounding,
    pub timestamp_policy: TimestampPolicy,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/metrics", post(routes::driving::derive_metrics))
        .route("/metrics", get(routes::driving::prometheus))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let config = state.engine.config();

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        engine: EngineSummary {
            gap_threshold_ms: config.gap_threshold_ms,
            speed_rounding: config.speed_rounding,
            timestamp_policy: state.normalizer.policy(),
        },
    })
}

/// Initialize logging
pub fn init_logging(level: Level, json: bool) -> Result<(), SetGlobalDefaultError> {
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    }
}

/// Run the server
pub async fn run_server(settings: ServiceSettings) -> anyhow::Result<()> {
    let prometheus = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;
    let governor = create_governor_config(&settings.rate_limit)
        .context("Rate limit needs a non-zero period and burst size")?;

    let state = Arc::new(
        AppState::new(settings.engine.clone(), settings.timestamp_policy)
            .with_prometheus(prometheus),
    );
    let app = create_router(state).layer(GovernorLayer { config: governor });

    info!("Starting API server on {}", settings.bind_addr);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", settings.bind_addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app(policy: TimestampPolicy) -> Router {
        create_router(Arc::new(AppState::new(EngineConfig::default(), policy)))
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_metrics(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/metrics")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(TimestampPolicy::Skip)
            .oneshot(Request::get("/api/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["engine"]["gap_threshold_ms"], 300_000);
        assert_eq!(body["engine"]["timestamp_policy"], "skip");
    }

    #[tokio::test]
    async fn test_derive_metrics() {
        let request = post_metrics(json!({
            "samples": [
                { "timestamp": 400_000, "accelerometer": { "x": 0, "y": 0, "z": 0 }, "potentiometer": 65535 },
                { "timestamp": 0, "accelerometer": { "x": 0, "y": 0, "z": 0 } }
            ]
        }));
        let response = app(TimestampPolicy::Substitute).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["trips"].as_array().unwrap().len(), 2);
        assert_eq!(body["trip_metrics"][0]["average_speed"], 0);
        assert_eq!(body["trip_metrics"][1]["harsh_braking_count"], 0);
        assert_eq!(body["fuel_level"], 100.0);
        assert_eq!(body["trips_per_day"]["dates"][0], "1970-01-01");
        assert_eq!(body["trips_per_day"]["counts"][0], 2);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let response = app(TimestampPolicy::Reject)
            .oneshot(post_metrics(json!({ "samples": [] })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["trips"], json!([]));
        assert_eq!(body["fuel_level"], 100.0);
    }

    #[tokio::test]
    async fn test_reject_policy_returns_422() {
        let response = app(TimestampPolicy::Reject)
            .oneshot(post_metrics(json!({ "samples": [{ "potentiometer": 300 }] })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Missing required field: timestamp");
    }

    #[tokio::test]
    async fn test_request_policy_override() {
        let response = app(TimestampPolicy::Reject)
            .oneshot(post_metrics(json!({
                "timestamp_policy": "skip",
                "samples": [{ "potentiometer": 300 }, { "timestamp": 5 }]
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["trips"][0]["samples"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_body_returns_400() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/metrics")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{ not json"))
            .unwrap();
        let response = app(TimestampPolicy::Substitute).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn test_prometheus_without_recorder() {
        let response = app(TimestampPolicy::Substitute)
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
