//! Driving Metrics Routes

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use data_validator::{Normalizer, RawSample, TimestampPolicy};
use metrics_engine::DrivingMetrics;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::AppState;

/// Request body for the metrics endpoint
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MetricsRequest {
    /// Raw sensor documents in any order
    #[serde(default)]
    pub samples: Vec<RawSample>,
    /// Overrides the service's timestamp policy for this request
    #[serde(default)]
    pub timestamp_policy: Option<TimestampPolicy>,
}

/// Derive driving metrics from a batch of raw samples
pub async fn derive_metrics(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MetricsRequest>, JsonRejection>,
) -> Result<Json<DrivingMetrics>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    metrics::counter!("metrics_requests_total").increment(1);

    let normalizer = request
        .timestamp_policy
        .map(Normalizer::new)
        .unwrap_or_else(|| state.normalizer.clone());

    let result = state
        .engine
        .derive_raw(&normalizer, &request.samples)
        .map_err(|e| {
            warn!("Rejected batch of {} samples: {}", request.samples.len(), e);
            metrics::counter!("metrics_requests_rejected_total").increment(1);
            e
        })?;

    metrics::counter!("samples_processed_total").increment(result.sample_count() as u64);
    metrics::counter!("trips_detected_total").increment(result.trips.len() as u64);
    metrics::counter!("harsh_braking_events_total").increment(result.harsh_braking_total() as u64);

    info!(
        "Derived {} trips, {} harsh braking events from {} samples",
        result.trips.len(),
        result.harsh_braking_total(),
        result.sample_count()
    );

    Ok(Json(result))
}

/// Prometheus text exposition
pub async fn prometheus(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match &state.prometheus {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::NOT_FOUND,
            "metrics recorder not installed".to_string(),
        ),
    }
}
