//! Per-trip summary statistics

use crate::segmenter::Trip;
use serde::{Deserialize, Serialize};

/// Summary of one trip, index-aligned with the trip list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TripMetrics {
    /// Mean of per-sample speeds, rounded to nearest
    pub average_speed: i64,
    pub harsh_braking_count: usize,
    pub sample_count: usize,
    /// Last minus first sample timestamp
    pub duration_ms: i64,
    /// Highest stored per-sample speed, rounded to nearest
    pub max_speed: i64,
}

impl TripMetrics {
    /// Reduce a trip to its metrics. An empty trip yields all zeros.
    pub fn from_trip(trip: &Trip) -> Self {
        if trip.is_empty() {
            return Self::default();
        }

        let n = trip.len() as f64;
        let total: f64 = trip.samples.iter().map(|s| s.speed).sum();
        let max = trip.samples.iter().map(|s| s.speed).fold(0.0, f64::max);

        Self {
            average_speed: (total / n).round() as i64,
            harsh_braking_count: trip.samples.iter().filter(|s| s.harsh_braking).count(),
            sample_count: trip.len(),
            duration_ms: match (trip.start_ms(), trip.end_ms()) {
                (Some(start), Some(end)) => end.saturating_sub(start),
                _ => 0,
            },
            max_speed: max.round() as i64,
        }
    }
}
