//! Metrics engine facade

use crate::aggregator::TripMetrics;
use crate::calendar::TripsPerDay;
use crate::config::EngineConfig;
use crate::fuel::{fuel_level, FuelGauge};
use crate::segmenter::{Trip, TripSegmenter};
use crate::vitals::{heart_rate_series, latest_location, HeartRatePoint};
use data_validator::{GpsFix, NormalizedSample, Normalizer, RawSample, ValidationError};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::debug;

/// Everything derived from one sample set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrivingMetrics {
    /// Trips with annotated samples
    pub trips: Vec<Trip>,
    /// One entry per trip, same order
    pub trip_metrics: Vec<TripMetrics>,
    pub trips_per_day: TripsPerDay,
    /// Unrounded percentage in [0, 100]
    pub fuel_level: f64,
    pub latest_location: Option<GpsFix>,
    pub heart_rate: Vec<HeartRatePoint>,
}

impl DrivingMetrics {
    /// Total harsh-braking events across all trips
    pub fn harsh_braking_total(&self) -> usize {
        self.trip_metrics.iter().map(|m| m.harsh_braking_count).sum()
    }

    /// Total samples across all trips
    pub fn sample_count(&self) -> usize {
        self.trips.iter().map(Trip::len).sum()
    }
}

/// Derives driving metrics from sensor samples
#[derive(Debug, Clone)]
pub struct MetricsEngine {
    config: EngineConfig,
    segmenter: TripSegmenter,
    gauge: FuelGauge,
}

impl MetricsEngine {
    /// Create a new engine with configuration
    pub fn new(config: EngineConfig) -> Self {
        Self {
            segmenter: TripSegmenter::new(config.clone()),
            gauge: FuelGauge::from(&config),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Derive metrics from normalized samples. Unsorted input is sorted
    /// (stably) on a private copy.
    pub fn derive(&self, samples: &[NormalizedSample]) -> DrivingMetrics {
        let samples = if samples.windows(2).all(|w| w[0].timestamp_ms <= w[1].timestamp_ms) {
            Cow::Borrowed(samples)
        } else {
            let mut sorted = samples.to_vec();
            sorted.sort_by_key(|s| s.timestamp_ms);
            Cow::Owned(sorted)
        };

        let trips = self.segmenter.segment(&samples);
        let trip_metrics: Vec<TripMetrics> = trips.iter().map(TripMetrics::from_trip).collect();
        let trips_per_day = TripsPerDay::from_trips(&trips);
        let fuel_level = fuel_level(&self.gauge, &samples, self.config.default_fuel_level);

        debug!(
            "Derived {} trips from {} samples, fuel {:.1}%",
            trips.len(),
            samples.len(),
            fuel_level
        );

        DrivingMetrics {
            trips,
            trip_metrics,
            trips_per_day,
            fuel_level,
            latest_location: latest_location(&samples),
            heart_rate: heart_rate_series(&samples),
        }
    }

    /// Normalize raw documents, then derive metrics
    pub fn derive_raw(
        &self,
        normalizer: &Normalizer,
        raw: &[RawSample],
    ) -> Result<DrivingMetrics, ValidationError> {
        let samples = normalizer.normalize(raw)?;
        Ok(self.derive(&samples))
    }
}

impl Default for MetricsEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
