//! Trip segmentation by inactivity gap

use crate::config::EngineConfig;
use crate::kinematics::{AnnotatedSample, KinematicState, KinematicsEstimator};
use data_validator::NormalizedSample;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Maximal run of samples with no gap above the threshold.
///
/// Never empty when produced by [`TripSegmenter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub samples: Vec<AnnotatedSample>,
}

impl Trip {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Timestamp of the first sample
    pub fn start_ms(&self) -> Option<i64> {
        self.samples.first().map(|s| s.sample.timestamp_ms)
    }

    /// Timestamp of the last sample
    pub fn end_ms(&self) -> Option<i64> {
        self.samples.last().map(|s| s.sample.timestamp_ms)
    }
}

/// Accumulator threaded through one segmentation pass
#[derive(Default)]
struct SegmentAccumulator {
    trips: Vec<Trip>,
    current: Vec<AnnotatedSample>,
    last_timestamp_ms: Option<i64>,
    kinematics: KinematicState,
}

impl SegmentAccumulator {
    fn close_trip(&mut self) {
        if !self.current.is_empty() {
            self.trips.push(Trip {
                samples: std::mem::take(&mut self.current),
            });
        }
        self.kinematics.reset();
    }
}

/// Splits a time-ordered sample stream into trips
#[derive(Debug, Clone)]
pub struct TripSegmenter {
    gap_threshold_ms: i64,
    estimator: KinematicsEstimator,
}

impl TripSegmenter {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            gap_threshold_ms: config.gap_threshold_ms,
            estimator: KinematicsEstimator::new(config),
        }
    }

    /// Segment samples (already sorted ascending) into annotated trips
    pub fn segment(&self, samples: &[NormalizedSample]) -> Vec<Trip> {
        let mut acc = SegmentAccumulator::default();

        for sample in samples {
            if let Some(last) = acc.last_timestamp_ms {
                if sample.timestamp_ms.saturating_sub(last) > self.gap_threshold_ms {
                    acc.close_trip();
                }
            }

            let annotated = self.estimator.step(&mut acc.kinematics, sample.clone());
            acc.current.push(annotated);
            acc.last_timestamp_ms = Some(sample.timestamp_ms);
        }
        acc.close_trip();

        debug!("Segmented {} samples into {} trips", samples.len(), acc.trips.len());
        acc.trips
    }
}

impl Default for TripSegmenter {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
