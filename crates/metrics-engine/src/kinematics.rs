//! Per-sample speed estimation and harsh-braking classification
//!
//! Speed is integrated from the accelerometer magnitude, offset by 1g, with
//! crude sanitisation of large time deltas:
//! - a delta above `max_delta_time_s` is replaced by `fallback_delta_time_s`
//! - a delta above `stationary_reset_s` also drops carried speed to 0
//!
//! The result is a bounded, uncalibrated scalar, not a physical velocity.

use crate::config::{EngineConfig, SpeedRounding};
use data_validator::{Accelerometer, NormalizedSample};
use serde::{Deserialize, Serialize};

/// Carry-over state between consecutive samples of one trip
#[derive(Debug, Clone, Default)]
pub struct KinematicState {
    last_acceleration: Option<Accelerometer>,
    last_timestamp_ms: Option<i64>,
    /// Unrounded speed fed into the next integration step
    last_speed: f64,
}

impl KinematicState {
    /// Forget everything; the next sample starts a new trip
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Unrounded speed after the last processed sample
    pub fn last_speed(&self) -> f64 {
        self.last_speed
    }
}

/// Sample annotated with derived kinematics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedSample {
    #[serde(flatten)]
    pub sample: NormalizedSample,
    /// Stored speed, rounded under `SpeedRounding::PerSample`
    pub speed: f64,
    pub harsh_braking: bool,
}

/// Kinematics estimator
#[derive(Debug, Clone)]
pub struct KinematicsEstimator {
    config: EngineConfig,
}

impl KinematicsEstimator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Gravity-compensated acceleration magnitude in m/s², clamped
    pub fn acceleration(&self, accel: &Accelerometer) -> f64 {
        let mps2 = (accel.magnitude() - self.config.raw_units_per_g) * self.config.raw_to_mps2();
        mps2.clamp(-self.config.max_acceleration, self.config.max_acceleration)
    }

    /// Change between two readings in m/s²
    pub fn acceleration_delta(&self, previous: &Accelerometer, current: &Accelerometer) -> f64 {
        previous.distance(current) * self.config.raw_to_mps2()
    }

    /// Annotate the next sample of a trip and advance the carry-over state
    pub fn step(&self, state: &mut KinematicState, sample: NormalizedSample) -> AnnotatedSample {
        let (speed, harsh_braking) = match (state.last_timestamp_ms, state.last_acceleration) {
            (Some(last_ts), Some(last_accel)) => {
                let raw_delta_s = sample.timestamp_ms.saturating_sub(last_ts) as f64 / 1000.0;
                let delta_s = if raw_delta_s > self.config.max_delta_time_s {
                    self.config.fallback_delta_time_s
                } else {
                    raw_delta_s
                };
                if raw_delta_s > self.config.stationary_reset_s {
                    state.last_speed = 0.0;
                }

                let acceleration = self.acceleration(&sample.accelerometer);
                let speed = (state.last_speed
                    + acceleration * delta_s * self.config.speed_conversion_factor)
                    .clamp(0.0, self.config.max_speed);

                let delta_a = self.acceleration_delta(&last_accel, &sample.accelerometer);
                (speed, delta_a > self.config.braking_threshold)
            }
            // First sample of a trip
            _ => (0.0, false),
        };

        state.last_acceleration = Some(sample.accelerometer);
        state.last_timestamp_ms = Some(sample.timestamp_ms);
        state.last_speed = speed;

        let stored = match self.config.speed_rounding {
            SpeedRounding::PerSample => speed.round(),
            SpeedRounding::Unrounded => speed,
        };

        AnnotatedSample {
            sample,
            speed: stored,
            harsh_braking,
        }
    }
}

impl Default for KinematicsEstimator {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
