//! Driving Metrics Engine
//!
//! Derives trips and per-trip driving metrics from a raw accelerometer /
//! potentiometer / GPS sample stream:
//! - Trip segmentation on a 5 minute inactivity gap
//! - Per-sample speed estimate and harsh-braking flag
//! - Average speed and braking count per trip
//! - Fuel percentage from the latest potentiometer reading
//! - Trips per calendar day
//!
//! The engine is a pure function of its input; every call owns its state.

mod aggregator;
mod calendar;
mod config;
mod engine;
mod fuel;
mod kinematics;
mod segmenter;
mod vitals;

pub use aggregator::TripMetrics;
pub use calendar::TripsPerDay;
pub use config::{EngineConfig, SpeedRounding};
pub use engine::{DrivingMetrics, MetricsEngine};
pub use fuel::{fuel_level, FuelGauge};
pub use kinematics::{AnnotatedSample, KinematicState, KinematicsEstimator};
pub use segmenter::{Trip, TripSegmenter};
pub use vitals::{heart_rate_series, latest_location, HeartRatePoint};
