//! Data Validation and Normalization
//!
//! Turns loosely-typed sensor documents from the telemetry store into
//! canonical, time-ordered samples. Parsing is lenient: a malformed
//! reading degrades to a documented default instead of failing the batch.

mod coerce;
mod error;
mod normalizer;
mod sample;

pub use coerce::{
    coerce_f64, coerce_i64, resolve_accelerometer, resolve_gps, resolve_heart_rate,
    resolve_potentiometer, resolve_timestamp,
};
pub use error::ValidationError;
pub use normalizer::{Normalizer, TimestampPolicy};
pub use sample::{Accelerometer, GpsFix, NormalizedSample, RawSample, SensorPayload};
