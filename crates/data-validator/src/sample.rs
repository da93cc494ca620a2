//! Raw and normalized sensor sample types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sensor readings nested under a document's `data` key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorPayload {
    #[serde(default, alias = "Accelerometer")]
    pub accelerometer: Option<Value>,
    #[serde(default, alias = "Potentiometer")]
    pub potentiometer: Option<Value>,
    #[serde(default, alias = "GPS")]
    pub gps: Option<Value>,
    #[serde(default, alias = "Heart Rate")]
    pub heart_rate: Option<Value>,
}

/// One sensor document as received from the store.
///
/// Every field is optional and untyped. Readings may sit at the top level
/// or under `data`; top-level values win when both are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    #[serde(default)]
    pub timestamp: Option<Value>,
    #[serde(default, alias = "Accelerometer")]
    pub accelerometer: Option<Value>,
    #[serde(default, alias = "Potentiometer")]
    pub potentiometer: Option<Value>,
    #[serde(default, alias = "GPS")]
    pub gps: Option<Value>,
    #[serde(default, alias = "Heart Rate")]
    pub heart_rate: Option<Value>,
    #[serde(default)]
    pub data: Option<SensorPayload>,
}

impl RawSample {
    pub(crate) fn accelerometer_value(&self) -> Option<&Value> {
        self.accelerometer
            .as_ref()
            .or_else(|| self.data.as_ref()?.accelerometer.as_ref())
    }

    pub(crate) fn potentiometer_value(&self) -> Option<&Value> {
        self.potentiometer
            .as_ref()
            .or_else(|| self.data.as_ref()?.potentiometer.as_ref())
    }

    pub(crate) fn gps_value(&self) -> Option<&Value> {
        self.gps.as_ref().or_else(|| self.data.as_ref()?.gps.as_ref())
    }

    pub(crate) fn heart_rate_value(&self) -> Option<&Value> {
        self.heart_rate
            .as_ref()
            .or_else(|| self.data.as_ref()?.heart_rate.as_ref())
    }
}

/// 3-axis accelerometer reading in raw sensor units (16384 = 1g)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accelerometer {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl Accelerometer {
    pub fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean norm in raw units
    pub fn magnitude(&self) -> f64 {
        let (x, y, z) = (self.x as f64, self.y as f64, self.z as f64);
        (x * x + y * y + z * z).sqrt()
    }

    /// Euclidean distance to another reading in raw units
    pub fn distance(&self, other: &Accelerometer) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        let dz = self.z as f64 - other.z as f64;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// GPS position fix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsFix {
    pub latitude: f64,
    pub longitude: f64,
}

/// Canonical sample with every optional field resolved.
///
/// `potentiometer` stays `None` when absent; the fuel converter applies the
/// empty-tank sentinel, not the normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSample {
    /// Epoch milliseconds
    pub timestamp_ms: i64,
    pub accelerometer: Accelerometer,
    pub potentiometer: Option<i64>,
    pub gps: Option<GpsFix>,
    pub heart_rate: Option<f64>,
}

impl NormalizedSample {
    /// Sample carrying only a timestamp and accelerometer reading
    pub fn new(timestamp_ms: i64, accelerometer: Accelerometer) -> Self {
        Self {
            timestamp_ms,
            accelerometer,
            potentiometer: None,
            gps: None,
            heart_rate: None,
        }
    }

    pub fn with_potentiometer(mut self, reading: i64) -> Self {
        self.potentiometer = Some(reading);
        self
    }

    pub fn with_gps(mut self, latitude: f64, longitude: f64) -> Self {
        self.gps = Some(GpsFix { latitude, longitude });
        self
    }

    pub fn with_heart_rate(mut self, bpm: f64) -> Self {
        self.heart_rate = Some(bpm);
        self
    }
}
