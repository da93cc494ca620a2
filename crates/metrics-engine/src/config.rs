//! Engine configuration

use serde::{Deserialize, Serialize};

/// How per-sample speed is stored before averaging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedRounding {
    /// Round each sample's speed, average the rounded values
    #[default]
    PerSample,
    /// Keep each sample's speed unrounded, round only the trip average
    Unrounded,
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Inactivity gap that closes a trip (milliseconds)
    pub gap_threshold_ms: i64,

    /// Inter-sample acceleration delta flagged as harsh braking (m/s²)
    pub braking_threshold: f64,

    /// Scale applied to integrated acceleration
    pub speed_conversion_factor: f64,

    /// Delta-times above this are treated as sensor gaps (seconds)
    pub max_delta_time_s: f64,

    /// Delta-time used in place of a sensor gap (seconds)
    pub fallback_delta_time_s: f64,

    /// Delta-times above this reset carried speed to 0 (seconds)
    pub stationary_reset_s: f64,

    /// Acceleration clamp, symmetric around 0 (m/s²)
    pub max_acceleration: f64,

    /// Speed ceiling
    pub max_speed: f64,

    /// Raw accelerometer units per 1g
    pub raw_units_per_g: f64,

    /// Standard gravity (m/s²)
    pub gravity: f64,

    /// Potentiometer reading of an empty tank
    pub fuel_empty_value: i64,

    /// Potentiometer reading of a full tank
    pub fuel_full_value: i64,

    /// Fuel level reported when there are no samples (%)
    pub default_fuel_level: f64,

    pub speed_rounding: SpeedRounding,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gap_threshold_ms: 5 * 60 * 1000,
            braking_threshold: 8.0,
            speed_conversion_factor: 0.01,
            max_delta_time_s: 10.0,
            fallback_delta_time_s: 0.5,
            stationary_reset_s: 60.0,
            max_acceleration: 15.0,
            max_speed: 50.0,
            raw_units_per_g: 16384.0,
            gravity: 9.81,
            fuel_empty_value: 272,
            fuel_full_value: 65535,
            default_fuel_level: 100.0,
            speed_rounding: SpeedRounding::PerSample,
        }
    }
}

impl EngineConfig {
    /// Dashboard variant: per-sample speeds stay unrounded
    pub fn aggregate_path() -> Self {
        Self {
            speed_rounding: SpeedRounding::Unrounded,
            ..Default::default()
        }
    }

    /// Conversion factor from raw accelerometer units to m/s²
    pub fn raw_to_mps2(&self) -> f64 {
        self.gravity / self.raw_units_per_g
    }
}
