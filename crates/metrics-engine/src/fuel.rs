//! Potentiometer to fuel percentage conversion

use crate::config::EngineConfig;
use data_validator::NormalizedSample;
use tracing::{debug, warn};

/// Linear fuel gauge over a calibrated potentiometer range
#[derive(Debug, Clone, Copy)]
pub struct FuelGauge {
    empty: i64,
    full: i64,
}

impl FuelGauge {
    pub fn new(empty: i64, full: i64) -> Self {
        Self { empty, full }
    }

    /// Percentage in [0, 100]; an absent reading is an empty tank
    pub fn percent(&self, reading: Option<i64>) -> f64 {
        let raw = reading.unwrap_or(self.empty).clamp(self.empty, self.full.max(self.empty));
        let span = self.full as f64 - self.empty as f64;
        if span <= 0.0 {
            return 0.0;
        }
        ((raw as f64 - self.empty as f64) / span * 100.0).clamp(0.0, 100.0)
    }
}

impl Default for FuelGauge {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self::new(config.fuel_empty_value, config.fuel_full_value)
    }
}

impl From<&EngineConfig> for FuelGauge {
    fn from(config: &EngineConfig) -> Self {
        Self::new(config.fuel_empty_value, config.fuel_full_value)
    }
}

/// Fuel level from the most recent sample, or `default_level` without samples
pub fn fuel_level(gauge: &FuelGauge, samples: &[NormalizedSample], default_level: f64) -> f64 {
    let Some(latest) = samples.last() else {
        debug!("No samples, reporting default fuel level {}", default_level);
        return default_level;
    };
    if latest.potentiometer.is_none() {
        warn!("Potentiometer reading missing, assuming empty tank");
    }
    gauge.percent(latest.potentiometer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_validator::Accelerometer;
    use proptest::prelude::*;

    #[test]
    fn test_endpoints() {
        let gauge = FuelGauge::default();
        assert_eq!(gauge.percent(Some(272)), 0.0);
        assert_eq!(gauge.percent(Some(65535)), 100.0);
    }

    #[test]
    fn test_midpoint() {
        let gauge = FuelGauge::default();
        let mid = (272 + 65535) / 2;
        assert!((gauge.percent(Some(mid)) - 50.0).abs() <= 0.1);
    }

    #[test]
    fn test_absent_is_empty() {
        assert_eq!(FuelGauge::default().percent(None), 0.0);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let gauge = FuelGauge::default();
        assert_eq!(gauge.percent(Some(-5)), 0.0);
        assert_eq!(gauge.percent(Some(1_000_000)), 100.0);
    }

    #[test]
    fn test_degenerate_range() {
        assert_eq!(FuelGauge::new(500, 500).percent(Some(500)), 0.0);
        assert_eq!(FuelGauge::new(500, 100).percent(Some(300)), 0.0);
    }

    #[test]
    fn test_extreme_range() {
        let gauge = FuelGauge::new(i64::MIN, i64::MAX);
        assert_eq!(gauge.percent(Some(i64::MIN)), 0.0);
        assert_eq!(gauge.percent(Some(i64::MAX)), 100.0);
        assert!((gauge.percent(Some(0)) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_uses_latest_sample() {
        let samples = vec![
            NormalizedSample::new(0, Accelerometer::default()).with_potentiometer(65535),
            NormalizedSample::new(1, Accelerometer::default()).with_potentiometer(272),
        ];
        assert_eq!(fuel_level(&FuelGauge::default(), &samples, 100.0), 0.0);
    }

    #[test]
    fn test_no_samples_reports_default() {
        assert_eq!(fuel_level(&FuelGauge::default(), &[], 100.0), 100.0);
    }

    proptest! {
        #[test]
        fn prop_percent_in_bounds(reading in proptest::option::of(any::<i64>())) {
            let pct = FuelGauge::default().percent(reading);
            prop_assert!((0.0..=100.0).contains(&pct));
        }
    }
}
