//! Location and heart-rate readouts carried alongside the driving metrics

use data_validator::{GpsFix, NormalizedSample};
use serde::{Deserialize, Serialize};

/// One point of the heart-rate series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeartRatePoint {
    pub timestamp_ms: i64,
    /// Beats per minute, 0 when the sample carried no reading
    pub bpm: f64,
}

/// GPS fix of the most recent sample, if it has one
pub fn latest_location(samples: &[NormalizedSample]) -> Option<GpsFix> {
    samples.last()?.gps
}

/// Heart rate per sample in time order
pub fn heart_rate_series(samples: &[NormalizedSample]) -> Vec<HeartRatePoint> {
    samples
        .iter()
        .map(|s| HeartRatePoint {
            timestamp_ms: s.timestamp_ms,
            bpm: s.heart_rate.unwrap_or(0.0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_validator::Accelerometer;

    fn at(ts: i64) -> NormalizedSample {
        NormalizedSample::new(ts, Accelerometer::default())
    }

    #[test]
    fn test_latest_location_only_from_last_sample() {
        let samples = vec![at(0).with_gps(53.0, -6.0), at(1)];
        assert_eq!(latest_location(&samples), None);

        let samples = vec![at(0), at(1).with_gps(53.0, -6.0)];
        assert_eq!(
            latest_location(&samples),
            Some(GpsFix { latitude: 53.0, longitude: -6.0 })
        );
        assert_eq!(latest_location(&[]), None);
    }

    #[test]
    fn test_heart_rate_defaults_to_zero() {
        let series = heart_rate_series(&[at(0).with_heart_rate(71.0), at(5)]);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].bpm, 71.0);
        assert_eq!(series[1], HeartRatePoint { timestamp_ms: 5, bpm: 0.0 });
    }
}
