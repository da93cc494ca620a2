//! Sample Normalization
//!
//! Resolves every field of a raw document, applies the missing-timestamp
//! policy and returns samples in ascending timestamp order.

use crate::coerce::{
    resolve_accelerometer, resolve_gps, resolve_heart_rate, resolve_potentiometer,
    resolve_timestamp,
};
use crate::error::ValidationError;
use crate::sample::{NormalizedSample, RawSample};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// What to do with a document that has no usable timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampPolicy {
    /// Stamp the sample with the wall-clock time of normalization
    #[default]
    Substitute,
    /// Drop the sample
    Skip,
    /// Fail the whole batch
    Reject,
}

/// Normalizer for raw sensor documents
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    policy: TimestampPolicy,
}

impl Normalizer {
    /// Create a new normalizer with the given timestamp policy
    pub fn new(policy: TimestampPolicy) -> Self {
        Self { policy }
    }

    /// Timestamp policy in effect
    pub fn policy(&self) -> TimestampPolicy {
        self.policy
    }

    /// Normalize a batch, substituting the current time where required
    pub fn normalize(&self, raw: &[RawSample]) -> Result<Vec<NormalizedSample>, ValidationError> {
        let now_ms = chrono::Utc::now().timestamp_millis();
        self.normalize_at(raw, now_ms)
    }

    /// Normalize a batch with an explicit substitution time
    pub fn normalize_at(
        &self,
        raw: &[RawSample],
        now_ms: i64,
    ) -> Result<Vec<NormalizedSample>, ValidationError> {
        let mut samples = Vec::with_capacity(raw.len());
        let mut substituted = 0usize;
        let mut skipped = 0usize;

        for doc in raw {
            let timestamp_ms = match (resolve_timestamp(doc), self.policy) {
                (Some(ts), _) => ts,
                (None, TimestampPolicy::Substitute) => {
                    substituted += 1;
                    now_ms
                }
                (None, TimestampPolicy::Skip) => {
                    skipped += 1;
                    continue;
                }
                (None, TimestampPolicy::Reject) => {
                    return Err(ValidationError::MissingField("timestamp"));
                }
            };

            samples.push(NormalizedSample {
                timestamp_ms,
                accelerometer: resolve_accelerometer(doc),
                potentiometer: resolve_potentiometer(doc),
                gps: resolve_gps(doc),
                heart_rate: resolve_heart_rate(doc),
            });
        }

        if substituted > 0 {
            warn!(
                "{} samples had no timestamp, stamped with current time {}",
                substituted, now_ms
            );
        }
        if skipped > 0 {
            warn!("Skipped {} samples without timestamp", skipped);
        }

        // Stable: ties keep input order
        samples.sort_by_key(|s| s.timestamp_ms);

        debug!("Normalized {} of {} raw samples", samples.len(), raw.len());
        Ok(samples)
    }
}
