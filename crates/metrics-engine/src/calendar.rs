//! Trips-per-day bucketing

use crate::segmenter::Trip;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Trip counts per UTC calendar day, dates ascending
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripsPerDay {
    pub dates: Vec<NaiveDate>,
    pub counts: Vec<usize>,
}

impl TripsPerDay {
    /// Bucket trips by the UTC date of their first sample
    pub fn from_trips(trips: &[Trip]) -> Self {
        let mut buckets: BTreeMap<NaiveDate, usize> = BTreeMap::new();

        for start_ms in trips.iter().filter_map(Trip::start_ms) {
            match DateTime::from_timestamp_millis(start_ms) {
                Some(dt) => *buckets.entry(dt.date_naive()).or_insert(0) += 1,
                None => warn!("Trip start {} outside calendar range, not bucketed", start_ms),
            }
        }

        let (dates, counts) = buckets.into_iter().unzip();
        Self { dates, counts }
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Count for a given day, 0 if no trip started then
    pub fn count_on(&self, date: NaiveDate) -> usize {
        self.dates
            .binary_search(&date)
            .map(|i| self.counts[i])
            .unwrap_or(0)
    }
}
