//! Daily mean aggregation over an hourly temperature series.
//!
//! Samples are grouped into maximal contiguous runs sharing a calendar date
//! (year, month and day of the naive timestamp, no timezone conversion).
//! Boundary days keep however many samples they have.

use crate::error::{MeteoError, MeteoResult};
use crate::Sample;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayBucket {
    /// Timestamp of the first sample in the bucket.
    pub date: NaiveDateTime,
    pub count: usize,
    pub mean: f64,
}

impl DayBucket {
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub dates: Vec<NaiveDateTime>,
    pub means: Vec<f64>,
}

impl AggregationResult {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            dates: Vec::with_capacity(capacity),
            means: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, date: NaiveDateTime, mean: f64) {
        self.dates.push(date);
        self.means.push(mean);
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn buckets(&self) -> impl Iterator<Item = (NaiveDateTime, f64)> + '_ {
        self.dates.iter().copied().zip(self.means.iter().copied())
    }
}

impl From<Vec<DayBucket>> for AggregationResult {
    fn from(buckets: Vec<DayBucket>) -> Self {
        let mut result = Self::with_capacity(buckets.len());
        for bucket in buckets {
            result.push(bucket.date, bucket.mean);
        }
        result
    }
}

struct OpenBucket {
    start: NaiveDateTime,
    sum: f64,
    count: usize,
}

impl OpenBucket {
    fn open(sample: &Sample) -> Self {
        Self {
            start: sample.timestamp,
            sum: sample.temperature,
            count: 1,
        }
    }

    fn add(&mut self, temperature: f64) {
        self.sum += temperature;
        self.count += 1;
    }

    fn close(self) -> DayBucket {
        DayBucket {
            date: self.start,
            count: self.count,
            mean: self.sum / self.count as f64,
        }
    }
}

/// Splits `series` into day buckets in a single pass.
///
/// Fails with [`MeteoError::InvalidInput`] when the series is empty.
pub fn day_buckets(series: &[Sample]) -> MeteoResult<Vec<DayBucket>> {
    let (first, rest) = series
        .split_first()
        .ok_or_else(|| MeteoError::invalid_input("cannot aggregate an empty series"))?;

    let mut buckets = Vec::new();
    let mut current_day = first.timestamp.date();
    let mut open = OpenBucket::open(first);

    for sample in rest {
        let day = sample.timestamp.date();
        if day == current_day {
            open.add(sample.temperature);
        } else {
            buckets.push(open.close());
            current_day = day;
            open = OpenBucket::open(sample);
        }
    }
    buckets.push(open.close());

    Ok(buckets)
}

/// Computes the representative date and mean temperature of every day in `series`.
pub fn aggregate(series: &[Sample]) -> MeteoResult<AggregationResult> {
    day_buckets(series).map(AggregationResult::from)
}

pub fn parse_timestamp(raw: &str) -> MeteoResult<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .ok_or_else(|| MeteoError::invalid_input(format!("unparseable timestamp '{}'", raw)))
}

/// Zips the parallel hourly arrays reported by the upstream into samples.
pub fn samples_from_hourly(times: &[String], temperatures: &[f64]) -> MeteoResult<Vec<Sample>> {
    if times.len() != temperatures.len() {
        return Err(MeteoError::invalid_input(format!(
            "hourly series length mismatch: {} timestamps, {} temperatures",
            times.len(),
            temperatures.len()
        )));
    }

    times
        .iter()
        .zip(temperatures)
        .map(|(time, &temperature)| Ok(Sample::new(parse_timestamp(time)?, temperature)))
        .collect()
}
