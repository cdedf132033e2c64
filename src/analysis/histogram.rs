//! Interval-bucketed histograms over values, durations and calendar time
//!
//! One partitioning algorithm serves every domain. A [`BoundaryPolicy`]
//! decides where bucket edges fall inside the effective window; the builder
//! turns consecutive edges into contiguous [`Range`]s (the last one closed on
//! its end) and counts each sample into the first bucket that contains it.
//!
//! Policies:
//! - [`FixedBucketCount`] - equal-width buckets for any [`RangeBound`]
//! - [`AdaptiveCalendarBuckets`] - hour or day boundaries for timestamps,
//!   picked from the window length

use super::range::{Range, RangeBound};
use crate::errors::{AppError, AppResult};
use crate::utils::time::{truncate_to_day, truncate_to_hour};
use chrono::{NaiveDateTime, TimeDelta};
use serde::ser::{SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

/// Default number of buckets for value and duration histograms
pub const DEFAULT_BUCKET_COUNT: usize = 20;

/// Default window length up to which calendar buckets are hourly
pub const DEFAULT_HOURLY_GRANULARITY_MAX_HOURS: i64 = 48;

/// Ordered bucket -> count mapping, ascending by bucket start
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram<T: RangeBound> {
    buckets: BTreeMap<Range<T>, u64>,
}

impl<T: RangeBound> Default for Histogram<T> {
    fn default() -> Self {
        Self {
            buckets: BTreeMap::new(),
        }
    }
}

impl<T: RangeBound> Histogram<T> {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Count held by `range`, if it is one of the buckets
    pub fn get(&self, range: &Range<T>) -> Option<u64> {
        self.buckets.get(range).copied()
    }

    /// Buckets in ascending start order
    pub fn iter(&self) -> impl Iterator<Item = (&Range<T>, u64)> + '_ {
        self.buckets.iter().map(|(range, count)| (range, *count))
    }

    pub fn ranges(&self) -> impl Iterator<Item = &Range<T>> + '_ {
        self.buckets.keys()
    }

    /// Sum of all bucket counts
    pub fn total_count(&self) -> u64 {
        self.buckets.values().sum()
    }
}

impl<T: RangeBound> Serialize for Histogram<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.buckets.len()))?;
        for (range, count) in &self.buckets {
            seq.serialize_element(&BucketView { range, count: *count })?;
        }
        seq.end()
    }
}

/// Flat `{start, end, end_inclusive, count}` form of one bucket
struct BucketView<'a, T: RangeBound> {
    range: &'a Range<T>,
    count: u64,
}

impl<T: RangeBound> Serialize for BucketView<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Bucket", 4)?;
        state.serialize_field("start", &self.range.start().to_json())?;
        state.serialize_field("end", &self.range.end().to_json())?;
        state.serialize_field("end_inclusive", &self.range.is_end_inclusive())?;
        state.serialize_field("count", &self.count)?;
        state.end()
    }
}

/// Where bucket edges fall inside a non-degenerate window `start < end`
pub trait BoundaryPolicy<T: RangeBound> {
    /// Ascending edges, first equal to `start` and last equal to `end`
    fn boundaries(&self, start: T, end: T) -> Vec<T>;
}

/// Fixed number of equal-width buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedBucketCount {
    count: usize,
}

impl Default for FixedBucketCount {
    fn default() -> Self {
        Self {
            count: DEFAULT_BUCKET_COUNT,
        }
    }
}

impl FixedBucketCount {
    pub fn new(count: usize) -> AppResult<Self> {
        if count == 0 {
            return Err(AppError::Validation(
                "histogram bucket count must be at least 1".to_string(),
            ));
        }
        Ok(Self { count })
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl<T: RangeBound> BoundaryPolicy<T> for FixedBucketCount {
    fn boundaries(&self, start: T, end: T) -> Vec<T> {
        (0..=self.count)
            .map(|step| match step {
                0 => start,
                s if s == self.count => end,
                s => T::interpolate(start, end, s, self.count),
            })
            .collect()
    }
}

/// Calendar unit buckets are aligned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CalendarGranularity {
    Hourly,
    Daily,
}

impl CalendarGranularity {
    fn truncate(&self, value: NaiveDateTime) -> NaiveDateTime {
        match self {
            CalendarGranularity::Hourly => truncate_to_hour(value),
            CalendarGranularity::Daily => truncate_to_day(value),
        }
    }

    fn unit(&self) -> TimeDelta {
        match self {
            CalendarGranularity::Hourly => TimeDelta::hours(1),
            CalendarGranularity::Daily => TimeDelta::days(1),
        }
    }
}

/// Hourly buckets for short windows, daily buckets otherwise
///
/// The first bucket runs from the window start to the next unit boundary,
/// interior buckets span one unit, and the last ends exactly at the window end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdaptiveCalendarBuckets {
    hourly_max: TimeDelta,
}

impl Default for AdaptiveCalendarBuckets {
    fn default() -> Self {
        Self {
            hourly_max: TimeDelta::hours(DEFAULT_HOURLY_GRANULARITY_MAX_HOURS),
        }
    }
}

impl AdaptiveCalendarBuckets {
    pub fn new(hourly_max_hours: i64) -> AppResult<Self> {
        if hourly_max_hours < 0 {
            return Err(AppError::Validation(format!(
                "hourly granularity cutoff must not be negative, got {}h",
                hourly_max_hours
            )));
        }
        Ok(Self {
            hourly_max: TimeDelta::hours(hourly_max_hours),
        })
    }

    /// Granularity used for a window `[start, end]`
    pub fn granularity_for(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> CalendarGranularity {
        if end - start <= self.hourly_max {
            CalendarGranularity::Hourly
        } else {
            CalendarGranularity::Daily
        }
    }
}

impl BoundaryPolicy<NaiveDateTime> for AdaptiveCalendarBuckets {
    fn boundaries(&self, start: NaiveDateTime, end: NaiveDateTime) -> Vec<NaiveDateTime> {
        let granularity = self.granularity_for(start, end);
        let unit = granularity.unit();

        let mut edges = vec![start];
        let mut boundary = granularity.truncate(start) + unit;
        while boundary < end {
            edges.push(boundary);
            boundary += unit;
        }
        edges.push(end);
        edges
    }
}

/// Requested window; an absent side falls back to the observed extreme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketWindow<T> {
    pub start: Option<T>,
    pub end: Option<T>,
}

impl<T> Default for BucketWindow<T> {
    fn default() -> Self {
        Self {
            start: None,
            end: None,
        }
    }
}

impl<T: RangeBound> BucketWindow<T> {
    pub fn new(start: Option<T>, end: Option<T>) -> Self {
        Self { start, end }
    }

    /// Effective `(start, end)` for a non-empty sample
    fn resolve(&self, samples: &[T]) -> Option<(T, T)> {
        let first = *samples.first()?;
        let (min, max) = samples.iter().fold((first, first), |(lo, hi), v| {
            let lo = if v.order(&lo) == Ordering::Less { *v } else { lo };
            let hi = if v.order(&hi) == Ordering::Greater { *v } else { hi };
            (lo, hi)
        });
        Some((self.start.unwrap_or(min), self.end.unwrap_or(max)))
    }
}

/// Partitions a sample into contiguous buckets under a boundary policy
#[derive(Debug, Clone, Copy, Default)]
pub struct HistogramBuilder<P> {
    policy: P,
}

impl<P> HistogramBuilder<P> {
    pub fn new(policy: P) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Bucket `samples` over the effective window
    ///
    /// - Empty sample: empty histogram.
    /// - Degenerate window (`start == end`): one closed bucket `[start, end]`.
    /// - Otherwise contiguous buckets covering exactly `[start, end]`; samples
    ///   outside an explicit window are not counted.
    pub fn build<T>(&self, samples: &[T], window: &BucketWindow<T>) -> AppResult<Histogram<T>>
    where
        T: RangeBound,
        P: BoundaryPolicy<T>,
    {
        let Some((start, end)) = window.resolve(samples) else {
            return Ok(Histogram::empty());
        };

        let ranges = match end.order(&start) {
            Ordering::Less => {
                return Err(AppError::Validation(format!(
                    "histogram window end {} precedes start {}",
                    end.label(),
                    start.label()
                )))
            }
            Ordering::Equal => vec![Range::closed(start, end)?],
            Ordering::Greater => Self::ranges_from_edges(self.policy.boundaries(start, end))?,
        };

        let mut counts: Vec<(Range<T>, u64)> = ranges.into_iter().map(|r| (r, 0)).collect();
        let mut unassigned = 0usize;
        for sample in samples {
            match counts.iter_mut().find(|(range, _)| range.contains(*sample)) {
                Some((_, count)) => *count += 1,
                None => unassigned += 1,
            }
        }

        if unassigned > 0 {
            debug!(
                "{} of {} samples fell outside the histogram window",
                unassigned,
                samples.len()
            );
        }

        Ok(Histogram {
            buckets: counts.into_iter().collect(),
        })
    }

    /// Turn ascending edges into half-open ranges plus a closed last range
    fn ranges_from_edges<T: RangeBound>(mut edges: Vec<T>) -> AppResult<Vec<Range<T>>> {
        // Interpolation can repeat an edge when the span is tiny
        edges.dedup_by(|a, b| a.order(b) == Ordering::Equal);

        let last = edges.len().saturating_sub(2);
        edges
            .windows(2)
            .enumerate()
            .map(|(i, pair)| {
                if i == last {
                    Range::closed(pair[0], pair[1])
                } else {
                    Range::new(pair[0], pair[1])
                }
            })
            .collect()
    }
}
