//! Bucket ranges over ordered domains
//!
//! A [`Range`] is one histogram bucket. Every bucket of a partition is
//! left-closed/right-open (`start <= v < end`) except the last one, which is
//! closed on both ends (`start <= v <= end`) so the maximum observed value is
//! always counted. The flag is carried on the value itself, so membership can
//! be tested without knowing the bucket's position.
//!
//! The same rule serves all three domains used by the reports:
//! - `f64` measured values (sensor histogram)
//! - `TimeDelta` elapsed time between measurements (gateway histogram)
//! - `NaiveDateTime` calendar time (network histogram)

use crate::errors::{AppError, AppResult};
use crate::utils::time::{format_date_time, format_duration};
use chrono::{NaiveDateTime, TimeDelta};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Ordered domain a histogram can be built over
///
/// Implementors provide a total order (so ranges can key a `BTreeMap`),
/// linear interpolation between two bounds, and a presentation form.
pub trait RangeBound: Copy + fmt::Debug {
    /// Total order over the domain
    fn order(&self, other: &Self) -> Ordering;

    /// Point `step / steps` of the way from `start` to `end`
    fn interpolate(start: Self, end: Self, step: usize, steps: usize) -> Self;

    /// Human-readable form used by console reports
    fn label(&self) -> String;

    /// JSON form used by exported reports
    fn to_json(&self) -> serde_json::Value;
}

impl RangeBound for f64 {
    fn order(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }

    /// Weighted form so `end - start` never has to be representable
    fn interpolate(start: Self, end: Self, step: usize, steps: usize) -> Self {
        let t = step as f64 / steps as f64;
        start * (1.0 - t) + end * t
    }

    fn label(&self) -> String {
        format!("{:.4}", self)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!(self)
    }
}

/// Offset `span` scaled by `step / steps`, at millisecond resolution
fn scaled_span(span: TimeDelta, step: usize, steps: usize) -> TimeDelta {
    let millis = span.num_milliseconds() as i128 * step as i128 / steps as i128;
    TimeDelta::milliseconds(millis as i64)
}

impl RangeBound for TimeDelta {
    fn order(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn interpolate(start: Self, end: Self, step: usize, steps: usize) -> Self {
        start + scaled_span(end - start, step, steps)
    }

    fn label(&self) -> String {
        format_duration(self)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!(self.num_milliseconds() as f64 / 1000.0)
    }
}

impl RangeBound for NaiveDateTime {
    fn order(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn interpolate(start: Self, end: Self, step: usize, steps: usize) -> Self {
        start + scaled_span(end - start, step, steps)
    }

    fn label(&self) -> String {
        format_date_time(self)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::String(format_date_time(self))
    }
}

/// One histogram bucket: `[start, end)`, or `[start, end]` for the last bucket
#[derive(Debug, Clone, Copy)]
pub struct Range<T> {
    start: T,
    end: T,
    end_inclusive: bool,
}

impl<T: RangeBound> Range<T> {
    /// Half-open bucket `[start, end)`
    pub fn new(start: T, end: T) -> AppResult<Self> {
        Self::build(start, end, false)
    }

    /// Closed bucket `[start, end]`, used for the last bucket of a partition
    pub fn closed(start: T, end: T) -> AppResult<Self> {
        Self::build(start, end, true)
    }

    fn build(start: T, end: T, end_inclusive: bool) -> AppResult<Self> {
        if end.order(&start) == Ordering::Less {
            return Err(AppError::Validation(format!(
                "range end {} precedes start {}",
                end.label(),
                start.label()
            )));
        }
        Ok(Self {
            start,
            end,
            end_inclusive,
        })
    }

    pub fn start(&self) -> T {
        self.start
    }

    pub fn end(&self) -> T {
        self.end
    }

    /// Whether this is a last bucket (closed on its end)
    pub fn is_end_inclusive(&self) -> bool {
        self.end_inclusive
    }

    /// Membership test honouring the last-bucket-inclusive rule
    pub fn contains(&self, value: T) -> bool {
        if value.order(&self.start) == Ordering::Less {
            return false;
        }
        match value.order(&self.end) {
            Ordering::Less => true,
            Ordering::Equal => self.end_inclusive,
            Ordering::Greater => false,
        }
    }
}

impl<T: RangeBound> PartialEq for Range<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: RangeBound> Eq for Range<T> {}

impl<T: RangeBound> PartialOrd for Range<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Ascending by start, then end, then the half-open form first
impl<T: RangeBound> Ord for Range<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start
            .order(&other.start)
            .then_with(|| self.end.order(&other.end))
            .then_with(|| self.end_inclusive.cmp(&other.end_inclusive))
    }
}

impl<T: RangeBound> fmt::Display for Range<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let close = if self.end_inclusive { ']' } else { ')' };
        write!(f, "[{}, {}{}", self.start.label(), self.end.label(), close)
    }
}

impl<T: RangeBound> Serialize for Range<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Range", 3)?;
        state.serialize_field("start", &self.start.to_json())?;
        state.serialize_field("end", &self.end.to_json())?;
        state.serialize_field("end_inclusive", &self.end_inclusive)?;
        state.end()
    }
}
