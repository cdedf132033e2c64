//! Bucket coverage, last-bucket inclusion and degenerate spans

use chrono::TimeDelta;
use sensor_reports::analysis::{
    AdaptiveCalendarBuckets, BucketWindow, FixedBucketCount, Histogram, HistogramBuilder, Range,
    RangeBound,
};
use std::cmp::Ordering;

use crate::common::seeding::ts;

fn assert_contiguous<T: RangeBound>(histogram: &Histogram<T>, first: T, last: T) {
    let ranges: Vec<&Range<T>> = histogram.ranges().collect();
    assert!(!ranges.is_empty());
    assert_eq!(ranges[0].start().order(&first), Ordering::Equal);
    assert_eq!(ranges[ranges.len() - 1].end().order(&last), Ordering::Equal);

    for pair in ranges.windows(2) {
        assert_eq!(pair[0].end().order(&pair[1].start()), Ordering::Equal);
        assert!(!pair[0].is_end_inclusive());
    }
    assert!(ranges[ranges.len() - 1].is_end_inclusive());
}

#[test]
fn test_value_buckets_cover_observed_span() {
    let samples: Vec<f64> = (0..250).map(|i| (i as f64 * 0.37).sin() * 40.0 + 3.5).collect();
    let min = samples.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let histogram = HistogramBuilder::new(FixedBucketCount::default())
        .build(&samples, &BucketWindow::default())
        .unwrap();

    assert_eq!(histogram.len(), 20);
    assert_eq!(histogram.total_count(), samples.len() as u64);
    assert_contiguous(&histogram, min, max);
}

#[test]
fn test_maximum_counted_exactly_once_in_last_bucket() {
    let samples = vec![1.0, 2.0, 3.0, 10.0];
    let histogram = HistogramBuilder::new(FixedBucketCount::new(3).unwrap())
        .build(&samples, &BucketWindow::default())
        .unwrap();

    let (last_range, last_count) = histogram.iter().last().unwrap();
    assert_eq!(last_range.end(), 10.0);
    assert!(last_range.contains(10.0));
    assert_eq!(last_count, 1);
    assert_eq!(histogram.total_count(), 4);
}

#[test]
fn test_degenerate_duration_span() {
    let gaps = vec![TimeDelta::minutes(10)];
    let histogram = HistogramBuilder::new(FixedBucketCount::default())
        .build(&gaps, &BucketWindow::default())
        .unwrap();

    let only = Range::closed(TimeDelta::minutes(10), TimeDelta::minutes(10)).unwrap();
    assert_eq!(histogram.len(), 1);
    assert_eq!(histogram.get(&only), Some(1));
}

#[test]
fn test_calendar_window_covers_requested_bounds() {
    let start = ts("2024-05-01 00:00:00");
    let end = ts("2024-05-10 12:00:00");
    let samples = vec![
        ts("2024-05-02 03:00:00"),
        ts("2024-05-05 23:59:59"),
        ts("2024-05-10 12:00:00"),
    ];

    let histogram = HistogramBuilder::new(AdaptiveCalendarBuckets::default())
        .build(&samples, &BucketWindow::new(Some(start), Some(end)))
        .unwrap();

    // 1st..10th at midnight, the 10th closing at noon
    assert_eq!(histogram.len(), 10);
    assert_eq!(histogram.total_count(), 3);
    assert_contiguous(&histogram, start, end);
}

#[test]
fn test_buckets_iterate_in_start_order() {
    let samples = vec![9.0, -3.0, 4.0, 0.5, 7.25];
    let histogram = HistogramBuilder::new(FixedBucketCount::new(5).unwrap())
        .build(&samples, &BucketWindow::default())
        .unwrap();

    let starts: Vec<f64> = histogram.ranges().map(|r| r.start()).collect();
    let mut sorted = starts.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));
    assert_eq!(starts, sorted);
}

#[test]
fn test_inverted_range_rejected() {
    assert!(Range::new(5.0, 1.0).unwrap_err().is_validation());
    assert!(Range::closed(TimeDelta::seconds(2), TimeDelta::seconds(1)).is_err());
}
