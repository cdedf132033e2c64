//! Summary statistics, outlier rule and load ratios

use sensor_reports::analysis::aggregation::{count_by_key, load_ratios};
use sensor_reports::analysis::{summarize, OutlierRule};

#[test]
fn test_short_samples_never_produce_nan() {
    for values in [vec![], vec![3.0]] {
        let summary = summarize(&values);
        assert_eq!(summary.mean, 0.0);
        assert_eq!(summary.variance, 0.0);
        assert_eq!(summary.std_dev, 0.0);
    }
}

#[test]
fn test_sample_variance_uses_n_minus_one() {
    let summary = summarize(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
    assert_eq!(summary.mean, 5.0);
    assert!((summary.variance - 32.0 / 7.0).abs() < 1e-12);
}

#[test]
fn test_rerunning_on_non_outliers_stabilises() {
    let mut values: Vec<f64> = (0..50).map(|i| 10.0 + (i % 5) as f64 * 0.1).collect();
    values.extend([45.0, -30.0]);
    let rule = OutlierRule::default();

    let summary = summarize(&values);
    let (kept, flagged) = rule.partition(&values, |v| *v, summary.mean, summary.std_dev);
    assert_eq!(flagged.len(), 2);

    let kept: Vec<f64> = kept.into_iter().copied().collect();
    let second = summarize(&kept);
    let (_, flagged_again) = rule.partition(&kept, |v| *v, second.mean, second.std_dev);
    assert!(flagged_again.is_empty());
}

#[test]
fn test_zero_spread_flags_nothing() {
    let values = vec![7.0; 10];
    let summary = summarize(&values);
    let (kept, flagged) =
        OutlierRule::default().partition(&values, |v| *v, summary.mean, summary.std_dev);
    assert_eq!(kept.len(), 10);
    assert!(flagged.is_empty());
}

#[test]
fn test_load_ratios_sum_to_one() {
    let keys: Vec<String> = (0..97).map(|i| format!("GW_{}", i % 7)).collect();
    let counts = count_by_key(&keys, |k| k.as_str());
    let ratios = load_ratios(&counts, keys.len() as u64);

    let sum: f64 = ratios.values().sum();
    assert!((sum - 1.0).abs() < 1e-9);
}
